//! Domain types for the cardfold card list.
//!
//! # Module Organization
//!
//! - [`model`] - The per-row [`CellModel`] and the [`CellId`] a cell reports with its events
//! - [`sample`] - Demo rows used to populate the list

// ============================================================================
// Module Declarations
// ============================================================================

pub mod model;
pub mod sample;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{CellId, CellModel};
pub use sample::sample_models;
