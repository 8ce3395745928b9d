//! Error types for cardfold.
//!
//! Toggling a card never produces an error: interrupted transitions revert and
//! toggles on detached cells are silent no-ops. The variants here cover the
//! surrounding plumbing (configuration, terminal I/O, cell recycling).

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised by cardfold's configuration and list plumbing.
#[derive(Debug, Error)]
pub enum CardfoldError {
    /// Filesystem or terminal I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform configuration directory could not be determined.
    #[error(
        "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
    )]
    ConfigDir,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// The offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A cell was requested from the pool for a template nobody registered.
    #[error("No cell template registered for identifier '{0}'")]
    UnknownTemplate(String),
}

impl CardfoldError {
    /// Create a new invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CardfoldError>;

// ============================================================================
// Tests
// ============================================================================
