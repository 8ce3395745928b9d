//! Widgets for the card list.
//!
//! # Module Structure
//!
//! - [`card_list`]: The scrolling host list, its cell recycling and event persistence
//! - [`card_cell`]: One card row and the two-phase expand/collapse coordinator
//! - [`expand_control`]: The chevron state machine
//! - [`header`]: The heading label at the top of a card
//! - [`number_grid`]: The wrapped grid of number labels in a card's detail area
//! - [`pool`]: Recycling pool for row cells
//! - [`row_updates`]: Row-height invalidation shared between list and cells
//! - [`helpers`]: Text wrapping and truncation by display width

pub mod card_cell;
pub mod card_list;
pub mod expand_control;
pub mod header;
pub mod helpers;
pub mod number_grid;
pub mod pool;
pub mod row_updates;

pub use card_list::{CardList, CardListWidget};
