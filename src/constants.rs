//! Application constants for the cardfold TUI.
//!
//! Card geometry, animation timing and display symbols live here so the
//! widgets and the measuring code agree on every row count.

use std::f32::consts::PI;
use std::time::Duration;

// ============================================================================
// Timing Constants
// ============================================================================

/// Frame interval of the main loop while animations run.
pub const TICK_RATE: Duration = Duration::from_millis(16);

/// How long the main loop waits for input when nothing is animating.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Default duration of each expand/collapse phase.
pub const DEFAULT_ANIMATION_MS: u64 = 300;

/// Longest animation phase accepted from configuration.
pub const MAX_ANIMATION_MS: u64 = 5_000;

/// Chevron rotation when expanded.
///
/// Slightly under a half turn so repeated toggles always rotate back the same way.
pub const CHEVRON_EXPANDED_ANGLE: f32 = PI - 0.001;

// ============================================================================
// Card Geometry
// ============================================================================

/// Blank rows above each card.
pub const CARD_MARGIN_TOP: u16 = 1;

/// Blank columns on each side of a card.
pub const CARD_MARGIN_X: u16 = 2;

/// Columns between the card border and its content.
pub const CARD_PADDING_X: u16 = 2;

/// Rows taken by the card's top and bottom border.
pub const CARD_BORDER_ROWS: u16 = 2;

/// Heading line + title line + spacer above the footer + footer line.
pub const CARD_FIXED_CONTENT_ROWS: u16 = 4;

/// Spacer row at the top of the detail area.
pub const DETAIL_SPACER_ROWS: u16 = 1;

/// Columns reserved to the right of the title for the chevron.
pub const CHEVRON_COLUMNS: u16 = 3;

/// Height of a collapsed card row, margins included.
pub const COLLAPSED_ROW_HEIGHT: u16 = CARD_MARGIN_TOP + CARD_BORDER_ROWS + CARD_FIXED_CONTENT_ROWS;

// ============================================================================
// Number Grid
// ============================================================================

/// Caption drawn above the number grid.
pub const NUMBERS_CAPTION: &str = "Numbers";

/// Columns of padding around each grid label.
pub const GRID_ITEM_PADDING: u16 = 2;

/// Columns between two grid items.
pub const GRID_ITEM_GAP: u16 = 1;

// ============================================================================
// Sample Data
// ============================================================================

/// Number of demo rows generated when nothing else is configured.
pub const DEFAULT_ROW_COUNT: usize = 20;

/// Upper bound on numbers generated for one demo row.
pub const MAX_SAMPLE_NUMBERS: usize = 24;

// ============================================================================
// Symbols
// ============================================================================

/// Chevron glyphs from collapsed (pointing down) to expanded (pointing up),
/// one per eighth turn.
pub const CHEVRON_GLYPHS: [&str; 5] = ["▼", "◣", "◀", "◤", "▲"];

/// Ellipsis used when a one-line label is truncated.
pub const ELLIPSIS: &str = "…";
