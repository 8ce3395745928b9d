//! Theme and styling for the cardfold TUI.
//!
//! Tokyo Night-inspired colors. A [`Theme`] value is passed to every widget
//! that draws; nothing looks colors up globally.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

// ============================================================================
// Color Constants
// ============================================================================

/// Primary accent color - focused elements and highlights.
pub const PRIMARY_COLOR: Color = Color::Cyan;

/// Muted text color.
pub const MUTED_COLOR: Color = Color::Gray;

/// Tokyo Night background color.
pub const BG_COLOR: Color = Color::Rgb(26, 27, 38);

/// Card fill color.
pub const CARD_COLOR: Color = Color::Rgb(41, 46, 66);

/// Primary text color on cards.
pub const TEXT_COLOR: Color = Color::Rgb(192, 202, 245);

// ============================================================================
// Theme
// ============================================================================

/// Colors used to draw the card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Screen background behind the cards.
    pub background: Color,
    /// Card fill.
    pub card: Color,
    /// Card border when the row is not focused.
    pub border: Color,
    /// Card border when the row has keyboard focus.
    pub focused_border: Color,
    /// Heading label above the title.
    pub heading: Color,
    /// Title, description and footer text.
    pub text: Color,
    /// Chevron affordance.
    pub chevron: Color,
    /// Number grid item fill.
    pub grid_item: Color,
    /// Number grid item label.
    pub grid_label: Color,
    /// Secondary text (captions, hints, empty states).
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: BG_COLOR,
            card: CARD_COLOR,
            border: Color::DarkGray,
            focused_border: PRIMARY_COLOR,
            heading: PRIMARY_COLOR,
            text: TEXT_COLOR,
            chevron: PRIMARY_COLOR,
            grid_item: Color::Rgb(61, 89, 161),
            grid_label: Color::White,
            muted: MUTED_COLOR,
        }
    }
}

impl Theme {
    /// Fill style of a card body.
    #[must_use]
    pub fn card_style(&self) -> Style {
        Style::new().bg(self.card).fg(self.text)
    }

    /// Border style for a card, highlighted when focused.
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::new().fg(self.focused_border).bg(self.card)
        } else {
            Style::new().fg(self.border).bg(self.card)
        }
    }

    /// Heading label style.
    #[must_use]
    pub fn heading_style(&self) -> Style {
        Style::new()
            .fg(self.heading)
            .bg(self.card)
            .add_modifier(Modifier::BOLD)
    }

    /// Title and footer label style.
    #[must_use]
    pub fn label_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.card)
    }

    /// Detail text style at the given opacity (`0.0` invisible, `1.0` opaque).
    #[must_use]
    pub fn detail_style(&self, opacity: f32) -> Style {
        Style::new()
            .fg(blend(self.card, self.text, opacity))
            .bg(self.card)
    }

    /// Chevron style.
    #[must_use]
    pub fn chevron_style(&self) -> Style {
        Style::new()
            .fg(self.chevron)
            .bg(self.card)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for one number grid item at the given opacity.
    #[must_use]
    pub fn grid_item_style(&self, opacity: f32) -> Style {
        Style::new()
            .fg(blend(self.grid_item, self.grid_label, opacity))
            .bg(blend(self.card, self.grid_item, opacity))
    }

    /// Caption above the number grid.
    #[must_use]
    pub fn caption_style(&self, opacity: f32) -> Style {
        Style::new()
            .fg(blend(self.card, self.muted, opacity))
            .bg(self.card)
            .add_modifier(Modifier::BOLD)
    }

    /// Hint and empty-state text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::new().fg(self.muted)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Blends `from` toward `to` by `t` in `[0, 1]`.
///
/// Only RGB colors interpolate; named and indexed colors switch at the midpoint.
#[must_use]
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => Color::Rgb(
            mix_channel(r1, r2, t),
            mix_channel(g1, g2, t),
            mix_channel(b1, b2, t),
        ),
        _ if t < 0.5 => from,
        _ => to,
    }
}

fn mix_channel(a: u8, b: u8, t: f32) -> u8 {
    let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

// ============================================================================
// Tests
// ============================================================================
