//! Card header widget.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::theme::Theme;

use super::helpers::truncate_to_width;

/// One-line heading label drawn at the top of a card.
#[derive(Debug, Clone, Copy)]
pub struct HeaderView<'a> {
    heading: &'a str,
    theme: &'a Theme,
}

impl<'a> HeaderView<'a> {
    /// Creates a header for the given heading text.
    #[must_use]
    pub const fn new(heading: &'a str, theme: &'a Theme) -> Self {
        Self { heading, theme }
    }
}

impl Widget for HeaderView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let text = truncate_to_width(self.heading, area.width);
        buf.set_stringn(
            area.x,
            area.y,
            text,
            usize::from(area.width),
            self.theme.heading_style(),
        );
    }
}
