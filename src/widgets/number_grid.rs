//! Number grid shown inside an expanded card.
//!
//! Items flow left to right and wrap onto new rows; the grid's height follows
//! from its content and the available width.
//!
//! ```text
//! Numbers
//!  0    1    2    3    4    5
//!  6    7    8    9    10   11
//! ```

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::constants::{GRID_ITEM_GAP, GRID_ITEM_PADDING, NUMBERS_CAPTION};
use crate::theme::Theme;

use super::helpers::display_width;

/// Layout and line builder for a grid of small numbered items.
#[derive(Debug, Clone, Copy)]
pub struct NumberGrid<'a> {
    numbers: &'a [String],
}

impl<'a> NumberGrid<'a> {
    /// Creates a grid rendering exactly the given items.
    #[must_use]
    pub const fn new(numbers: &'a [String]) -> Self {
        Self { numbers }
    }

    /// Returns true when there is nothing to show.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Width of one item, padding included.
    #[must_use]
    pub fn item_width(&self) -> u16 {
        self.numbers
            .iter()
            .map(|n| display_width(n))
            .max()
            .unwrap_or(0)
            .saturating_add(GRID_ITEM_PADDING)
    }

    /// Items per row at the given width; at least one.
    #[must_use]
    pub fn columns(&self, width: u16) -> usize {
        let slot = usize::from(self.item_width()) + usize::from(GRID_ITEM_GAP);
        let available = usize::from(width) + usize::from(GRID_ITEM_GAP);
        (available / slot).max(1)
    }

    /// Number of item rows at the given width.
    #[must_use]
    pub fn row_count(&self, width: u16) -> usize {
        self.numbers.len().div_ceil(self.columns(width))
    }

    /// Total height in rows, caption included; zero when empty.
    #[must_use]
    pub fn height(&self, width: u16) -> u16 {
        if self.is_empty() {
            return 0;
        }
        u16::try_from(self.row_count(width))
            .unwrap_or(u16::MAX)
            .saturating_add(1)
    }

    /// Builds the caption and item rows.
    #[must_use]
    pub fn to_lines(&self, width: u16, theme: &Theme, opacity: f32) -> Vec<Line<'static>> {
        if self.is_empty() {
            return Vec::new();
        }

        let item_width = usize::from(self.item_width());
        let item_style = theme.grid_item_style(opacity);
        let gap_style = Style::new().bg(theme.card);
        let gap = " ".repeat(usize::from(GRID_ITEM_GAP));

        let mut lines = Vec::with_capacity(self.row_count(width) + 1);
        lines.push(Line::from(Span::styled(
            NUMBERS_CAPTION,
            theme.caption_style(opacity),
        )));

        for row in self.numbers.chunks(self.columns(width)) {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (i, number) in row.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(gap.clone(), gap_style));
                }
                spans.push(Span::styled(center(number, item_width), item_style));
            }
            lines.push(Line::from(spans));
        }

        lines
    }
}

/// Centers `text` in a field of `width` columns, extra space going right.
fn center(text: &str, width: usize) -> String {
    let text_width = usize::from(display_width(text));
    let total = width.saturating_sub(text_width);
    let left = total / 2;
    let right = total - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers(count: usize) -> Vec<String> {
        (0..count).map(|i| i.to_string()).collect()
    }

    fn lines_to_string(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[rstest]
    #[case::empty(0, 20, 0)]
    #[case::single_row(3, 20, 2)]
    #[case::wraps(12, 23, 4)]
    #[case::narrow_keeps_one_column(4, 1, 5)]
    fn test_height(#[case] count: usize, #[case] width: u16, #[case] expected: u16) {
        let items = numbers(count);
        assert_eq!(NumberGrid::new(&items).height(width), expected);
    }

    #[test]
    fn test_renders_exactly_the_given_items() {
        let items = numbers(7);
        let grid = NumberGrid::new(&items);
        let lines = grid.to_lines(40, &Theme::default(), 1.0);
        let labels: usize = lines[1..]
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| !span.content.trim().is_empty())
            .count();
        assert_eq!(labels, 7);
    }

    #[test]
    fn test_columns_follow_widest_label() {
        let items = numbers(12);
        let grid = NumberGrid::new(&items);
        // "10" and "11" make every item 4 columns wide, 5 with the gap.
        assert_eq!(grid.item_width(), 4);
        assert_eq!(grid.columns(23), 4);
        assert_eq!(grid.columns(24), 5);
    }

    #[test]
    fn test_grid_layout_snapshot() {
        let items = numbers(12);
        let lines = NumberGrid::new(&items).to_lines(23, &Theme::default(), 1.0);
        insta::assert_snapshot!(lines_to_string(&lines), @r"
        Numbers
         0    1    2    3
         4    5    6    7
         8    9    10   11
        ");
    }
}
