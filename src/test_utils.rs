//! Shared test utilities and Mother pattern factories.
//!
//! Use these helpers to avoid copy-pasting model setup and buffer inspection
//! across widget tests.
#![allow(dead_code)]

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Rect};
use rstest::fixture;

use crate::domain::CellModel;

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct CellModelMother;

impl CellModelMother {
    /// The first demo row: short description, no numbers, collapsed.
    #[must_use]
    pub fn first_row() -> CellModel {
        Self::row(1)
    }

    /// Demo row `n` without numbers.
    #[must_use]
    pub fn row(n: usize) -> CellModel {
        CellModel::new(
            format!("Section {n}"),
            format!("Title {n}"),
            format!("Short description for item {n}."),
            format!("Footer text for item {n}."),
        )
    }

    /// Demo row `n` with `count` numbers `"0".."count-1"`.
    #[must_use]
    pub fn with_numbers(n: usize, count: usize) -> CellModel {
        Self::row(n).with_numbers((0..count).map(|i| i.to_string()))
    }

    /// Demo row `n` with a description that wraps at narrow widths.
    #[must_use]
    pub fn long(n: usize) -> CellModel {
        CellModel {
            description: format!(
                "Longer description for item {n}. It keeps going so the detail area needs several rows."
            ),
            ..Self::row(n)
        }
    }

    /// `count` collapsed rows numbered from 1.
    #[must_use]
    pub fn rows(count: usize) -> Vec<CellModel> {
        (1..=count).map(Self::row).collect()
    }
}

// ============================================================================
// Buffer Inspection
// ============================================================================

/// Renders a buffer as text, one line per row, trailing spaces trimmed.
#[must_use]
pub fn buffer_to_string(buf: &Buffer) -> String {
    buffer_region(buf, buf.area)
}

/// Renders part of a buffer as text, one line per row, trailing spaces trimmed.
#[must_use]
pub fn buffer_region(buf: &Buffer, region: Rect) -> String {
    let region = region.intersection(buf.area);
    let mut lines = Vec::with_capacity(usize::from(region.height));
    for y in region.top()..region.bottom() {
        let mut line = String::new();
        for x in region.left()..region.right() {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

// ============================================================================
// rstest Fixtures
// ============================================================================

#[fixture]
pub fn test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(60, 30)).expect("terminal creation should succeed")
}

#[fixture]
pub fn test_terminal_80x24() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).expect("terminal creation should succeed")
}
