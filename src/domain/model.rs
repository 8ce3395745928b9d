//! Row model and cell identity.

use serde::{Deserialize, Serialize};

// ============================================================================
// CellModel
// ============================================================================

/// Display content and expansion state of one list row.
///
/// Everything except `is_expanded` is fixed once the list is populated.
/// `is_expanded` is owned by the list's data source and is only written when a
/// card reports a settled toggle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellModel {
    /// Small label above the card title.
    pub heading: String,
    /// Primary label, always visible.
    pub title: String,
    /// Detail text, visible only when expanded.
    pub description: String,
    /// Trailing label, always visible.
    pub footer: String,
    /// Items rendered in the number grid when expanded.
    #[serde(default)]
    pub numbers: Option<Vec<String>>,
    /// Current expansion state.
    #[serde(default)]
    pub is_expanded: bool,
}

impl CellModel {
    /// Creates a collapsed model without numbers.
    #[must_use]
    pub fn new(
        heading: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        footer: impl Into<String>,
    ) -> Self {
        Self {
            heading: heading.into(),
            title: title.into(),
            description: description.into(),
            footer: footer.into(),
            numbers: None,
            is_expanded: false,
        }
    }

    /// Attaches number grid items.
    #[must_use]
    pub fn with_numbers<I, S>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numbers = Some(numbers.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the initial expansion state.
    #[must_use]
    pub const fn expanded(mut self, is_expanded: bool) -> Self {
        self.is_expanded = is_expanded;
        self
    }

    /// The number grid items, empty when absent.
    #[must_use]
    pub fn numbers(&self) -> &[String] {
        self.numbers.as_deref().unwrap_or_default()
    }

    /// Whether the number grid should be shown at all.
    #[must_use]
    pub fn has_numbers(&self) -> bool {
        !self.numbers().is_empty()
    }
}

// ============================================================================
// CellId
// ============================================================================

/// Identity of a configured cell: the row it renders plus the configuration
/// generation.
///
/// A recycled cell gets a new generation on every `configure`, so an event
/// emitted for a previous binding never matches the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    /// Row index in the list's data source.
    pub row: usize,
    /// Binding generation, never reused within one list.
    pub generation: u64,
}

impl CellId {
    /// Creates a new identity.
    #[must_use]
    pub const fn new(row: usize, generation: u64) -> Self {
        Self { row, generation }
    }
}

// ============================================================================
// Tests
// ============================================================================
