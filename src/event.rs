use crate::domain::CellId;

/// Events a card cell reports to its listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    /// A toggle fully settled: rotation and detail resize both completed.
    ExpansionChanged {
        /// Identity of the cell binding that settled.
        cell: CellId,
        /// The settled expansion state.
        expanded: bool,
    },
}

/// Application actions triggered by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrevious,
    FocusFirst,
    FocusLast,
    PageDown,
    PageUp,
    ToggleFocused,
    Reload,
    ScrollUp,
    ScrollDown,
    Click { column: u16, row: u16 },
}
