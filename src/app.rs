//! Application state: the card list plus the channel its cells report on.

use std::time::Instant;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::CellModel;
use crate::event::{Action, CardEvent};
use crate::theme::Theme;
use crate::widgets::CardList;

/// Top-level state driven by the main loop.
#[derive(Debug)]
pub struct App {
    /// The card list and its visible cells.
    pub list: CardList,
    /// Colors handed to every widget.
    pub theme: Theme,
    /// Set when the user asks to quit.
    pub exit: bool,
    events: UnboundedReceiver<CardEvent>,
}

impl App {
    /// Builds the app over `models` using the timing and theme from `config`.
    #[must_use]
    pub fn new(config: &AppConfig, models: Vec<CellModel>) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            list: CardList::new(models, config.animation_duration(), tx),
            theme: config.theme,
            exit: false,
            events,
        }
    }

    /// Applies one user action at `now`.
    pub fn update(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.exit = true,
            Action::FocusNext | Action::ScrollDown => self.list.focus_next(),
            Action::FocusPrevious | Action::ScrollUp => self.list.focus_previous(),
            Action::FocusFirst => self.list.focus_first(),
            Action::FocusLast => self.list.focus_last(),
            Action::PageDown => self.list.page_down(),
            Action::PageUp => self.list.page_up(),
            Action::ToggleFocused => {
                self.list.toggle_focused(now);
            }
            Action::Reload => self.list.reload_data(),
            Action::Click { column, row } => self.list.click(column, row, now),
        }
    }

    /// Advances animations and persists any expansion changes they settled.
    pub fn tick(&mut self, now: Instant) {
        self.list.tick(now);
        while let Ok(event) = self.events.try_recv() {
            if !self.list.apply_event(event) {
                debug!(?event, "expansion event dropped");
            }
        }
    }

    /// Whether the loop should keep drawing at the frame rate.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.list.is_animating()
    }

    /// Number of rows whose model is expanded.
    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.list.models().iter().filter(|m| m.is_expanded).count()
    }
}

// ============================================================================
// Tests
// ============================================================================
