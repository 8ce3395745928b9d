//! Card list: the host that owns the row models and recycles card cells.
//!
//! Only rows inside the viewport have a live [`CardCell`]. Layout dequeues a
//! cell from the [`CellPool`] for each row scrolling in, configures it from the
//! row's model, subscribes it to the list's event channel and attaches it to
//! the shared [`RowUpdates`]. Rows scrolling out hand their cell back to the
//! pool, which resets it.
//!
//! Expansion changes flow back as [`CardEvent`]s and are persisted into the
//! models by [`CardList::apply_event`], so a recycled row renders with the
//! state its user left it in.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::scrollbar,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace, warn};

use crate::domain::{CellId, CellModel};
use crate::event::CardEvent;
use crate::theme::Theme;

use super::card_cell::{CARD_CELL_IDENTIFIER, CardCell, CardCellWidget, CardGeometry};
use super::helpers::display_width;
use super::pool::CellPool;
use super::row_updates::{RowUpdates, SharedRowUpdates};

/// Message shown when the list has no rows.
const EMPTY_MESSAGE: &str = "No cards to show";

// ============================================================================
// Hit
// ============================================================================

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The title-and-chevron affordance of a row.
    Toggle(usize),
    /// Anywhere else inside a row.
    Row(usize),
}

// ============================================================================
// CardList
// ============================================================================

/// Scrolling list of expandable cards.
#[derive(Debug)]
pub struct CardList {
    models: Vec<CellModel>,
    pool: CellPool<CardCell>,
    visible: BTreeMap<usize, CardCell>,
    updates: SharedRowUpdates,
    heights: Vec<Option<u16>>,
    measured_width: u16,
    row_areas: Vec<(usize, Rect)>,
    viewport: Rect,
    offset: usize,
    focused: usize,
    next_generation: u64,
    listener: UnboundedSender<CardEvent>,
}

impl CardList {
    /// Creates a list over `models`; settled toggles are sent to `listener`.
    #[must_use]
    pub fn new(
        models: Vec<CellModel>,
        duration: Duration,
        listener: UnboundedSender<CardEvent>,
    ) -> Self {
        let mut pool = CellPool::new();
        pool.register(CARD_CELL_IDENTIFIER, move || CardCell::new(duration));

        Self {
            heights: vec![None; models.len()],
            models,
            pool,
            visible: BTreeMap::new(),
            updates: RowUpdates::shared(),
            measured_width: 0,
            row_areas: Vec::new(),
            viewport: Rect::default(),
            offset: 0,
            focused: 0,
            next_generation: 0,
            listener,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The row models in display order.
    #[must_use]
    pub fn models(&self) -> &[CellModel] {
        &self.models
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Row with keyboard focus.
    #[must_use]
    pub const fn focused(&self) -> usize {
        self.focused
    }

    /// Live cell for `row`, if the row is on screen.
    #[must_use]
    pub fn cell(&self, row: usize) -> Option<&CardCell> {
        self.visible.get(&row)
    }

    /// Rows that currently have a live cell.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<usize> {
        self.visible.keys().copied().collect()
    }

    /// Idle cells waiting in the pool.
    #[must_use]
    pub fn idle_cells(&self) -> usize {
        self.pool.idle_count(CARD_CELL_IDENTIFIER)
    }

    /// Whether any visible card is mid-transition.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.visible.values().any(CardCell::is_animating)
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// Lays out the viewport: measures rows, scrolls the focused row into
    /// view and binds cells to the rows on screen.
    pub fn layout(&mut self, area: Rect, now: Instant) {
        if area.width != self.measured_width {
            self.heights.iter_mut().for_each(|h| *h = None);
            self.measured_width = area.width;
        }
        let (invalidated, transactions) = {
            let mut updates = self.updates.borrow_mut();
            (updates.take_invalidated(), updates.transactions())
        };
        if !invalidated.is_empty() {
            trace!(rows = ?invalidated, transactions, "re-measuring rows");
        }
        for row in invalidated {
            if let Some(height) = self.heights.get_mut(row) {
                *height = None;
            }
        }

        self.viewport = area;
        self.row_areas.clear();

        if self.models.is_empty() || area.is_empty() {
            self.recycle_rows_outside(0..0);
            return;
        }

        self.focused = self.focused.min(self.models.len() - 1);
        self.scroll_focus_into_view(area.height, now);

        let mut end = self.offset;
        let mut used = 0u16;
        while end < self.models.len() && used < area.height {
            used = used.saturating_add(self.row_height(end, now));
            end += 1;
        }
        let range = self.offset..end;

        let recycled = self.recycle_rows_outside(range.clone());
        let mut bound = 0;
        for row in range.clone() {
            if !self.visible.contains_key(&row) {
                self.bind_row(row);
                bound += 1;
            }
        }
        if recycled + bound > 0 {
            debug!(
                rows = ?self.visible_rows(),
                recycled,
                bound,
                idle = self.idle_cells(),
                "rebound visible rows"
            );
        }

        let mut y = area.y;
        for row in range {
            let height = self.row_height(row, now);
            self.row_areas
                .push((row, Rect::new(area.x, y, area.width, height)));
            y = y.saturating_add(height);
        }
    }

    fn row_height(&mut self, row: usize, now: Instant) -> u16 {
        if let Some(Some(height)) = self.heights.get(row) {
            return *height;
        }
        let height = match self.visible.get(&row) {
            Some(cell) => cell.row_height(self.measured_width, now),
            None => CardCell::measure_model(&self.models[row], self.measured_width),
        };
        if let Some(slot) = self.heights.get_mut(row) {
            *slot = Some(height);
        }
        height
    }

    fn scroll_focus_into_view(&mut self, viewport_height: u16, now: Instant) {
        if self.focused < self.offset {
            self.offset = self.focused;
        }
        self.offset = self.offset.min(self.models.len() - 1);

        while self.offset < self.focused {
            let span: u16 = (self.offset..=self.focused)
                .map(|row| self.row_height(row, now))
                .fold(0u16, u16::saturating_add);
            if span <= viewport_height {
                break;
            }
            self.offset += 1;
        }
    }

    fn bind_row(&mut self, row: usize) {
        let mut cell = match self.pool.dequeue(CARD_CELL_IDENTIFIER) {
            Ok(cell) => cell,
            Err(err) => {
                warn!(%err, row, "could not dequeue a card cell");
                return;
            }
        };
        let id = self.next_id(row);
        cell.configure(id, &self.models[row]);
        cell.subscribe(self.listener.clone());
        cell.attach(Rc::downgrade(&self.updates));
        self.visible.insert(row, cell);
    }

    /// Identity for a new binding of `row`, unique across every cell of the list.
    fn next_id(&mut self, row: usize) -> CellId {
        self.next_generation += 1;
        CellId::new(row, self.next_generation)
    }

    fn recycle_rows_outside(&mut self, keep: std::ops::Range<usize>) -> usize {
        let leaving: Vec<usize> = self
            .visible
            .keys()
            .copied()
            .filter(|row| !keep.contains(row))
            .collect();
        let count = leaving.len();
        for row in leaving {
            if let Some(cell) = self.visible.remove(&row) {
                self.pool.enqueue(CARD_CELL_IDENTIFIER, cell);
            }
        }
        count
    }

    /// Re-binds every visible cell to its model, abandoning in-flight toggles.
    pub fn reload_data(&mut self) {
        let rows = self.visible_rows();
        for row in rows {
            let id = self.next_id(row);
            if let Some(cell) = self.visible.get_mut(&row) {
                cell.configure(id, &self.models[row]);
            }
        }
        self.heights.iter_mut().for_each(|h| *h = None);
    }

    // ------------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------------

    /// Toggles the card at `row`. Rows without a live cell ignore the request.
    pub fn toggle_row(&mut self, row: usize, now: Instant) -> bool {
        match self.visible.get_mut(&row) {
            Some(cell) => cell.toggle(now),
            None => {
                debug!(row, "toggle ignored: row is not on screen");
                false
            }
        }
    }

    /// Toggles the focused card.
    pub fn toggle_focused(&mut self, now: Instant) -> bool {
        self.toggle_row(self.focused, now)
    }

    /// Row selection pass-through: focuses the row and immediately deselects
    /// it, so a selection never persists.
    pub fn did_select_row(&mut self, row: usize) {
        if row >= self.models.len() {
            return;
        }
        self.focused = row;
        debug!(row, "row selected and deselected");
    }

    /// Moves focus down one row.
    pub fn focus_next(&mut self) {
        if self.focused + 1 < self.models.len() {
            self.focused += 1;
        }
    }

    /// Moves focus up one row.
    pub fn focus_previous(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    /// Focuses the first row.
    pub fn focus_first(&mut self) {
        self.focused = 0;
    }

    /// Focuses the last row.
    pub fn focus_last(&mut self) {
        self.focused = self.models.len().saturating_sub(1);
    }

    /// Moves focus down by one screenful.
    pub fn page_down(&mut self) {
        let page = self.page_size();
        self.focused = (self.focused + page).min(self.models.len().saturating_sub(1));
    }

    /// Moves focus up by one screenful.
    pub fn page_up(&mut self) {
        self.focused = self.focused.saturating_sub(self.page_size());
    }

    fn page_size(&self) -> usize {
        self.row_areas
            .iter()
            .filter(|(_, rect)| rect.bottom() <= self.viewport.bottom())
            .count()
            .max(1)
    }

    /// Finds what is under a screen position from the last layout.
    #[must_use]
    pub fn hit_test(&self, column: u16, y: u16) -> Option<Hit> {
        if !self.viewport.contains((column, y).into()) {
            return None;
        }
        let (row, rect) = self
            .row_areas
            .iter()
            .find(|(_, rect)| y >= rect.top() && y < rect.bottom())?;

        let on_toggle = CardGeometry::new(*rect)
            .is_some_and(|g| g.toggle_area().contains((column, y).into()));
        Some(if on_toggle {
            Hit::Toggle(*row)
        } else {
            Hit::Row(*row)
        })
    }

    /// Handles a click: toggles on the affordance, selects elsewhere.
    pub fn click(&mut self, column: u16, y: u16, now: Instant) {
        match self.hit_test(column, y) {
            Some(Hit::Toggle(row)) => {
                self.focused = row;
                self.toggle_row(row, now);
            }
            Some(Hit::Row(row)) => self.did_select_row(row),
            None => {}
        }
    }

    // ------------------------------------------------------------------------
    // Animation and events
    // ------------------------------------------------------------------------

    /// Advances every visible card's transitions.
    pub fn tick(&mut self, now: Instant) {
        for cell in self.visible.values_mut() {
            cell.tick(now);
        }
    }

    /// Persists a settled expansion change into the row's model.
    ///
    /// Events whose cell identity no longer matches the cell bound to that
    /// row are stale and rejected. Returns whether the model was updated.
    pub fn apply_event(&mut self, event: CardEvent) -> bool {
        let CardEvent::ExpansionChanged { cell, expanded } = event;

        let bound = self.visible.get(&cell.row).and_then(CardCell::id);
        if bound != Some(cell) {
            warn!(?cell, ?bound, "rejecting stale expansion event");
            return false;
        }
        let Some(model) = self.models.get_mut(cell.row) else {
            return false;
        };

        model.is_expanded = expanded;
        self.updates.borrow_mut().invalidate_row(cell.row);
        true
    }
}

// ============================================================================
// CardListWidget
// ============================================================================

/// Renders a [`CardList`], laying it out first.
///
/// ```text
/// ╭──────────────────────────────╮
/// │  Section 1                   │
/// │  Title 1                  ▼  │
/// │                              │
/// │  Footer text for item 1.     │
/// ╰──────────────────────────────╯
///
/// ╭──────────────────────────────╮
/// │  Section 2                   │ ▐
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CardListWidget<'a> {
    theme: &'a Theme,
    now: Instant,
}

impl<'a> CardListWidget<'a> {
    /// Creates a widget drawing the list as of `now`.
    #[must_use]
    pub const fn new(theme: &'a Theme, now: Instant) -> Self {
        Self { theme, now }
    }
}

impl StatefulWidget for CardListWidget<'_> {
    type State = CardList;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(area, Style::new().bg(self.theme.background));

        if state.is_empty() {
            let x = area.x + area.width.saturating_sub(display_width(EMPTY_MESSAGE)) / 2;
            let y = area.y + area.height / 2;
            if y < area.bottom() && x < area.right() {
                buf.set_stringn(
                    x,
                    y,
                    EMPTY_MESSAGE,
                    usize::from(area.right() - x),
                    self.theme.muted_style(),
                );
            }
            return;
        }

        state.layout(area, self.now);

        for (row, rect) in &state.row_areas {
            let Some(cell) = state.cell(*row) else {
                continue;
            };
            // Rows are drawn whole off-screen and copied in, so the last row
            // can be cut at the viewport edge.
            let local = Rect::new(0, 0, rect.width, rect.height);
            let mut row_buf = Buffer::empty(local);
            row_buf.set_style(local, Style::new().bg(self.theme.background));
            CardCellWidget::new(cell, self.theme)
                .focused(*row == state.focused)
                .render(local, &mut row_buf);

            for dy in 0..rect.height {
                let y = rect.y.saturating_add(dy);
                if y >= area.bottom() {
                    break;
                }
                for dx in 0..rect.width {
                    buf[(rect.x + dx, y)] = row_buf[(dx, dy)].clone();
                }
            }
        }

        let shown = state.row_areas.len();
        if state.len() > shown {
            let mut scrollbar_state = ScrollbarState::new(state.len().saturating_sub(shown) + 1)
                .viewport_content_length(shown)
                .position(state.offset);
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .track_symbol(None)
                .begin_symbol(None)
                .end_symbol(None)
                .style(Style::default().fg(self.theme.muted))
                .render(area, buf, &mut scrollbar_state);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
