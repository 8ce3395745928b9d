//! Card cell: renders one [`CellModel`] and coordinates its expansion.
//!
//! A toggle runs in two phases. The [`ExpandControl`] rotates its chevron;
//! when that settles the cell flips its collapsed-height constraint inside a
//! host row-update transaction and animates the detail area's height and
//! opacity. Only when that second phase settles does the cell report
//! [`CardEvent::ExpansionChanged`] to its listener.
//!
//! ```text
//! ╭──────────────────────────────────────╮
//! │  Section 1                           │
//! │  Title 1                          ▲  │
//! │                                      │
//! │  Short description for item 1.       │
//! │                                      │
//! │  Footer text for item 1.             │
//! ╰──────────────────────────────────────╯
//! ```

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, BorderType, Widget},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::animation::{Transition, lerp};
use crate::constants::{
    CARD_BORDER_ROWS, CARD_FIXED_CONTENT_ROWS, CARD_MARGIN_TOP, CARD_MARGIN_X, CARD_PADDING_X,
    CHEVRON_COLUMNS, COLLAPSED_ROW_HEIGHT, DETAIL_SPACER_ROWS,
};
use crate::domain::{CellId, CellModel};
use crate::event::CardEvent;
use crate::theme::Theme;

use super::expand_control::ExpandControl;
use super::header::HeaderView;
use super::helpers::{truncate_to_width, wrap_text};
use super::number_grid::NumberGrid;
use super::pool::Reusable;
use super::row_updates::{HostLink, SharedRowUpdates};

/// Template identifier cards are registered under in the cell pool.
pub const CARD_CELL_IDENTIFIER: &str = "CardCell";

// ============================================================================
// Measurement
// ============================================================================

/// Width available to card content for a row of `row_width` columns.
#[must_use]
pub const fn content_width(row_width: u16) -> u16 {
    row_width.saturating_sub(2 * CARD_MARGIN_X + CARD_BORDER_ROWS + 2 * CARD_PADDING_X)
}

/// Rows the detail area needs to show everything at `width` columns.
#[must_use]
pub fn natural_detail_height(description: &str, numbers: &[String], width: u16) -> u16 {
    let description_rows = u16::try_from(wrap_text(description, width).len()).unwrap_or(u16::MAX);
    DETAIL_SPACER_ROWS
        .saturating_add(description_rows)
        .saturating_add(NumberGrid::new(numbers).height(width))
}

// ============================================================================
// CardGeometry
// ============================================================================

/// Areas of a card inside its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGeometry {
    /// The bordered card.
    pub card: Rect,
    /// Heading line.
    pub header: Rect,
    /// Title label, chevron excluded.
    pub title: Rect,
    /// Chevron cell.
    pub chevron: Rect,
    /// Detail area; zero rows when collapsed.
    pub detail: Rect,
    /// Footer line.
    pub footer: Rect,
}

impl CardGeometry {
    /// Lays out a card in `area`, or `None` when the area cannot hold a
    /// collapsed card.
    #[must_use]
    pub fn new(area: Rect) -> Option<Self> {
        let width = content_width(area.width);
        if area.height < COLLAPSED_ROW_HEIGHT || width == 0 {
            return None;
        }

        let card = Rect::new(
            area.x + CARD_MARGIN_X,
            area.y + CARD_MARGIN_TOP,
            area.width - 2 * CARD_MARGIN_X,
            area.height - CARD_MARGIN_TOP,
        );
        let content = Rect::new(
            card.x + 1 + CARD_PADDING_X,
            card.y + 1,
            width,
            card.height - CARD_BORDER_ROWS,
        );
        let detail_rows = content.height - CARD_FIXED_CONTENT_ROWS;

        Some(Self {
            card,
            header: Rect::new(content.x, content.y, content.width, 1),
            title: Rect::new(
                content.x,
                content.y + 1,
                content.width.saturating_sub(CHEVRON_COLUMNS),
                1,
            ),
            chevron: Rect::new(content.right() - 1, content.y + 1, 1, 1),
            detail: Rect::new(content.x, content.y + 2, content.width, detail_rows),
            footer: Rect::new(content.x, content.bottom() - 1, content.width, 1),
        })
    }

    /// The tappable title-and-chevron row.
    #[must_use]
    pub fn toggle_area(&self) -> Rect {
        self.title.union(self.chevron)
    }
}

// ============================================================================
// CardCell
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Resize {
    expanding: bool,
    transition: Transition,
}

/// Row renderer and expansion coordinator for one card.
///
/// Cells are stateless between configurations: [`configure`](Self::configure)
/// overwrites everything a previous row left behind.
#[derive(Debug)]
pub struct CardCell {
    id: Option<CellId>,
    heading: String,
    title: String,
    description: String,
    footer: String,
    numbers: Vec<String>,
    control: ExpandControl,
    collapsed_height_active: bool,
    detail_opacity: f32,
    resize: Option<Resize>,
    host: Option<HostLink>,
    listener: Option<UnboundedSender<CardEvent>>,
}

impl CardCell {
    /// Creates an unconfigured cell whose transitions last `duration` each.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            id: None,
            heading: String::new(),
            title: String::new(),
            description: String::new(),
            footer: String::new(),
            numbers: Vec::new(),
            control: ExpandControl::new(false, duration),
            collapsed_height_active: true,
            detail_opacity: 0.0,
            resize: None,
            host: None,
            listener: None,
        }
    }

    /// Binds the cell to `model` under identity `id` without animating.
    ///
    /// Any in-flight transition is abandoned without an event. The caller
    /// hands out a fresh `id` per binding, so events reported under an
    /// earlier identity are recognisably stale.
    pub fn configure(&mut self, id: CellId, model: &CellModel) {
        if self.interrupt() {
            debug!(previous = ?self.id, next = ?id, "configure abandoned an in-flight toggle");
        }

        self.id = Some(id);

        self.heading.clone_from(&model.heading);
        self.title.clone_from(&model.title);
        self.description.clone_from(&model.description);
        self.footer.clone_from(&model.footer);
        self.numbers.clear();
        if model.has_numbers() {
            self.numbers.extend_from_slice(model.numbers());
        }

        self.settle_at(model.is_expanded);
    }

    // ------------------------------------------------------------------------
    // Host and listener wiring
    // ------------------------------------------------------------------------

    /// Connects the cell to a live list.
    pub fn attach(&mut self, host: HostLink) {
        self.host = Some(host);
    }

    /// Disconnects the cell from its list.
    pub fn detach(&mut self) {
        self.host = None;
    }

    /// Whether the cell can reach a live list.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.host_handle().is_some()
    }

    /// Registers the listener for settled expansion changes.
    pub fn subscribe(&mut self, listener: UnboundedSender<CardEvent>) {
        self.listener = Some(listener);
    }

    /// Removes the listener.
    pub fn unsubscribe(&mut self) {
        self.listener = None;
    }

    fn host_handle(&self) -> Option<SharedRowUpdates> {
        self.host.as_ref().and_then(HostLink::upgrade)
    }

    // ------------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------------

    /// Starts a toggle from direct user interaction.
    ///
    /// A silent no-op when the cell is detached from a live list or any phase
    /// of a previous toggle is still running. Returns whether a toggle started.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if !self.is_attached() {
            debug!(cell = ?self.id, "toggle ignored: cell is not attached to a list");
            return false;
        }
        if self.resize.is_some() {
            debug!(
                cell = ?self.id,
                state = ?self.control.state(),
                "toggle ignored: detail area is still resizing"
            );
            return false;
        }
        let started = self.control.toggle(now);
        if started {
            debug!(cell = ?self.id, target = self.is_expanded(), "toggle started");
        }
        started
    }

    /// Advances both transition phases to `now`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(expanded) = self.control.tick(now) {
            match self.host_handle() {
                Some(host) => self.begin_resize(expanded, &host, now),
                None => {
                    debug!(cell = ?self.id, "host vanished before resize; reverting toggle");
                    self.settle_at(!expanded);
                    return;
                }
            }
        }

        let Some(resize) = self.resize else {
            return;
        };
        let Some(host) = self.host_handle() else {
            debug!(cell = ?self.id, "host vanished during resize; reverting toggle");
            self.cancel_transitions();
            return;
        };
        let row = self.id.map(|id| id.row);

        if resize.transition.is_complete(now) {
            self.resize = None;
            self.detail_opacity = opacity_for(resize.expanding);
            if let Some(row) = row {
                host.borrow_mut().invalidate_row(row);
            }
            self.notify(resize.expanding);
        } else {
            let (from, to) = if resize.expanding { (0.0, 1.0) } else { (1.0, 0.0) };
            self.detail_opacity = lerp(from, to, resize.transition.eased(now));
            if let Some(row) = row {
                host.borrow_mut().invalidate_row(row);
            }
        }
    }

    /// Abandons any in-flight phase, restoring the pre-toggle state.
    ///
    /// Returns whether anything was interrupted. No event is reported.
    pub fn interrupt(&mut self) -> bool {
        let running = self.is_animating();
        self.cancel_transitions();
        running
    }

    fn begin_resize(&mut self, expanded: bool, host: &SharedRowUpdates, now: Instant) {
        let mut updates = host.borrow_mut();
        updates.begin_updates();

        self.collapsed_height_active = !expanded;
        self.resize = Some(Resize {
            expanding: expanded,
            transition: Transition::start(now, self.control.duration()),
        });
        if let Some(id) = self.id {
            updates.invalidate_row(id.row);
        }

        updates.end_updates();
    }

    fn cancel_transitions(&mut self) {
        self.control.interrupt();
        if let Some(resize) = self.resize.take() {
            self.settle_at(!resize.expanding);
        }
    }

    fn settle_at(&mut self, expanded: bool) {
        self.resize = None;
        self.control.set_expanded(expanded, false, Instant::now());
        self.collapsed_height_active = !expanded;
        self.detail_opacity = opacity_for(expanded);
    }

    fn notify(&mut self, expanded: bool) {
        let Some(cell) = self.id else {
            return;
        };
        info!(row = cell.row, expanded, "card expansion settled");

        let Some(listener) = &self.listener else {
            return;
        };
        if listener
            .send(CardEvent::ExpansionChanged { cell, expanded })
            .is_err()
        {
            debug!(row = cell.row, "listener dropped; unsubscribing");
            self.listener = None;
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Identity of the current binding.
    #[must_use]
    pub const fn id(&self) -> Option<CellId> {
        self.id
    }

    /// The expanded flag as displayed by the control.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.control.is_expanded()
    }

    /// Whether either phase of a toggle is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.control.is_animating() || self.resize.is_some()
    }

    /// Whether the constraint forcing the detail area to zero height is on.
    #[must_use]
    pub const fn collapsed_height_active(&self) -> bool {
        self.collapsed_height_active
    }

    /// Current detail area opacity.
    #[must_use]
    pub const fn detail_opacity(&self) -> f32 {
        self.detail_opacity
    }

    /// Bound title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    // ------------------------------------------------------------------------
    // Measurement
    // ------------------------------------------------------------------------

    /// Rows the detail area needs when fully shown.
    #[must_use]
    pub fn detail_natural_height(&self, width: u16) -> u16 {
        natural_detail_height(&self.description, &self.numbers, width)
    }

    /// Rows the detail area occupies at `now`.
    #[must_use]
    pub fn detail_height(&self, width: u16, now: Instant) -> u16 {
        let natural = self.detail_natural_height(width);
        match self.resize {
            Some(resize) => {
                let natural = f32::from(natural);
                let (from, to) = if resize.expanding {
                    (0.0, natural)
                } else {
                    (natural, 0.0)
                };
                lerp(from, to, resize.transition.eased(now)).round() as u16
            }
            None if self.collapsed_height_active() => 0,
            None => natural,
        }
    }

    /// Full row height for a row `row_width` columns wide at `now`.
    #[must_use]
    pub fn row_height(&self, row_width: u16, now: Instant) -> u16 {
        COLLAPSED_ROW_HEIGHT.saturating_add(self.detail_height(content_width(row_width), now))
    }

    /// Row height of a settled card for `model`, used for rows without a live cell.
    #[must_use]
    pub fn measure_model(model: &CellModel, row_width: u16) -> u16 {
        if !model.is_expanded {
            return COLLAPSED_ROW_HEIGHT;
        }
        let detail = natural_detail_height(
            &model.description,
            model.numbers(),
            content_width(row_width),
        );
        COLLAPSED_ROW_HEIGHT.saturating_add(detail)
    }

    /// Lines of the detail area: spacer, wrapped description, number grid.
    #[must_use]
    pub fn detail_lines(&self, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        let opacity = self.detail_opacity();
        let style = theme.detail_style(opacity);
        let mut lines = vec![Line::default(); usize::from(DETAIL_SPACER_ROWS)];
        lines.extend(
            wrap_text(&self.description, width)
                .into_iter()
                .map(|text| Line::styled(text, style)),
        );
        lines.extend(NumberGrid::new(&self.numbers).to_lines(width, theme, opacity));
        lines
    }
}

impl Reusable for CardCell {
    fn prepare_for_reuse(&mut self) {
        self.interrupt();
        self.unsubscribe();
        self.detach();
        self.id = None;
        self.heading.clear();
        self.title.clear();
        self.description.clear();
        self.footer.clear();
        self.numbers.clear();
        self.settle_at(false);
    }
}

const fn opacity_for(expanded: bool) -> f32 {
    if expanded { 1.0 } else { 0.0 }
}

// ============================================================================
// CardCellWidget
// ============================================================================

/// Draws a [`CardCell`] into a row whose height came from
/// [`CardCell::row_height`].
#[derive(Debug, Clone, Copy)]
pub struct CardCellWidget<'a> {
    cell: &'a CardCell,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> CardCellWidget<'a> {
    /// Creates a widget for `cell`.
    #[must_use]
    pub const fn new(cell: &'a CardCell, theme: &'a Theme) -> Self {
        Self {
            cell,
            theme,
            focused: false,
        }
    }

    /// Highlights the card border.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for CardCellWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(geometry) = CardGeometry::new(area) else {
            return;
        };
        let cell = self.cell;
        let theme = self.theme;

        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style(self.focused))
            .style(theme.card_style())
            .render(geometry.card, buf);

        HeaderView::new(&cell.heading, theme).render(geometry.header, buf);

        buf.set_stringn(
            geometry.title.x,
            geometry.title.y,
            truncate_to_width(cell.title(), geometry.title.width),
            usize::from(geometry.title.width),
            theme.label_style(),
        );
        cell.control
            .chevron(theme.chevron_style())
            .render(geometry.chevron, buf);

        let detail = geometry.detail;
        for (offset, line) in cell
            .detail_lines(detail.width, theme)
            .iter()
            .take(usize::from(detail.height))
            .enumerate()
        {
            let y = detail.y + offset as u16;
            buf.set_line(detail.x, y, line, detail.width);
        }

        buf.set_stringn(
            geometry.footer.x,
            geometry.footer.y,
            truncate_to_width(&cell.footer, geometry.footer.width),
            usize::from(geometry.footer.width),
            theme.label_style(),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CellModelMother, buffer_region, buffer_to_string};
    use crate::widgets::row_updates::RowUpdates;
    use rstest::{fixture, rstest};
    use std::rc::Rc;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    const DURATION: Duration = Duration::from_millis(300);
    const ROW_WIDTH: u16 = 60;

    struct Harness {
        cell: CardCell,
        host: SharedRowUpdates,
        events: UnboundedReceiver<CardEvent>,
        t0: Instant,
    }

    impl Harness {
        fn at(&self, millis: u64) -> Instant {
            self.t0 + Duration::from_millis(millis)
        }

        fn drain(&mut self) -> Vec<CardEvent> {
            let mut events = Vec::new();
            while let Ok(event) = self.events.try_recv() {
                events.push(event);
            }
            events
        }

        fn row_height(&self, millis: u64) -> u16 {
            self.cell.row_height(ROW_WIDTH, self.at(millis))
        }
    }

    #[fixture]
    fn harness() -> Harness {
        let host = RowUpdates::shared();
        let (tx, events) = mpsc::unbounded_channel();
        let mut cell = CardCell::new(DURATION);
        cell.configure(CellId::new(0, 1), &CellModelMother::first_row());
        cell.attach(Rc::downgrade(&host));
        cell.subscribe(tx);
        Harness {
            cell,
            host,
            events,
            t0: Instant::now(),
        }
    }

    /// Toggles at t0 and runs both phases to completion.
    fn run_toggle(h: &mut Harness, start: u64) {
        assert!(h.cell.toggle(h.at(start)));
        h.cell.tick(h.at(start + 300));
        h.cell.tick(h.at(start + 600));
    }

    #[rstest]
    #[case::collapsed(false)]
    #[case::expanded(true)]
    fn test_configure_reflects_model_without_animation(#[case] expanded: bool) {
        let mut cell = CardCell::new(DURATION);
        cell.configure(CellId::new(3, 1), &CellModelMother::first_row().expanded(expanded));

        assert_eq!(cell.is_expanded(), expanded);
        assert!(!cell.is_animating());
        assert_eq!(cell.collapsed_height_active(), !expanded);
        assert_eq!(cell.detail_opacity(), opacity_for(expanded));
    }

    #[rstest]
    fn test_collapsed_card_has_no_detail_rows(harness: Harness) {
        assert_eq!(harness.cell.detail_height(40, harness.t0), 0);
        assert_eq!(harness.row_height(0), COLLAPSED_ROW_HEIGHT);
    }

    #[rstest]
    fn test_toggle_expands_and_reports_once(mut harness: Harness) {
        let natural = harness.cell.detail_natural_height(content_width(ROW_WIDTH));
        assert_eq!(natural, 2, "spacer + one description line");

        assert!(harness.cell.toggle(harness.t0));
        harness.cell.tick(harness.at(150));
        assert_eq!(harness.row_height(150), COLLAPSED_ROW_HEIGHT, "rotating first");
        assert!(harness.drain().is_empty());

        // Rotation settles; the resize phase starts inside a host transaction.
        harness.cell.tick(harness.at(300));
        assert_eq!(harness.host.borrow().transactions(), 1);
        assert!(!harness.cell.collapsed_height_active());
        assert!(harness.drain().is_empty(), "no event before the resize settles");

        harness.cell.tick(harness.at(600));
        assert_eq!(harness.row_height(600), COLLAPSED_ROW_HEIGHT + natural);
        assert_eq!(harness.cell.detail_opacity(), 1.0);

        let id = harness.cell.id().expect("configured");
        assert_eq!(
            harness.drain(),
            [CardEvent::ExpansionChanged {
                cell: id,
                expanded: true
            }]
        );

        harness.cell.tick(harness.at(900));
        assert!(harness.drain().is_empty(), "reported exactly once");
    }

    #[rstest]
    fn test_toggle_twice_reports_true_then_false(mut harness: Harness) {
        run_toggle(&mut harness, 0);
        run_toggle(&mut harness, 700);

        let values: Vec<bool> = harness
            .drain()
            .into_iter()
            .map(|CardEvent::ExpansionChanged { expanded, .. }| expanded)
            .collect();
        insta::assert_debug_snapshot!(values, @r"
        [
            true,
            false,
        ]
        ");
        assert!(!harness.cell.is_expanded());
        assert_eq!(harness.row_height(1_400), COLLAPSED_ROW_HEIGHT);
    }

    #[rstest]
    fn test_detail_height_grows_during_resize(mut harness: Harness) {
        harness.cell.toggle(harness.t0);
        harness.cell.tick(harness.at(300));

        let natural = harness.cell.detail_natural_height(content_width(ROW_WIDTH));
        let mid = harness.cell.detail_height(content_width(ROW_WIDTH), harness.at(450));
        assert!(mid <= natural);
        harness.cell.tick(harness.at(450));
        let opacity = harness.cell.detail_opacity();
        assert!(opacity > 0.0 && opacity < 1.0, "fading in, got {opacity}");
    }

    #[rstest]
    #[case::during_rotation(100)]
    #[case::during_resize(450)]
    fn test_interrupt_reverts_without_event(mut harness: Harness, #[case] at: u64) {
        harness.cell.toggle(harness.t0);
        harness.cell.tick(harness.at(at.min(300)));
        harness.cell.tick(harness.at(at));

        assert!(harness.cell.interrupt());
        assert!(!harness.cell.is_expanded());
        assert!(harness.cell.collapsed_height_active());
        assert_eq!(harness.cell.detail_opacity(), 0.0);

        harness.cell.tick(harness.at(1_000));
        assert!(harness.drain().is_empty());
        assert_eq!(harness.row_height(1_000), COLLAPSED_ROW_HEIGHT);
    }

    #[rstest]
    fn test_reentrant_toggle_ignored_in_both_phases(mut harness: Harness) {
        assert!(harness.cell.toggle(harness.t0));
        assert!(!harness.cell.toggle(harness.at(100)));
        harness.cell.tick(harness.at(300));
        assert!(!harness.cell.toggle(harness.at(400)), "resize still running");
        harness.cell.tick(harness.at(600));

        assert_eq!(harness.drain().len(), 1);
        assert!(harness.cell.is_expanded());
    }

    #[test]
    fn test_toggle_on_detached_cell_is_noop() {
        let mut cell = CardCell::new(DURATION);
        cell.configure(CellId::new(0, 1), &CellModelMother::first_row());
        let t0 = Instant::now();

        assert!(!cell.toggle(t0));
        assert!(!cell.is_animating());
        assert!(!cell.is_expanded());
    }

    #[rstest]
    fn test_toggle_after_host_dropped_is_noop(mut harness: Harness) {
        // Replacing the only strong handle tears down the original host.
        harness.host = RowUpdates::shared();

        assert!(!harness.cell.is_attached());
        assert!(!harness.cell.toggle(harness.t0));
    }

    #[rstest]
    fn test_host_dropped_mid_rotation_reverts(mut harness: Harness) {
        harness.cell.toggle(harness.t0);
        harness.host = RowUpdates::shared();

        harness.cell.tick(harness.at(300));
        assert!(!harness.cell.is_expanded());
        assert!(!harness.cell.is_animating());
        assert!(harness.drain().is_empty());
    }

    #[rstest]
    fn test_reconfigure_mid_animation_drops_pending_event(mut harness: Harness) {
        let old_id = harness.cell.id();
        harness.cell.toggle(harness.t0);
        harness.cell.tick(harness.at(300));

        harness
            .cell
            .configure(CellId::new(5, 2), &CellModelMother::with_numbers(6, 4));
        assert_ne!(harness.cell.id(), old_id);
        assert_eq!(harness.cell.title(), "Title 6");
        assert!(!harness.cell.is_animating());

        harness.cell.tick(harness.at(600));
        assert!(harness.drain().is_empty());
        assert!(!harness.cell.is_expanded());
    }

    #[test]
    fn test_configure_alone_overwrites_previous_binding() {
        let mut cell = CardCell::new(DURATION);
        let width = content_width(ROW_WIDTH);
        cell.configure(
            CellId::new(2, 1),
            &CellModelMother::long(3)
                .with_numbers((0..12).map(|i| i.to_string()))
                .expanded(true),
        );
        assert!(cell.is_expanded());
        let rich_height = cell.detail_natural_height(width);

        let plain = CellModelMother::row(7);
        cell.configure(CellId::new(6, 2), &plain);

        let description_rows = wrap_text(&plain.description, width).len() as u16;
        assert_eq!(
            cell.detail_natural_height(width),
            DETAIL_SPACER_ROWS + description_rows
        );
        assert!(cell.detail_natural_height(width) < rich_height);
        assert!(!cell.is_expanded());
        assert!(cell.collapsed_height_active());
        assert_eq!(cell.detail_opacity(), 0.0);
        assert_eq!(cell.id(), Some(CellId::new(6, 2)));
        assert_eq!(cell.title(), "Title 7");
        assert_eq!(cell.row_height(ROW_WIDTH, Instant::now()), COLLAPSED_ROW_HEIGHT);
    }

    #[rstest]
    fn test_prepare_for_reuse_clears_everything(mut harness: Harness) {
        run_toggle(&mut harness, 0);
        harness.drain();

        harness.cell.prepare_for_reuse();
        assert!(harness.cell.id().is_none());
        assert!(!harness.cell.is_attached());
        assert!(!harness.cell.is_expanded());
        assert!(harness.cell.title().is_empty());
        assert_eq!(harness.cell.detail_natural_height(40), DETAIL_SPACER_ROWS);
    }

    #[test]
    fn test_measure_model_matches_settled_cell() {
        let model = CellModelMother::with_numbers(4, 10).expanded(true);
        let mut cell = CardCell::new(DURATION);
        cell.configure(CellId::new(3, 1), &model);
        let now = Instant::now();

        assert_eq!(
            CardCell::measure_model(&model, ROW_WIDTH),
            cell.row_height(ROW_WIDTH, now)
        );
        assert_eq!(
            CardCell::measure_model(&model.clone().expanded(false), ROW_WIDTH),
            COLLAPSED_ROW_HEIGHT
        );
    }

    #[test]
    fn test_geometry_requires_room_for_collapsed_card() {
        assert!(CardGeometry::new(Rect::new(0, 0, 40, COLLAPSED_ROW_HEIGHT - 1)).is_none());
        assert!(CardGeometry::new(Rect::new(0, 0, 10, COLLAPSED_ROW_HEIGHT)).is_none());

        let geometry = CardGeometry::new(Rect::new(0, 0, 40, 9)).expect("fits");
        assert_eq!(geometry.detail.height, 2);
        assert_eq!(geometry.footer.y, 7);
        assert_eq!(geometry.chevron, Rect::new(34, 3, 1, 1));
    }

    #[test]
    fn test_render_collapsed_shows_title_and_footer_only() {
        let theme = Theme::default();
        let mut cell = CardCell::new(DURATION);
        cell.configure(CellId::new(0, 1), &CellModelMother::first_row());

        let area = Rect::new(0, 0, 40, COLLAPSED_ROW_HEIGHT);
        let mut buf = Buffer::empty(area);
        CardCellWidget::new(&cell, &theme).render(area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Section 1"));
        assert!(content.contains("Title 1"));
        assert!(content.contains("▼"));
        assert!(content.contains("Footer text for item 1."));
        assert!(!content.contains("Short description"));
    }

    #[test]
    fn test_render_expanded_snapshot() {
        let theme = Theme::default();
        let mut cell = CardCell::new(DURATION);
        cell.configure(CellId::new(0, 1), &CellModelMother::first_row().expanded(true));

        let now = Instant::now();
        let height = cell.row_height(44, now);
        let area = Rect::new(0, 0, 44, height);
        let mut buf = Buffer::empty(area);
        CardCellWidget::new(&cell, &theme).render(area, &mut buf);

        let card = Rect::new(2, 1, 40, height - 1);
        insta::assert_snapshot!(buffer_region(&buf, card), @r"
        ╭──────────────────────────────────────╮
        │  Section 1                           │
        │  Title 1                          ▲  │
        │                                      │
        │  Short description for item 1.       │
        │                                      │
        │  Footer text for item 1.             │
        ╰──────────────────────────────────────╯
        ");
    }
}
