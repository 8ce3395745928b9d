//! Expand control: the chevron affordance that drives a card's expansion.
//!
//! The control owns the expanded flag and the chevron rotation. A toggle starts
//! a timed rotation; [`ExpandControl::tick`] reports the settled value exactly
//! once when the rotation completes. An interrupted rotation reverts to the
//! value held before the toggle and reports nothing.
//!
//! ```text
//!            toggle                 tick (complete)
//! Collapsed ────────▶ Expanding ──────────────────▶ Expanded
//!     ▲                   │ interrupt                   │
//!     └───────────────────┘                             │ toggle
//!     ▲              tick (complete)                    ▼
//!     └─────────────────────────────────────────── Collapsing
//! ```

use std::f32::consts::FRAC_PI_4;
use std::time::{Duration, Instant};

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use tracing::debug;

use crate::animation::{Transition, lerp};
use crate::constants::{CHEVRON_EXPANDED_ANGLE, CHEVRON_GLYPHS};

// ============================================================================
// ExpandState
// ============================================================================

/// Expansion state of a control. `Expanding` and `Collapsing` are transient
/// and can only be entered through an animated change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandState {
    /// Settled, detail hidden.
    Collapsed,
    /// Rotating toward expanded.
    Expanding,
    /// Rotating toward collapsed.
    Collapsing,
    /// Settled, detail shown.
    Expanded,
}

impl ExpandState {
    /// The settled state for a boolean.
    #[must_use]
    pub const fn settled(expanded: bool) -> Self {
        if expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Expanding | Self::Collapsing)
    }

    /// The value this state is heading to (or holds, when settled).
    #[must_use]
    pub const fn target(self) -> bool {
        matches!(self, Self::Expanding | Self::Expanded)
    }

    /// The value held before the current transition began.
    #[must_use]
    pub const fn origin(self) -> bool {
        matches!(self, Self::Collapsing | Self::Expanded)
    }
}

// ============================================================================
// ExpandControl
// ============================================================================

/// Expanded flag plus animated chevron.
#[derive(Debug, Clone)]
pub struct ExpandControl {
    state: ExpandState,
    transition: Option<Transition>,
    duration: Duration,
    rotation: f32,
}

impl ExpandControl {
    /// Creates a settled control.
    #[must_use]
    pub fn new(expanded: bool, duration: Duration) -> Self {
        Self {
            state: ExpandState::settled(expanded),
            transition: None,
            duration,
            rotation: angle_for(expanded),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ExpandState {
        self.state
    }

    /// The displayed boolean: the target value while a transition runs.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.state.target()
    }

    /// Whether a rotation is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Current chevron rotation in radians.
    #[must_use]
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Duration of one rotation.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Sets the expanded flag.
    ///
    /// Without animation the control settles immediately, cancelling any
    /// in-flight rotation without reporting it. With animation a rotation
    /// starts, unless one is already running or the value is unchanged.
    ///
    /// Returns whether the request was applied.
    pub fn set_expanded(&mut self, value: bool, animated: bool, now: Instant) -> bool {
        if !animated {
            if self.transition.take().is_some() {
                debug!(value, "non-animated set cancelled an in-flight rotation");
            }
            self.state = ExpandState::settled(value);
            self.rotation = angle_for(value);
            return true;
        }

        if self.state.is_transient() {
            debug!(value, state = ?self.state, "ignoring re-entrant expand request");
            return false;
        }
        if value == self.state.target() {
            return false;
        }

        self.state = if value {
            ExpandState::Expanding
        } else {
            ExpandState::Collapsing
        };
        self.transition = Some(Transition::start(now, self.duration));
        self.rotation = angle_for(self.state.origin());
        true
    }

    /// Flips the flag with animation, as a direct user interaction does.
    ///
    /// Ignored while a rotation is in flight.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.state.is_transient() {
            debug!(state = ?self.state, "ignoring toggle during rotation");
            return false;
        }
        self.set_expanded(!self.is_expanded(), true, now)
    }

    /// Advances the rotation to `now`.
    ///
    /// Returns the settled value exactly once, on the tick that completes the
    /// rotation.
    pub fn tick(&mut self, now: Instant) -> Option<bool> {
        let transition = self.transition?;

        if transition.is_complete(now) {
            let value = self.state.target();
            self.transition = None;
            self.state = ExpandState::settled(value);
            self.rotation = angle_for(value);
            return Some(value);
        }

        self.rotation = lerp(
            angle_for(self.state.origin()),
            angle_for(self.state.target()),
            transition.eased(now),
        );
        None
    }

    /// Abandons an in-flight rotation, reverting to the pre-toggle value.
    ///
    /// Returns whether anything was interrupted.
    pub fn interrupt(&mut self) -> bool {
        if self.transition.take().is_none() {
            return false;
        }
        let reverted = self.state.origin();
        debug!(reverted, "rotation interrupted");
        self.state = ExpandState::settled(reverted);
        self.rotation = angle_for(reverted);
        true
    }

    /// Chevron widget for the current rotation.
    #[must_use]
    pub const fn chevron(&self, style: Style) -> Chevron {
        Chevron {
            rotation: self.rotation(),
            style,
        }
    }
}

const fn angle_for(expanded: bool) -> f32 {
    if expanded { CHEVRON_EXPANDED_ANGLE } else { 0.0 }
}

// ============================================================================
// Chevron
// ============================================================================

/// Single-cell chevron drawn at the nearest eighth turn of its rotation.
#[derive(Debug, Clone, Copy)]
pub struct Chevron {
    rotation: f32,
    style: Style,
}

impl Chevron {
    /// Glyph for the current rotation.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        let step = (self.rotation / FRAC_PI_4).round().max(0.0) as usize;
        CHEVRON_GLYPHS[step.min(CHEVRON_GLYPHS.len() - 1)]
    }
}

impl Widget for Chevron {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_string(area.x, area.y, self.glyph(), self.style);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const DURATION: Duration = Duration::from_millis(300);

    #[fixture]
    fn t0() -> Instant {
        Instant::now()
    }

    fn ms(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[rstest]
    #[case::collapsed(false, ExpandState::Collapsed)]
    #[case::expanded(true, ExpandState::Expanded)]
    fn test_initial_state_follows_model(#[case] expanded: bool, #[case] state: ExpandState) {
        let control = ExpandControl::new(expanded, DURATION);
        assert_eq!(control.state(), state);
        assert_eq!(control.is_expanded(), expanded);
        assert!(!control.is_animating());
    }

    #[rstest]
    fn test_toggle_settles_once_with_new_value(t0: Instant) {
        let mut control = ExpandControl::new(false, DURATION);

        assert!(control.toggle(t0));
        assert_eq!(control.state(), ExpandState::Expanding);
        assert!(control.is_expanded());

        assert_eq!(control.tick(ms(t0, 150)), None);
        assert_eq!(control.tick(ms(t0, 300)), Some(true));
        assert_eq!(control.state(), ExpandState::Expanded);

        // Completion is reported once only.
        assert_eq!(control.tick(ms(t0, 400)), None);
        assert_eq!(control.tick(ms(t0, 1_000)), None);
    }

    #[rstest]
    fn test_toggle_twice_round_trips(t0: Instant) {
        let mut control = ExpandControl::new(false, DURATION);
        let mut settled = Vec::new();

        control.toggle(t0);
        settled.extend(control.tick(ms(t0, 300)));
        control.toggle(ms(t0, 310));
        settled.extend(control.tick(ms(t0, 610)));

        assert_eq!(settled, [true, false]);
        assert!(!control.is_expanded());
        assert_eq!(control.rotation(), 0.0);
    }

    #[rstest]
    fn test_interrupt_reverts_without_settling(t0: Instant) {
        let mut control = ExpandControl::new(false, DURATION);
        control.toggle(t0);
        control.tick(ms(t0, 100));

        assert!(control.interrupt());
        assert_eq!(control.state(), ExpandState::Collapsed);
        assert!(!control.is_expanded());
        assert_eq!(control.rotation(), 0.0);
        assert_eq!(control.tick(ms(t0, 300)), None);
    }

    #[rstest]
    fn test_interrupt_collapsing_reverts_to_expanded(t0: Instant) {
        let mut control = ExpandControl::new(true, DURATION);
        control.toggle(t0);
        assert_eq!(control.state(), ExpandState::Collapsing);

        assert!(control.interrupt());
        assert_eq!(control.state(), ExpandState::Expanded);
        assert_eq!(control.rotation(), CHEVRON_EXPANDED_ANGLE);
    }

    #[test]
    fn test_interrupt_when_settled_is_noop() {
        let mut control = ExpandControl::new(true, DURATION);
        assert!(!control.interrupt());
        assert!(control.is_expanded());
    }

    #[rstest]
    fn test_reentrant_toggle_is_ignored(t0: Instant) {
        let mut control = ExpandControl::new(false, DURATION);
        assert!(control.toggle(t0));
        assert!(!control.toggle(ms(t0, 50)));
        assert!(!control.set_expanded(false, true, ms(t0, 60)));

        assert_eq!(control.state(), ExpandState::Expanding);
        assert_eq!(control.tick(ms(t0, 300)), Some(true));
    }

    #[rstest]
    fn test_non_animated_set_never_settles(t0: Instant) {
        let mut control = ExpandControl::new(false, DURATION);
        assert!(control.set_expanded(true, false, t0));
        assert_eq!(control.state(), ExpandState::Expanded);
        assert_eq!(control.rotation(), CHEVRON_EXPANDED_ANGLE);
        assert!(!control.is_animating());
        assert_eq!(control.tick(ms(t0, 500)), None);
    }

    #[rstest]
    fn test_non_animated_set_cancels_rotation(t0: Instant) {
        let mut control = ExpandControl::new(false, DURATION);
        control.toggle(t0);
        control.set_expanded(false, false, ms(t0, 100));

        assert_eq!(control.state(), ExpandState::Collapsed);
        assert_eq!(control.tick(ms(t0, 300)), None);
    }

    #[rstest]
    fn test_animated_set_to_current_value_is_noop(t0: Instant) {
        let mut control = ExpandControl::new(true, DURATION);
        assert!(!control.set_expanded(true, true, t0));
        assert!(!control.is_animating());
    }

    #[rstest]
    fn test_rotation_interpolates_toward_half_turn(t0: Instant) {
        let mut control = ExpandControl::new(false, DURATION);
        control.toggle(t0);

        control.tick(ms(t0, 150));
        let halfway = control.rotation();
        assert!((halfway - CHEVRON_EXPANDED_ANGLE / 2.0).abs() < 0.01);

        control.tick(ms(t0, 250));
        assert!(control.rotation() > halfway);
        assert!(control.rotation() < CHEVRON_EXPANDED_ANGLE);
    }

    #[rstest]
    #[case::down(0.0, "▼")]
    #[case::eighth(FRAC_PI_4, "◣")]
    #[case::quarter(2.0 * FRAC_PI_4, "◀")]
    #[case::three_eighths(3.0 * FRAC_PI_4, "◤")]
    #[case::up(CHEVRON_EXPANDED_ANGLE, "▲")]
    fn test_chevron_glyph(#[case] rotation: f32, #[case] glyph: &str) {
        let chevron = Chevron {
            rotation,
            style: Style::default(),
        };
        assert_eq!(chevron.glyph(), glyph);
    }

    #[test]
    fn test_chevron_renders_into_buffer() {
        let control = ExpandControl::new(true, DURATION);
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        control.chevron(Style::default()).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "▲");
    }
}
