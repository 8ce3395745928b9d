//! Timed transitions.
//!
//! A [`Transition`] only records when it started and how long it lasts; callers
//! sample it with the current [`Instant`], which keeps every animation
//! deterministic under test.

use std::time::{Duration, Instant};

/// A running animation between two settled states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    started_at: Instant,
    duration: Duration,
}

impl Transition {
    /// Starts a transition at `now`.
    #[must_use]
    pub const fn start(now: Instant, duration: Duration) -> Self {
        Self {
            started_at: now,
            duration,
        }
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Progress shaped by an ease-in-out curve.
    #[must_use]
    pub fn eased(&self, now: Instant) -> f32 {
        ease_in_out(self.progress(now))
    }

    /// Whether the full duration has elapsed.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// Cubic ease-in-out.
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
