//! Animation primitives: easing functions and wall-clock tweens.

use std::time::{Duration, Instant};

/// Standard easing functions.
///
/// Input `t` is clamped to `[0.0, 1.0]`. Output is the eased value.
pub mod easing {
    /// Linear easing (no acceleration).
    pub fn linear(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    /// Quadratic ease-in-out (slow start and end).
    pub fn ease_in_out_quad(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            2.0 * t * t
        } else {
            -1.0 + (4.0 - 2.0 * t) * t
        }
    }

    /// Cubic ease-out (slow end).
    pub fn ease_out_cubic(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let t1 = t - 1.0;
        t1 * t1 * t1 + 1.0
    }
}

/// Progress of a time-boxed animation, sampled against a caller clock.
///
/// Tweens never read the system clock themselves so that frame logic can
/// be driven with synthetic instants in tests.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    start: Instant,
    duration: Duration,
    easing: fn(f32) -> f32,
}

impl Tween {
    pub fn new(start: Instant, duration: Duration, easing: fn(f32) -> f32) -> Self {
        Self {
            start,
            duration,
            easing,
        }
    }

    /// Raw linear progress in `[0, 1]`.
    pub fn linear_progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        (self.easing)(self.linear_progress(now))
    }

    /// Interpolated value between `from` and `to`.
    pub fn value(&self, now: Instant, from: f32, to: f32) -> f32 {
        from + (to - from) * self.progress(now)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}
