use super::easing::Curve;
use crate::geom::lerp;
use std::time::{Duration, Instant};

/// A scalar tween driven by frame timestamps.
///
/// Time is always passed in, never read from the system clock, so animations
/// are deterministic under test.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Animation {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    curve: Curve,
}

impl Animation {
    pub fn new(from: f32, to: f32, started_at: Instant, duration: Duration, curve: Curve) -> Self {
        Animation {
            from,
            to,
            started_at,
            duration,
            curve,
        }
    }

    /// Linear time fraction in `[0, 1]`.
    pub fn fraction(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        if self.is_finished(now) {
            return self.to;
        }

        lerp(self.from, self.to, self.curve.apply(self.fraction(now)))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.fraction(now) >= 1.0
    }
}
