//! Easing functions for animations

/// Ease-in-out cubic function
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease-out cubic function
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Linear interpolation (no easing)
#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Timing curve of an [`Animation`](super::Animation).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Curve {
    Linear,
    /// Used for declarative push/pop slides.
    EaseInOut,
    /// Used when a released swipe settles.
    EaseOut,
}

impl Curve {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => linear(t),
            Curve::EaseInOut => ease_in_out(t),
            Curve::EaseOut => ease_out_cubic(t),
        }
    }
}
