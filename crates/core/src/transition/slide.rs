//! Horizontal slide used for push and pop.
//!
//! `progress` measures the distance from the identity position: `1.0` is the
//! fully displaced edge of the transition, `0.0` is at rest. A push moves the
//! incoming screen in from the trailing edge while the outgoing one only backs
//! off by a fixed peek distance; a pop mirrors it.
//!
//! | context   | forward             | backward            |
//! |-----------|---------------------|---------------------|
//! | insertion | `progress × width`  | `progress × -peek`  |
//! | removal   | `progress × -peek`  | `progress × width`  |
//! | identity  | `0`                 | `0`                 |

/// Distance the covered screen backs off. A visual tuning constant,
/// independent of the container width.
pub const PEEK_DISTANCE: f32 = 100.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TransitionContext {
    /// The screen is appearing.
    Insertion,
    /// The screen is going away.
    Removal,
    /// The screen stays in place.
    Identity,
}

/// Horizontal offset of a screen taking part in a slide.
#[inline]
pub fn slide_offset(
    context: TransitionContext,
    forward: bool,
    progress: f32,
    width: f32,
    peek: f32,
) -> f32 {
    match (context, forward) {
        (TransitionContext::Insertion, true) | (TransitionContext::Removal, false) => {
            progress * width
        }
        (TransitionContext::Insertion, false) | (TransitionContext::Removal, true) => {
            progress * -peek
        }
        (TransitionContext::Identity, _) => 0.0,
    }
}
