//! Transition math and the animation state shared by the navigation stack
//! and its back-swipe.

pub mod animation;
pub mod easing;
pub mod slide;
pub mod state;

pub use self::animation::Animation;
pub use self::easing::Curve;
pub use self::slide::{slide_offset, TransitionContext, PEEK_DISTANCE};
pub use self::state::{InteractiveTransitionState, ProgressOwner};
