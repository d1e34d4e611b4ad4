//! Edge back-swipe recognition.
//!
//! A swipe may only start within a narrow strip along the leading edge of the
//! stack and only while there is something to pop. While the finger moves, the
//! coordinator owns the transition progress; once released it hands progress
//! to a short settle animation that ends either fully popped or back at rest.

use crate::geom::Rectangle;
use crate::gesture::{DragEvent, DragPhase};
use crate::settings::NavigationSettings;
use crate::transition::{Animation, Curve, InteractiveTransitionState, ProgressOwner};
use std::time::Instant;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    /// Settling towards `1.0`, the top screen will be popped.
    Committing,
    /// Settling back to `0.0`.
    Cancelling,
}

/// How a released swipe ended, reported once its settle animation is done.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Settlement {
    Committed,
    Cancelled,
}

/// Settle animation of a released swipe. It starts on the first frame that
/// follows the release.
#[derive(Debug, Clone)]
struct Settle {
    target: f32,
    animation: Option<Animation>,
}

/// Decides whether a released swipe pops the top screen.
pub fn should_commit(progress: f32, velocity: f32, settings: &NavigationSettings) -> bool {
    progress > settings.commit_progress || velocity > settings.commit_velocity
}

#[derive(Debug, Clone)]
pub struct GestureCoordinator {
    settings: NavigationSettings,
    phase: GesturePhase,
    last_x: i32,
    settle: Option<Settle>,
}

impl GestureCoordinator {
    pub fn new(settings: NavigationSettings) -> GestureCoordinator {
        GestureCoordinator {
            settings,
            phase: GesturePhase::Idle,
            last_x: 0,
            settle: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether a swipe is being tracked or settled.
    pub fn is_active(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    fn in_activation_zone(&self, drag: &DragEvent, bounds: &Rectangle) -> bool {
        bounds.includes(drag.start)
            && (drag.start.x - bounds.min.x) as f32 <= self.settings.edge_activation_width
    }

    /// Feeds one drag sample. `depth` is the number of pushed screens and
    /// `bounds` the area of the stack.
    ///
    /// Returns `true` when the sample belongs to a back-swipe.
    pub fn handle_drag(
        &mut self,
        drag: &DragEvent,
        depth: usize,
        bounds: &Rectangle,
        state: &mut InteractiveTransitionState,
    ) -> bool {
        match drag.phase {
            DragPhase::Began => {
                // A new touch sequence ends any tracking left by the previous one.
                if self.phase == GesturePhase::Dragging {
                    tracing::debug!(progress = state.progress(), "Back-swipe dropped by a new touch");
                    self.abort(state);
                }

                if matches!(self.phase, GesturePhase::Committing | GesturePhase::Cancelling)
                    || state.is_animating()
                    || depth == 0
                    || !self.in_activation_zone(drag, bounds)
                {
                    return false;
                }

                self.phase = GesturePhase::Dragging;
                self.last_x = drag.start.x;
                state.begin_interaction();
                tracing::debug!(x = drag.start.x, depth, "Back-swipe started");
                true
            }
            DragPhase::Moved => {
                if self.phase != GesturePhase::Dragging {
                    return false;
                }

                let width = bounds.width() as f32;
                let delta = (self.last_x - drag.location.x) as f32;
                self.last_x = drag.location.x;

                if width > 0.0 {
                    let candidate = state.progress() - delta / width;
                    if candidate > 0.0 && candidate < 1.0 {
                        state.drive(ProgressOwner::Gesture, candidate);
                    }
                }
                true
            }
            DragPhase::Ended => {
                if self.phase != GesturePhase::Dragging {
                    return false;
                }

                let commit = should_commit(state.progress(), drag.velocity, &self.settings);
                tracing::debug!(
                    progress = state.progress(),
                    velocity = drag.velocity,
                    commit,
                    "Back-swipe released"
                );
                self.release(commit, state);
                true
            }
            DragPhase::Cancelled => {
                if self.phase != GesturePhase::Dragging {
                    return false;
                }

                tracing::debug!(progress = state.progress(), "Back-swipe cancelled by the platform");
                self.release(false, state);
                true
            }
        }
    }

    fn release(&mut self, commit: bool, state: &mut InteractiveTransitionState) {
        let (phase, target) = if commit {
            (GesturePhase::Committing, 1.0)
        } else {
            (GesturePhase::Cancelling, 0.0)
        };

        self.phase = phase;
        self.settle = Some(Settle {
            target,
            animation: None,
        });
        state.begin_completion();
    }

    /// Advances the settle animation to `now`.
    ///
    /// Returns the outcome on the frame the animation finishes, after putting
    /// the coordinator and `state` back at rest.
    pub fn tick(
        &mut self,
        state: &mut InteractiveTransitionState,
        now: Instant,
    ) -> Option<Settlement> {
        let duration = self.settings.completion_duration();
        let settle = self.settle.as_mut()?;
        let from = state.progress();
        let target = settle.target;
        let animation = settle
            .animation
            .get_or_insert_with(|| Animation::new(from, target, now, duration, Curve::EaseOut));

        state.drive(ProgressOwner::Completion, animation.value_at(now));

        if !animation.is_finished(now) {
            return None;
        }

        let outcome = if self.phase == GesturePhase::Committing {
            Settlement::Committed
        } else {
            Settlement::Cancelled
        };

        self.abort(state);
        Some(outcome)
    }

    /// Drops any swipe in progress and puts `state` back at rest.
    pub fn abort(&mut self, state: &mut InteractiveTransitionState) {
        self.phase = GesturePhase::Idle;
        self.settle = None;
        state.reset();
    }
}
