/// Who is currently allowed to write `progress`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProgressOwner {
    /// Nobody drives progress, it rests at `0.0`.
    Idle,
    /// A back-swipe is tracking the finger.
    Gesture,
    /// A released swipe is settling towards `0.0` or `1.0`.
    Completion,
}

/// Transition state shared by the back-swipe and the declarative slides.
///
/// `progress` goes from `0.0` (top screen fully pushed in) to `1.0` (top screen
/// fully popped). Only the current [`ProgressOwner`] writes it. Declarative
/// slides never touch `progress`, they only flag `is_animating`.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveTransitionState {
    is_interactive: bool,
    is_animating: bool,
    progress: f32,
    owner: ProgressOwner,
}

impl Default for InteractiveTransitionState {
    fn default() -> Self {
        InteractiveTransitionState {
            is_interactive: false,
            is_animating: false,
            progress: 0.0,
            owner: ProgressOwner::Idle,
        }
    }
}

impl InteractiveTransitionState {
    pub fn is_interactive(&self) -> bool {
        self.is_interactive
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn owner(&self) -> ProgressOwner {
        self.owner
    }

    /// Hands progress over to a starting back-swipe.
    pub(crate) fn begin_interaction(&mut self) {
        self.is_interactive = true;
        self.progress = 0.0;
        self.owner = ProgressOwner::Gesture;
    }

    /// Hands progress over to the settle animation of a released swipe.
    pub(crate) fn begin_completion(&mut self) {
        self.is_animating = true;
        self.owner = ProgressOwner::Completion;
    }

    /// Writes `progress` on behalf of `owner`.
    ///
    /// Returns `false`, leaving the state untouched, when `owner` doesn't own
    /// progress or the value falls outside `[0, 1]`.
    pub(crate) fn drive(&mut self, owner: ProgressOwner, progress: f32) -> bool {
        if owner != self.owner || owner == ProgressOwner::Idle {
            tracing::warn!(?owner, current = ?self.owner, "rejected progress write");
            return false;
        }

        if !(0.0..=1.0).contains(&progress) {
            return false;
        }

        self.progress = progress;
        true
    }

    /// Flag written by declarative slides.
    pub(crate) fn set_animating(&mut self, animating: bool) {
        self.is_animating = animating;
    }

    pub(crate) fn reset(&mut self) {
        *self = InteractiveTransitionState::default();
    }
}
