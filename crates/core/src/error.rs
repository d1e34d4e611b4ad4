//! Errors surfaced by the navigation layer.

/// Errors returned while resolving navigation state into views.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No destination was registered for the route's kind.
    ///
    /// This is an integration mistake rather than bad runtime data: the stack
    /// renders a placeholder instead of aborting.
    #[error("no destination registered for route kind {kind} (route: {route})")]
    UnresolvedDestination { route: String, kind: String },
}

pub type NavigationResult<T> = Result<T, NavigationError>;
