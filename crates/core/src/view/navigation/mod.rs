//! Stack-based screen navigation.
//!
//! The application owns a [`NavigationPath`] of route values and shares it with
//! a [`NavigationStack`] through a [`PathBinding`]. The stack resolves every
//! route to a screen through a [`DestinationRegistry`], slides screens in and
//! out when the path changes, and pops the path itself when the user swipes
//! back from the leading edge.
//!
//! The implementation is split into:
//! - [`route`] and [`path`]: the route values and the path holding them
//! - [`destination`]: route kind to screen builders
//! - [`gesture_coordinator`]: the back-swipe state machine
//! - [`stack`], [`frame`] and [`navigation_bar`]: the views

pub mod destination;
pub mod frame;
pub mod gesture_coordinator;
pub mod navigation_bar;
pub mod path;
pub mod route;
pub mod stack;

pub use self::destination::{DestinationBuilder, DestinationRegistry};
pub use self::frame::StackFrame;
pub use self::gesture_coordinator::{should_commit, GestureCoordinator, GesturePhase, Settlement};
pub use self::navigation_bar::NavigationBar;
pub use self::path::{NavigationPath, PathBinding};
pub use self::route::{AnyRoute, FrameKey, Route, RouteType};
pub use self::stack::{Layer, NavigationStack, NavigationStackBuilder};
