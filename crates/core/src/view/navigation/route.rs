//! Route identifiers.
//!
//! A route value identifies a destination and carries its data. Applications
//! usually describe their destinations with an enum and map every variant to a
//! kind; [`AnyRoute`] covers paths that mix unrelated value types.

use fxhash::FxHasher;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A value that can be pushed on a [`NavigationPath`](super::NavigationPath).
///
/// `kind` selects the destination builder; values of the same kind share a
/// builder and are told apart by their data.
///
/// ```
/// use slidestack_core::view::navigation::Route;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Screen {
///     Album(u32),
///     Artist(String),
/// }
///
/// #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// enum ScreenKind {
///     Album,
///     Artist,
/// }
///
/// impl Route for Screen {
///     type Kind = ScreenKind;
///
///     fn kind(&self) -> ScreenKind {
///         match self {
///             Screen::Album(_) => ScreenKind::Album,
///             Screen::Artist(_) => ScreenKind::Artist,
///         }
///     }
/// }
///
/// assert_eq!(Screen::Album(3).kind(), ScreenKind::Album);
/// ```
pub trait Route: Clone + Eq + Hash + fmt::Debug + 'static {
    type Kind: Copy + Eq + Hash + fmt::Debug + 'static;

    fn kind(&self) -> Self::Kind;
}

/// Identity of a rendered screen.
///
/// Derived from the route value and its depth, so that pushing an equal value
/// twice still yields two distinct screens.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FrameKey {
    Root,
    Route { depth: usize, hash: u64 },
}

impl FrameKey {
    pub fn route<R: Route>(depth: usize, route: &R) -> FrameKey {
        let mut hasher = FxHasher::default();
        route.hash(&mut hasher);
        FrameKey::Route {
            depth,
            hash: hasher.finish(),
        }
    }

    pub fn depth(&self) -> usize {
        match *self {
            FrameKey::Root => 0,
            FrameKey::Route { depth, .. } => depth,
        }
    }
}

/// Runtime type of an [`AnyRoute`] value.
#[derive(Copy, Clone)]
pub struct RouteType {
    id: TypeId,
    name: &'static str,
}

impl RouteType {
    pub fn of<T: Any>() -> RouteType {
        RouteType {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for RouteType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RouteType {}

impl Hash for RouteType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

trait ErasedRoute: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn route_type(&self) -> RouteType;
    fn eq_erased(&self, other: &dyn ErasedRoute) -> bool;
    fn hash_erased(&self, state: &mut dyn Hasher);
}

impl<T> ErasedRoute for T
where
    T: Any + Eq + Hash + fmt::Debug,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn route_type(&self) -> RouteType {
        RouteType::of::<T>()
    }

    fn eq_erased(&self, other: &dyn ErasedRoute) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn hash_erased(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// A type-erased route value, matched to destinations by its runtime type.
///
/// Two values are equal only when they have the same type and compare equal.
#[derive(Clone)]
pub struct AnyRoute(Arc<dyn ErasedRoute + Send + Sync>);

impl AnyRoute {
    pub fn new<T>(value: T) -> AnyRoute
    where
        T: Any + Eq + Hash + fmt::Debug + Send + Sync,
    {
        AnyRoute(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }
}

impl PartialEq for AnyRoute {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_erased(other.0.as_ref())
    }
}

impl Eq for AnyRoute {}

impl Hash for AnyRoute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.route_type().hash(state);
        self.0.hash_erased(state);
    }
}

impl fmt::Debug for AnyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl Route for AnyRoute {
    type Kind = RouteType;

    fn kind(&self) -> RouteType {
        self.0.route_type()
    }
}
