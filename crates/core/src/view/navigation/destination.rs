use super::route::{AnyRoute, Route, RouteType};
use crate::error::{NavigationError, NavigationResult};
use crate::geom::Rectangle;
use crate::view::placeholder::Placeholder;
use crate::view::View;
use std::any::Any;
use std::fmt;
use std::hash::Hash;

/// Builds the content of a screen for a route, laid out in the given rect.
pub type DestinationBuilder<R> = Box<dyn Fn(&R, Rectangle) -> Box<dyn View>>;

struct Destination<R: Route> {
    kind: R::Kind,
    builder: DestinationBuilder<R>,
}

/// Maps route kinds to the builders of their screens.
///
/// Registrations accumulate: registering twice for a kind keeps both and
/// lookups use the first one.
pub struct DestinationRegistry<R: Route> {
    destinations: Vec<Destination<R>>,
}

impl<R: Route> DestinationRegistry<R> {
    pub fn new() -> Self {
        DestinationRegistry {
            destinations: Vec::new(),
        }
    }

    pub fn register<F>(&mut self, kind: R::Kind, builder: F)
    where
        F: Fn(&R, Rectangle) -> Box<dyn View> + 'static,
    {
        self.destinations.push(Destination {
            kind,
            builder: Box::new(builder),
        });
    }

    /// Appends the registrations of `other` after ours.
    pub fn merge(&mut self, mut other: DestinationRegistry<R>) {
        self.destinations.append(&mut other.destinations);
    }

    pub fn contains(&self, kind: R::Kind) -> bool {
        self.destinations.iter().any(|dest| dest.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Builds the screen content for `route`.
    pub fn resolve(&self, route: &R, rect: Rectangle) -> NavigationResult<Box<dyn View>> {
        let kind = route.kind();
        let dest = self
            .destinations
            .iter()
            .find(|dest| dest.kind == kind)
            .ok_or_else(|| NavigationError::UnresolvedDestination {
                route: format!("{:?}", route),
                kind: format!("{:?}", kind),
            })?;

        Ok((dest.builder)(route, rect))
    }
}

impl DestinationRegistry<AnyRoute> {
    /// Registers a builder for every [`AnyRoute`] holding a `T`.
    pub fn register_type<T, F>(&mut self, builder: F)
    where
        T: Any + Eq + Hash + fmt::Debug + Send + Sync,
        F: Fn(&T, Rectangle) -> Box<dyn View> + 'static,
    {
        self.register(RouteType::of::<T>(), move |route: &AnyRoute, rect| {
            match route.downcast_ref::<T>() {
                Some(value) => builder(value, rect),
                None => Box::new(Placeholder::new(rect, format!("{:?}", route))) as Box<dyn View>,
            }
        });
    }
}

impl<R: Route> Default for DestinationRegistry<R> {
    fn default() -> Self {
        DestinationRegistry::new()
    }
}

impl<R: Route> fmt::Debug for DestinationRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.destinations.iter().map(|dest| dest.kind))
            .finish()
    }
}
