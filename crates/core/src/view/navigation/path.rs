use super::route::Route;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Ordered list of pushed routes, index 0 being the first push.
///
/// Equality and hashing look at the routes only: two paths holding the same
/// routes in the same order are equal whatever their last mutation was.
#[derive(Clone)]
pub struct NavigationPath<R: Route> {
    items: Vec<R>,
    is_forward: bool,
    revision: u64,
}

impl<R: Route> NavigationPath<R> {
    pub fn new() -> Self {
        NavigationPath {
            items: Vec::new(),
            is_forward: true,
            revision: 0,
        }
    }

    pub fn append(&mut self, item: R) {
        self.items.push(item);
        self.is_forward = true;
        self.revision += 1;
    }

    /// Pops the last route.
    ///
    /// Popping an empty path does nothing: a back button and a back-swipe may
    /// both fire for the same screen.
    pub fn remove_last(&mut self) {
        self.is_forward = false;
        if self.items.pop().is_some() {
            self.revision += 1;
        }
    }

    /// Pops up to `k` routes at once.
    pub fn remove_last_n(&mut self, k: usize) {
        self.is_forward = false;
        let len = self.items.len();
        let k = k.min(len);
        if k > 0 {
            self.items.truncate(len - k);
            self.revision += 1;
        }
    }

    /// Pops back to the root screen.
    pub fn clear(&mut self) {
        self.remove_last_n(self.items.len());
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last(&self) -> Option<&R> {
        self.items.last()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.items.iter()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// Direction of the most recent mutation, `true` for a push.
    pub fn is_forward(&self) -> bool {
        self.is_forward
    }

    /// Bumped by every mutation that changed the routes.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<R: Route> Default for NavigationPath<R> {
    fn default() -> Self {
        NavigationPath::new()
    }
}

impl<R: Route> PartialEq for NavigationPath<R> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<R: Route> Eq for NavigationPath<R> {}

impl<R: Route> Hash for NavigationPath<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl<R: Route> fmt::Debug for NavigationPath<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationPath")
            .field("items", &self.items)
            .field("is_forward", &self.is_forward)
            .finish()
    }
}

impl<R: Route> FromIterator<R> for NavigationPath<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        NavigationPath {
            items: iter.into_iter().collect(),
            is_forward: true,
            revision: 0,
        }
    }
}

impl<'a, R: Route> IntoIterator for &'a NavigationPath<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Shared handle on a path owned by the application.
///
/// The navigation stack keeps one clone and observes it on every frame, the
/// application keeps another to push and pop.
pub struct PathBinding<R: Route>(Rc<RefCell<NavigationPath<R>>>);

impl<R: Route> PathBinding<R> {
    pub fn new(path: NavigationPath<R>) -> Self {
        PathBinding(Rc::new(RefCell::new(path)))
    }

    pub fn borrow(&self) -> Ref<'_, NavigationPath<R>> {
        self.0.borrow()
    }

    pub fn update<T>(&self, f: impl FnOnce(&mut NavigationPath<R>) -> T) -> T {
        f(&mut self.0.borrow_mut())
    }

    pub fn append(&self, item: R) {
        self.update(|path| path.append(item));
    }

    pub fn remove_last(&self) {
        self.update(|path| path.remove_last());
    }

    pub fn count(&self) -> usize {
        self.borrow().count()
    }

    pub fn revision(&self) -> u64 {
        self.borrow().revision()
    }

    /// Copy of the current path.
    pub fn get(&self) -> NavigationPath<R> {
        self.borrow().clone()
    }
}

impl<R: Route> Clone for PathBinding<R> {
    fn clone(&self) -> Self {
        PathBinding(Rc::clone(&self.0))
    }
}

impl<R: Route> Default for PathBinding<R> {
    fn default() -> Self {
        PathBinding::new(NavigationPath::new())
    }
}

impl<R: Route> fmt::Debug for PathBinding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathBinding").field(&*self.0.borrow()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::navigation::route::AnyRoute;
    use std::collections::HashSet;

    fn path_of(items: &[&'static str]) -> NavigationPath<AnyRoute> {
        items.iter().copied().map(AnyRoute::new).collect()
    }

    #[test]
    fn test_append_sets_forward() {
        let mut path = NavigationPath::new();
        path.append(AnyRoute::new("A"));
        assert_eq!(path.count(), 1);
        assert!(path.is_forward());
        assert_eq!(path.last(), Some(&AnyRoute::new("A")));
    }

    #[test]
    fn test_remove_last_on_empty_is_noop() {
        let mut path: NavigationPath<AnyRoute> = NavigationPath::new();
        path.remove_last();
        path.remove_last();
        assert_eq!(path.count(), 0);
        assert!(!path.is_forward());
        assert_eq!(path.revision(), 0);
    }

    #[test]
    fn test_push_then_pop_restores_top() {
        let mut path = path_of(&["A"]);
        let before = path.last().cloned();

        path.append(AnyRoute::new("X"));
        path.remove_last();

        assert_eq!(path.last().cloned(), before);
        assert_eq!(path, path_of(&["A"]));
    }

    #[test]
    fn test_equality_ignores_direction() {
        let mut a = path_of(&["A", "B"]);
        let mut b = path_of(&["A"]);
        b.append(AnyRoute::new("B"));
        a.append(AnyRoute::new("C"));
        a.remove_last();

        assert!(!a.is_forward());
        assert!(b.is_forward());
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        assert_ne!(path_of(&["A", "B"]), path_of(&["B", "A"]));
    }

    #[test]
    fn test_remove_last_n_is_clamped() {
        let mut path = path_of(&["A", "B", "C"]);
        path.remove_last_n(2);
        assert_eq!(path, path_of(&["A"]));

        path.remove_last_n(10);
        assert!(path.is_empty());

        let mut path = path_of(&["A", "B"]);
        path.clear();
        assert_eq!(path.count(), 0);
        assert!(!path.is_forward());
    }

    #[test]
    fn test_revision_tracks_effective_mutations() {
        let mut path = path_of(&[]);
        path.append(AnyRoute::new("A"));
        path.remove_last();
        path.remove_last();
        assert_eq!(path.revision(), 2);
    }

    #[test]
    fn test_binding_shares_the_path() {
        let binding = PathBinding::default();
        let other = binding.clone();

        binding.append(AnyRoute::new("A"));
        other.append(AnyRoute::new("B"));
        assert_eq!(binding.count(), 2);

        other.remove_last();
        assert_eq!(binding.get(), path_of(&["A"]));
        assert_eq!(binding.revision(), other.revision());
    }
}
