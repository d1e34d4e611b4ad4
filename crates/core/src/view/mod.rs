//! Retained view tree and event plumbing.
//!
//! Views own their children as boxed trait objects. Events are dispatched
//! depth-first from the topmost child down to the parent: a child may capture
//! an event, and the events it pushes on its bus are offered to the parent
//! before bubbling further up. Views that need to decide the routing order
//! themselves (like [`navigation::NavigationStack`]) keep their sub-views out of
//! [`View::children`] and dispatch to them explicitly.

pub mod button;
pub mod filler;
pub mod navigation;
pub mod placeholder;

use crate::context::Context;
use crate::framebuffer::{Framebuffer, UpdateMode};
use crate::geom::{Point, Rectangle};
use crate::gesture::GestureEvent;
use downcast_rs::{impl_downcast, Downcast};
use lazy_static::lazy_static;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::time::Instant;

pub type Id = u64;
pub type Hub = Sender<Event>;
pub type Bus = VecDeque<Event>;

lazy_static! {
    pub static ref ID_FEEDER: IdFeeder = IdFeeder::new(1);
}

pub struct IdFeeder(AtomicU64);

impl IdFeeder {
    pub fn new(id: Id) -> Self {
        IdFeeder(AtomicU64::new(id))
    }

    pub fn next(&self) -> Id {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Gesture(GestureEvent),
    /// Pop the top screen of the enclosing navigation stack.
    Back,
    /// Animation frame; carries the frame timestamp.
    Tick(Instant),
}

pub trait View: Downcast {
    /// Returns `true` when the event was captured.
    fn handle_event(
        &mut self,
        evt: &Event,
        hub: &Hub,
        bus: &mut Bus,
        rq: &mut RenderQueue,
        context: &mut Context,
    ) -> bool;

    /// Draws the view itself, `rect` is the damaged area.
    fn render(&self, fb: &mut dyn Framebuffer, rect: Rectangle);

    fn rect(&self) -> &Rectangle;

    fn rect_mut(&mut self) -> &mut Rectangle;

    fn children(&self) -> &Vec<Box<dyn View>>;

    fn children_mut(&mut self) -> &mut Vec<Box<dyn View>>;

    fn id(&self) -> Id;

    fn len(&self) -> usize {
        self.children().len()
    }

    fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    fn child(&self, index: usize) -> &dyn View {
        self.children()[index].as_ref()
    }

    fn child_mut(&mut self, index: usize) -> &mut dyn View {
        self.children_mut()[index].as_mut()
    }

    /// Moves the view by `delta`. Containers with sub-views outside of
    /// [`View::children`] must move those as well.
    fn shift(&mut self, delta: Point) {
        *self.rect_mut() += delta;
        for child in self.children_mut() {
            child.shift(delta);
        }
    }
}

impl_downcast!(View);

/// Dispatches `evt` through `view` and its descendants.
pub fn handle_event(
    view: &mut dyn View,
    evt: &Event,
    hub: &Hub,
    parent_bus: &mut Bus,
    rq: &mut RenderQueue,
    context: &mut Context,
) -> bool {
    if view.is_empty() {
        return view.handle_event(evt, hub, parent_bus, rq, context);
    }

    let mut captured = false;
    let mut child_bus: Bus = VecDeque::with_capacity(1);

    for i in (0..view.len()).rev() {
        if handle_event(view.child_mut(i), evt, hub, &mut child_bus, rq, context) {
            captured = true;
            break;
        }
    }

    let mut temp_bus: Bus = VecDeque::with_capacity(1);
    child_bus.retain(|child_evt| !view.handle_event(child_evt, hub, &mut temp_bus, rq, context));

    parent_bus.append(&mut child_bus);
    parent_bus.append(&mut temp_bus);

    captured || view.handle_event(evt, hub, parent_bus, rq, context)
}

/// Draws `view` then its children, in painter's order.
pub fn render(view: &dyn View, fb: &mut dyn Framebuffer, rect: Rectangle) {
    let Some(damaged) = view.rect().intersection(&rect) else {
        return;
    };

    view.render(fb, damaged);

    for child in view.children() {
        render(child.as_ref(), fb, rect);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RenderData {
    pub id: Id,
    pub rect: Rectangle,
    pub mode: UpdateMode,
}

impl RenderData {
    pub fn new(id: Id, rect: Rectangle, mode: UpdateMode) -> RenderData {
        RenderData {
            id,
            rect,
            mode,
        }
    }
}

/// Areas waiting to be redrawn.
#[derive(Debug, Default)]
pub struct RenderQueue(Vec<RenderData>);

impl RenderQueue {
    pub fn new() -> RenderQueue {
        RenderQueue(Vec::new())
    }

    pub fn add(&mut self, data: RenderData) {
        if self.0.last() == Some(&data) {
            return;
        }
        self.0.push(data);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, RenderData> {
        self.0.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::button::Button;
    use super::filler::Filler;
    use super::*;
    use crate::color::{BLACK, WHITE};
    use crate::context::test_helpers::create_test_context;
    use crate::framebuffer::Pixmap;
    use std::sync::mpsc::channel;

    struct Container {
        id: Id,
        rect: Rectangle,
        children: Vec<Box<dyn View>>,
        backs: usize,
    }

    impl View for Container {
        fn handle_event(
            &mut self,
            evt: &Event,
            _hub: &Hub,
            _bus: &mut Bus,
            _rq: &mut RenderQueue,
            _context: &mut Context,
        ) -> bool {
            if let Event::Back = evt {
                self.backs += 1;
                return true;
            }
            false
        }

        fn render(&self, _fb: &mut dyn Framebuffer, _rect: Rectangle) {}

        fn rect(&self) -> &Rectangle {
            &self.rect
        }

        fn rect_mut(&mut self) -> &mut Rectangle {
            &mut self.rect
        }

        fn children(&self) -> &Vec<Box<dyn View>> {
            &self.children
        }

        fn children_mut(&mut self) -> &mut Vec<Box<dyn View>> {
            &mut self.children
        }

        fn id(&self) -> Id {
            self.id
        }
    }

    fn container() -> Container {
        Container {
            id: ID_FEEDER.next(),
            rect: rect![0, 0, 100, 100],
            children: vec![
                Box::new(Filler::new(rect![0, 0, 100, 100], WHITE)) as Box<dyn View>,
                Box::new(Button::new(rect![0, 0, 20, 20], Event::Back)) as Box<dyn View>,
            ],
            backs: 0,
        }
    }

    #[test]
    fn test_id_feeder_is_monotonic() {
        let a = ID_FEEDER.next();
        let b = ID_FEEDER.next();
        assert!(b > a);
    }

    #[test]
    fn test_child_events_are_offered_to_parent() {
        let mut view = container();
        let (hub, _receiver) = channel();
        let mut bus = VecDeque::new();
        let mut rq = RenderQueue::new();
        let mut context = create_test_context();

        let tap = Event::Gesture(GestureEvent::Tap(pt!(5, 5)));
        let captured = handle_event(&mut view, &tap, &hub, &mut bus, &mut rq, &mut context);

        assert!(captured);
        assert_eq!(view.backs, 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_uncaptured_event_reaches_parent() {
        let mut view = container();
        let (hub, _receiver) = channel();
        let mut bus = VecDeque::new();
        let mut rq = RenderQueue::new();
        let mut context = create_test_context();

        let tap = Event::Gesture(GestureEvent::Tap(pt!(50, 50)));
        let captured = handle_event(&mut view, &tap, &hub, &mut bus, &mut rq, &mut context);

        assert!(!captured);
        assert_eq!(view.backs, 0);
    }

    #[test]
    fn test_shift_moves_descendants() {
        let mut view = container();
        view.shift(pt!(10, 0));

        assert_eq!(*view.rect(), rect![10, 0, 110, 100]);
        assert_eq!(*view.child(1).rect(), rect![10, 0, 30, 20]);
    }

    #[test]
    fn test_render_paints_children_in_order() {
        let view = container();
        let mut fb = Pixmap::new(100, 100);

        render(&view, &mut fb, rect![0, 0, 100, 100]);

        assert_eq!(fb.get_pixel(pt!(50, 50)), Some(WHITE.gray()));
        assert_ne!(fb.get_pixel(pt!(5, 5)), Some(BLACK.gray()));
        assert_ne!(fb.get_pixel(pt!(5, 5)), Some(WHITE.gray()));
    }

    #[test]
    fn test_render_queue_skips_consecutive_duplicates() {
        let mut rq = RenderQueue::new();
        let data = RenderData::new(1, rect![0, 0, 10, 10], UpdateMode::Partial);
        rq.add(data);
        rq.add(data);
        rq.add(RenderData::new(2, rect![0, 0, 5, 5], UpdateMode::Full));

        assert_eq!(rq.len(), 2);
        assert_eq!(rq.drain().count(), 2);
        assert!(rq.is_empty());
    }
}
