//! Stack navigation container.
//!
//! The stack mirrors a [`NavigationPath`](super::NavigationPath) owned by the
//! application: it keeps one [`StackFrame`] per pushed route above the root
//! frame and watches the path on every [`Event::Tick`]. Changes made by the
//! application slide the screens in or out; an edge back-swipe drives the same
//! frames directly and pops the path itself once committed, without a slide.

use super::destination::DestinationRegistry;
use super::frame::StackFrame;
use super::gesture_coordinator::{GestureCoordinator, GesturePhase, Settlement};
use super::path::PathBinding;
use super::route::{AnyRoute, FrameKey, Route};
use crate::context::Context;
use crate::framebuffer::{Framebuffer, UpdateMode};
use crate::geom::{Point, Rectangle};
use crate::gesture::GestureEvent;
use crate::settings::NavigationSettings;
use crate::transition::{
    slide_offset, Animation, Curve, InteractiveTransitionState, TransitionContext,
};
use crate::view::placeholder::Placeholder;
use crate::view::{self, Bus, Event, Hub, Id, RenderData, RenderQueue, View, ID_FEEDER};
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;
use std::time::Instant;

type RootBuilder = Box<dyn Fn(Rectangle) -> Box<dyn View>>;

/// A frame as currently composed, listed bottom to top by
/// [`NavigationStack::layers`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Layer {
    pub key: FrameKey,
    pub depth: usize,
    pub offset: i32,
    pub bar_hidden: bool,
}

/// Declarative slide between the previous top frame and the new one.
struct Slide {
    forward: bool,
    outgoing: FrameKey,
    /// Offset of the outgoing frame when the slide started.
    from: i32,
    /// The outgoing frame once it's no longer part of the path.
    held: Option<StackFrame>,
    animation: Option<Animation>,
}

pub struct NavigationStackBuilder<R: Route> {
    path: PathBinding<R>,
    root: RootBuilder,
    registry: DestinationRegistry<R>,
    rect: Option<Rectangle>,
}

impl<R: Route> NavigationStackBuilder<R> {
    /// Registers the builder used for routes of `kind`.
    pub fn destination<F>(mut self, kind: R::Kind, builder: F) -> Self
    where
        F: Fn(&R, Rectangle) -> Box<dyn View> + 'static,
    {
        self.registry.register(kind, builder);
        self
    }

    /// Adds every registration of `registry` after the existing ones.
    pub fn destinations(mut self, registry: DestinationRegistry<R>) -> Self {
        self.registry.merge(registry);
        self
    }

    /// Lays the stack out in `rect` instead of the whole display.
    pub fn rect(mut self, rect: Rectangle) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn build(self, context: &Context) -> NavigationStack<R> {
        let rect = self.rect.unwrap_or_else(|| context.display.rect());
        let settings = context.settings.navigation.clone();
        let content = (self.root)(StackFrame::content_rect(&rect, settings.bar_height));
        let root = StackFrame::new(FrameKey::Root, rect, content, settings.bar_height);
        let observed_revision = self.path.revision();

        let mut stack = NavigationStack {
            id: ID_FEEDER.next(),
            rect,
            children: Vec::new(),
            path: self.path,
            observed_revision,
            routes: Vec::new(),
            frames: vec![root],
            registry: self.registry,
            coordinator: GestureCoordinator::new(settings.clone()),
            state: InteractiveTransitionState::default(),
            slide: None,
            settings,
        };
        stack.sync_frames();

        tracing::debug!(depth = stack.depth(), "Navigation stack built");
        stack
    }
}

impl NavigationStackBuilder<AnyRoute> {
    /// Registers the builder used for [`AnyRoute`] values holding a `T`.
    pub fn destination_for<T, F>(mut self, builder: F) -> Self
    where
        T: Any + Eq + Hash + fmt::Debug + Send + Sync,
        F: Fn(&T, Rectangle) -> Box<dyn View> + 'static,
    {
        self.registry.register_type::<T, F>(builder);
        self
    }
}

pub struct NavigationStack<R: Route> {
    id: Id,
    rect: Rectangle,
    children: Vec<Box<dyn View>>,
    path: PathBinding<R>,
    observed_revision: u64,
    /// Routes the frames above the root were built for.
    routes: Vec<R>,
    frames: Vec<StackFrame>,
    registry: DestinationRegistry<R>,
    coordinator: GestureCoordinator,
    state: InteractiveTransitionState,
    slide: Option<Slide>,
    settings: NavigationSettings,
}

impl<R: Route> NavigationStack<R> {
    pub fn builder<F>(path: PathBinding<R>, root: F) -> NavigationStackBuilder<R>
    where
        F: Fn(Rectangle) -> Box<dyn View> + 'static,
    {
        NavigationStackBuilder {
            path,
            root: Box::new(root),
            registry: DestinationRegistry::new(),
            rect: None,
        }
    }

    pub fn path(&self) -> &PathBinding<R> {
        &self.path
    }

    pub fn state(&self) -> &InteractiveTransitionState {
        &self.state
    }

    pub fn phase(&self) -> GesturePhase {
        self.coordinator.phase()
    }

    /// Number of frames above the root, as last observed.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    pub fn current_frame(&self) -> &StackFrame {
        &self.frames[self.frames.len() - 1]
    }

    /// The frame revealed by a back-swipe, while one is in progress.
    pub fn previous_frame(&self) -> Option<&StackFrame> {
        if !self.state.is_interactive() {
            return None;
        }

        self.frames.len().checked_sub(2).map(|i| &self.frames[i])
    }

    pub fn current_key(&self) -> FrameKey {
        self.current_frame().key()
    }

    pub fn previous_key(&self) -> Option<FrameKey> {
        self.previous_frame().map(StackFrame::key)
    }

    /// Frames being drawn, bottom to top.
    pub fn layers(&self) -> Vec<Layer> {
        self.visible_frames()
            .into_iter()
            .map(|frame| Layer {
                key: frame.key(),
                depth: frame.depth(),
                offset: frame.offset(),
                bar_hidden: frame.is_bar_hidden(),
            })
            .collect()
    }

    fn visible_frames(&self) -> Vec<&StackFrame> {
        let top = self.current_frame();

        if let Some(slide) = self.slide.as_ref() {
            let outgoing = slide
                .held
                .as_ref()
                .or_else(|| self.frames.iter().find(|frame| frame.key() == slide.outgoing));

            if let Some(outgoing) = outgoing {
                return if slide.forward {
                    vec![outgoing, top]
                } else {
                    vec![top, outgoing]
                };
            }
        }

        match self.previous_frame() {
            Some(previous) => vec![previous, top],
            None => vec![top],
        }
    }

    fn build_frame(&self, depth: usize, route: &R) -> StackFrame {
        let bar_height = self.settings.bar_height;
        let content_rect = StackFrame::content_rect(&self.rect, bar_height);
        let content = match self.registry.resolve(route, content_rect) {
            Ok(content) => content,
            Err(err) => {
                tracing::error!(error = %err, depth, "Failed to resolve destination");
                Box::new(Placeholder::new(content_rect, err.to_string())) as Box<dyn View>
            }
        };

        StackFrame::new(FrameKey::route(depth, route), self.rect, content, bar_height)
    }

    /// Rebuilds the frames that no longer match the path and returns the ones
    /// that were dropped, bottom to top.
    fn sync_frames(&mut self) -> Vec<StackFrame> {
        let path = self.path.get();
        let kept = self
            .routes
            .iter()
            .zip(path.iter())
            .take_while(|(ours, theirs)| ours == theirs)
            .count();

        self.routes.truncate(kept);
        let dropped = self.frames.split_off(kept + 1);

        for route in path.iter().skip(kept) {
            let frame = self.build_frame(self.frames.len(), route);
            self.frames.push(frame);
            self.routes.push(route.clone());
        }

        dropped
    }

    fn reset_offsets(&mut self) {
        for frame in &mut self.frames {
            frame.set_offset(0);
        }
    }

    fn apply_interactive_offsets(&mut self) {
        let progress = self.state.progress();
        let width = self.rect.width() as f32;
        let peek = self.settings.peek_distance;
        let current = slide_offset(TransitionContext::Removal, false, progress, width, peek);
        let previous = slide_offset(TransitionContext::Insertion, false, 1.0 - progress, width, peek);

        let len = self.frames.len();
        if len >= 2 {
            self.frames[len - 2].set_offset(previous.round() as i32);
        }
        self.frames[len - 1].set_offset(current.round() as i32);
    }

    /// Pops the top route after a committed back-swipe. The swipe already
    /// moved the frame out, so no slide is started.
    fn pop_without_transition(&mut self) {
        self.path.remove_last();
        self.observed_revision = self.path.revision();
        self.sync_frames();
        self.reset_offsets();
        tracing::debug!(depth = self.depth(), "Popped by back-swipe");
    }

    fn pop(&mut self) {
        let depth = self.path.count();
        if depth == 0 {
            tracing::trace!("Back requested on the root screen");
            return;
        }

        tracing::debug!(depth, "Back requested");
        self.path.remove_last();
    }

    fn end_slide(&mut self) {
        if self.slide.take().is_some() {
            self.reset_offsets();
            self.state.set_animating(false);
        }
    }

    /// Catches up with a path changed by the application.
    fn observe_path(&mut self) {
        let (revision, forward) = {
            let path = self.path.borrow();
            (path.revision(), path.is_forward())
        };
        self.observed_revision = revision;

        let outgoing = self.current_key();
        let from = self.current_frame().offset();
        self.end_slide();
        let mut dropped = self.sync_frames();
        self.reset_offsets();
        let incoming = self.current_key();

        tracing::debug!(
            depth = self.depth(),
            forward,
            ?outgoing,
            ?incoming,
            "Observed path change"
        );

        if incoming == outgoing {
            return;
        }

        self.slide = Some(Slide {
            forward,
            outgoing,
            from,
            held: dropped.pop(),
            animation: None,
        });
        self.state.set_animating(true);
    }

    fn advance_slide(&mut self, now: Instant) {
        let duration = self.settings.slide_duration();
        let width = self.rect.width() as f32;
        let peek = self.settings.peek_distance;

        let Some(slide) = self.slide.as_mut() else {
            return;
        };

        let animation = slide
            .animation
            .get_or_insert_with(|| Animation::new(0.0, 1.0, now, duration, Curve::EaseInOut));
        let fraction = animation.value_at(now);
        let finished = animation.is_finished(now);

        let forward = slide.forward;
        let incoming = slide_offset(TransitionContext::Insertion, forward, 1.0 - fraction, width, peek);
        // The outgoing frame leaves from wherever an interrupted move left it.
        let outgoing = slide.from as f32 * (1.0 - fraction)
            + slide_offset(TransitionContext::Removal, forward, fraction, width, peek);
        let outgoing = outgoing.round() as i32;

        match slide.held.as_mut() {
            Some(frame) => frame.set_offset(outgoing),
            None => {
                let key = slide.outgoing;
                if let Some(frame) = self.frames.iter_mut().find(|frame| frame.key() == key) {
                    frame.set_offset(outgoing);
                }
            }
        }

        let len = self.frames.len();
        self.frames[len - 1].set_offset(incoming.round() as i32);

        if finished {
            self.end_slide();
        }
    }

    fn tick(&mut self, now: Instant, rq: &mut RenderQueue) {
        let path_changed = self.path.revision() != self.observed_revision;
        let mut dirty = path_changed;

        if path_changed && self.coordinator.is_active() {
            tracing::debug!(phase = ?self.coordinator.phase(), "Path changed during back-swipe");
            self.coordinator.abort(&mut self.state);
        } else if let Some(settlement) = self.coordinator.tick(&mut self.state, now) {
            match settlement {
                Settlement::Committed => self.pop_without_transition(),
                Settlement::Cancelled => self.reset_offsets(),
            }
            dirty = true;
        } else if self.coordinator.is_active() {
            self.apply_interactive_offsets();
            dirty = true;
        }

        if path_changed {
            self.observe_path();
        }

        if self.slide.is_some() {
            self.advance_slide(now);
            dirty = true;
        }

        if dirty {
            rq.add(RenderData::new(self.id, self.rect, UpdateMode::Animation));
        }
    }

    /// Sends `evt` to the top frame. `Back` events coming out of it pop.
    fn dispatch_to_current(
        &mut self,
        evt: &Event,
        hub: &Hub,
        bus: &mut Bus,
        rq: &mut RenderQueue,
        context: &mut Context,
    ) -> bool {
        let mut frame_bus: Bus = VecDeque::with_capacity(1);
        let len = self.frames.len();
        let captured = view::handle_event(
            &mut self.frames[len - 1],
            evt,
            hub,
            &mut frame_bus,
            rq,
            context,
        );

        for child_evt in frame_bus {
            match child_evt {
                Event::Back => self.pop(),
                other => bus.push_back(other),
            }
        }

        captured
    }
}

impl<R: Route> View for NavigationStack<R> {
    fn handle_event(
        &mut self,
        evt: &Event,
        hub: &Hub,
        bus: &mut Bus,
        rq: &mut RenderQueue,
        context: &mut Context,
    ) -> bool {
        match evt {
            Event::Tick(now) => {
                self.tick(*now, rq);
                self.dispatch_to_current(evt, hub, bus, rq, context);
                false
            }
            Event::Back => {
                self.pop();
                true
            }
            Event::Gesture(GestureEvent::Drag(drag)) => {
                let depth = self.depth();
                let was_dragging = self.coordinator.phase() == GesturePhase::Dragging;
                if self
                    .coordinator
                    .handle_drag(drag, depth, &self.rect, &mut self.state)
                {
                    self.apply_interactive_offsets();
                    rq.add(RenderData::new(self.id, self.rect, UpdateMode::Animation));
                    return true;
                }

                if was_dragging && !self.coordinator.is_active() {
                    self.reset_offsets();
                    rq.add(RenderData::new(self.id, self.rect, UpdateMode::Animation));
                }

                self.dispatch_to_current(evt, hub, bus, rq, context)
            }
            _ => self.dispatch_to_current(evt, hub, bus, rq, context),
        }
    }

    fn render(&self, fb: &mut dyn Framebuffer, rect: Rectangle) {
        for frame in self.visible_frames() {
            view::render(frame, fb, rect);
        }
    }

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

    fn shift(&mut self, delta: Point) {
        self.rect += delta;
        for frame in &mut self.frames {
            frame.shift(delta);
        }
        if let Some(held) = self.slide.as_mut().and_then(|slide| slide.held.as_mut()) {
            held.shift(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BAR_BACKGROUND, WHITE};
    use crate::context::test_helpers::create_test_context;
    use crate::framebuffer::Pixmap;
    use crate::gesture::DragEvent;
    use crate::transition::ProgressOwner;
    use crate::view::navigation::path::NavigationPath;
    use crate::view::filler::Filler;
    use std::sync::mpsc::{channel, Receiver};
    use std::time::Duration;

    struct Harness {
        stack: NavigationStack<AnyRoute>,
        path: PathBinding<AnyRoute>,
        hub: Hub,
        _receiver: Receiver<Event>,
        bus: Bus,
        rq: RenderQueue,
        context: Context,
        now: Instant,
    }

    impl Harness {
        fn new() -> Harness {
            let context = create_test_context();
            let path: PathBinding<AnyRoute> = PathBinding::default();
            let stack = NavigationStack::builder(path.clone(), |rect| {
                Box::new(Filler::new(rect, WHITE)) as Box<dyn View>
            })
            .destination_for::<String, _>(|name, rect| {
                Box::new(Placeholder::new(rect, name.clone())) as Box<dyn View>
            })
            .build(&context);
            let (hub, receiver) = channel();

            Harness {
                stack,
                path,
                hub,
                _receiver: receiver,
                bus: VecDeque::new(),
                rq: RenderQueue::new(),
                context,
                now: Instant::now(),
            }
        }

        fn send(&mut self, evt: Event) -> bool {
            view::handle_event(
                &mut self.stack,
                &evt,
                &self.hub,
                &mut self.bus,
                &mut self.rq,
                &mut self.context,
            )
        }

        fn tick(&mut self, elapsed: Duration) {
            self.now += elapsed;
            self.send(Event::Tick(self.now));
        }

        fn settle(&mut self) {
            self.tick(Duration::ZERO);
            self.tick(Duration::from_secs(1));
        }

        fn push(&mut self, name: &str) {
            self.path.append(AnyRoute::new(name.to_string()));
            self.settle();
        }

        fn drag(&mut self, drag: DragEvent) -> bool {
            self.send(Event::Gesture(GestureEvent::Drag(drag)))
        }

        fn current_message(&self) -> Option<String> {
            self.stack
                .current_frame()
                .content()
                .downcast_ref::<Placeholder>()
                .map(|placeholder| placeholder.message().to_string())
        }

        fn previous_message(&self) -> Option<String> {
            self.stack
                .previous_frame()?
                .content()
                .downcast_ref::<Placeholder>()
                .map(|placeholder| placeholder.message().to_string())
        }
    }

    fn route(name: &str) -> AnyRoute {
        AnyRoute::new(name.to_string())
    }

    const EDGE: Point = pt!(5, 400);

    #[test]
    fn test_root_layout_hides_the_bar() {
        let harness = Harness::new();
        let layers = harness.stack.layers();

        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].key, FrameKey::Root);
        assert!(layers[0].bar_hidden);
        assert_eq!(
            *harness.stack.current_frame().content().rect(),
            rect![0, 44, 600, 800]
        );
    }

    #[test]
    fn test_push_resolves_destination() {
        let mut harness = Harness::new();
        harness.push("A");

        assert_eq!(harness.stack.depth(), 1);
        assert_eq!(harness.current_message().as_deref(), Some("A"));
        assert_eq!(harness.stack.current_key(), FrameKey::route(1, &route("A")));
        assert!(!harness.stack.layers()[0].bar_hidden);
    }

    #[test]
    fn test_push_slides_in_from_trailing_edge() {
        let mut harness = Harness::new();
        harness.path.append(route("A"));

        harness.tick(Duration::ZERO);
        assert!(harness.stack.is_sliding());
        assert!(harness.stack.state().is_animating());
        assert_eq!(harness.stack.state().owner(), ProgressOwner::Idle);

        let layers = harness.stack.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].key, FrameKey::Root);
        assert_eq!(layers[0].offset, 0);
        assert_eq!(layers[1].offset, 600);

        harness.tick(Duration::from_millis(175));
        let layers = harness.stack.layers();
        assert!(layers[1].offset > 0 && layers[1].offset < 600);
        assert!(layers[0].offset < 0 && layers[0].offset > -100);

        harness.tick(Duration::from_millis(175));
        assert!(!harness.stack.is_sliding());
        assert!(!harness.stack.state().is_animating());
        let layers = harness.stack.layers();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].offset, 0);
    }

    #[test]
    fn test_pop_slides_out_on_top() {
        let mut harness = Harness::new();
        harness.push("A");
        harness.path.remove_last();

        harness.tick(Duration::ZERO);
        let layers = harness.stack.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].key, FrameKey::Root);
        assert_eq!(layers[0].offset, -100);
        assert_eq!(layers[1].key, FrameKey::route(1, &route("A")));
        assert_eq!(layers[1].offset, 0);

        harness.tick(Duration::from_millis(350));
        assert_eq!(harness.stack.layers().len(), 1);
        assert_eq!(harness.stack.current_key(), FrameKey::Root);
    }

    #[test]
    fn test_back_button_pops() {
        let mut harness = Harness::new();
        harness.push("A");

        let captured = harness.send(Event::Gesture(GestureEvent::Tap(pt!(10, 10))));
        assert!(captured);
        assert_eq!(harness.path.count(), 0);

        harness.settle();
        assert_eq!(harness.stack.depth(), 0);
        assert!(harness.bus.is_empty());
    }

    #[test]
    fn test_hidden_root_bar_ignores_taps() {
        let mut harness = Harness::new();
        let captured = harness.send(Event::Gesture(GestureEvent::Tap(pt!(10, 10))));

        assert!(!captured);
        assert_eq!(harness.path.count(), 0);
    }

    #[test]
    fn test_back_event_on_root_is_harmless() {
        let mut harness = Harness::new();
        assert!(harness.send(Event::Back));
        harness.settle();
        assert_eq!(harness.stack.depth(), 0);
        assert!(!harness.stack.is_sliding());
    }

    #[test]
    fn test_swipe_scenario_commits_without_slide() {
        let mut harness = Harness::new();
        harness.push("A");
        assert_eq!(harness.current_message().as_deref(), Some("A"));

        harness.push("B");
        assert_eq!(harness.current_message().as_deref(), Some("B"));

        assert!(harness.drag(DragEvent::began(EDGE)));
        assert!(harness.drag(DragEvent::moved(EDGE, pt!(545, 400), 0.4)));
        assert!(harness.stack.state().is_interactive());
        assert!((harness.stack.state().progress() - 0.9).abs() < 1e-4);
        assert_eq!(harness.previous_message().as_deref(), Some("A"));
        assert_eq!(harness.stack.previous_key(), Some(FrameKey::route(1, &route("A"))));

        assert!(harness.drag(DragEvent::ended(EDGE, pt!(545, 400), 0.0)));
        assert_eq!(harness.stack.phase(), GesturePhase::Committing);

        harness.settle();
        assert_eq!(
            harness.path.get(),
            [route("A")].into_iter().collect::<NavigationPath<_>>()
        );
        assert!(!harness.stack.state().is_interactive());
        assert_eq!(harness.stack.state().progress(), 0.0);
        assert_eq!(harness.stack.phase(), GesturePhase::Idle);
        assert!(!harness.stack.is_sliding());
        assert_eq!(harness.current_message().as_deref(), Some("A"));
        assert_eq!(harness.stack.layers().len(), 1);
    }

    #[test]
    fn test_drag_offsets_frames() {
        let mut harness = Harness::new();
        harness.push("A");

        harness.drag(DragEvent::began(EDGE));
        harness.drag(DragEvent::moved(EDGE, pt!(305, 400), 0.4));

        let layers = harness.stack.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].key, FrameKey::Root);
        assert_eq!(layers[0].offset, -50);
        assert_eq!(layers[1].offset, 300);
    }

    #[test]
    fn test_cancelled_swipe_restores_frames() {
        let mut harness = Harness::new();
        harness.push("A");

        harness.drag(DragEvent::began(EDGE));
        harness.drag(DragEvent::moved(EDGE, pt!(305, 400), 0.4));
        harness.drag(DragEvent::ended(EDGE, pt!(305, 400), 0.4));
        assert_eq!(harness.stack.phase(), GesturePhase::Cancelling);

        harness.settle();
        assert_eq!(harness.path.count(), 1);
        assert_eq!(harness.stack.phase(), GesturePhase::Idle);
        let layers = harness.stack.layers();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].offset, 0);
    }

    #[test]
    fn test_swipe_on_root_reaches_content() {
        let mut harness = Harness::new();
        assert!(!harness.drag(DragEvent::began(EDGE)));
        assert!(!harness.stack.state().is_interactive());
    }

    #[test]
    fn test_swipe_is_ignored_during_slide() {
        let mut harness = Harness::new();
        harness.push("A");
        harness.path.append(route("B"));
        harness.tick(Duration::ZERO);

        assert!(!harness.drag(DragEvent::began(EDGE)));
        assert_eq!(harness.stack.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_content_drag_after_unfinished_swipe_does_not_pop() {
        let mut harness = Harness::new();
        harness.push("A");

        harness.drag(DragEvent::began(EDGE));
        harness.drag(DragEvent::moved(EDGE, pt!(65, 400), 0.4));
        assert_eq!(harness.stack.layers()[1].offset, 60);

        let start = pt!(300, 400);
        assert!(!harness.drag(DragEvent::began(start)));
        assert_eq!(harness.stack.phase(), GesturePhase::Idle);
        assert!(harness.stack.previous_frame().is_none());
        assert_eq!(harness.stack.layers()[0].offset, 0);

        assert!(!harness.drag(DragEvent::moved(start, pt!(400, 400), 3.0)));
        assert!(!harness.drag(DragEvent::ended(start, pt!(400, 400), 3.0)));
        harness.settle();

        assert_eq!(harness.path.count(), 1);
        assert_eq!(harness.stack.phase(), GesturePhase::Idle);
        assert_eq!(harness.current_message().as_deref(), Some("A"));
    }

    #[test]
    fn test_new_edge_swipe_restarts_from_rest() {
        let mut harness = Harness::new();
        harness.push("A");

        harness.drag(DragEvent::began(EDGE));
        harness.drag(DragEvent::moved(EDGE, pt!(305, 400), 0.4));

        let start = pt!(10, 400);
        assert!(harness.drag(DragEvent::began(start)));
        assert_eq!(harness.stack.state().progress(), 0.0);
        let layers = harness.stack.layers();
        assert_eq!(layers[0].offset, -100);
        assert_eq!(layers[1].offset, 0);
    }

    #[test]
    fn test_external_change_aborts_swipe() {
        let mut harness = Harness::new();
        harness.push("A");

        harness.drag(DragEvent::began(EDGE));
        harness.drag(DragEvent::moved(EDGE, pt!(305, 400), 0.4));
        harness.path.append(route("C"));
        harness.tick(Duration::ZERO);

        assert_eq!(harness.stack.phase(), GesturePhase::Idle);
        assert!(!harness.stack.state().is_interactive());
        assert!(harness.stack.is_sliding());
        assert_eq!(harness.path.count(), 2);

        harness.tick(Duration::from_secs(1));
        assert_eq!(harness.current_message().as_deref(), Some("C"));
    }

    #[test]
    fn test_external_change_during_commit_does_not_pop_twice() {
        let mut harness = Harness::new();
        harness.push("A");

        harness.drag(DragEvent::began(EDGE));
        harness.drag(DragEvent::moved(EDGE, pt!(545, 400), 0.4));
        harness.drag(DragEvent::ended(EDGE, pt!(545, 400), 0.0));
        harness.tick(Duration::ZERO);

        harness.path.append(route("B"));
        harness.tick(Duration::from_secs(1));
        harness.tick(Duration::from_secs(1));

        assert_eq!(harness.path.count(), 2);
        assert_eq!(harness.stack.depth(), 2);
        assert_eq!(harness.stack.state(), &InteractiveTransitionState::default());
    }

    #[test]
    fn test_change_during_slide_restarts_it() {
        let mut harness = Harness::new();
        harness.path.append(route("A"));
        harness.tick(Duration::ZERO);
        harness.tick(Duration::from_millis(100));
        let interrupted = harness.stack.current_frame().offset();
        assert!(interrupted > 0);

        harness.path.append(route("B"));
        harness.tick(Duration::ZERO);
        let layers = harness.stack.layers();
        assert_eq!(layers[1].key, FrameKey::route(2, &route("B")));
        assert_eq!(layers[1].offset, 600);
        assert_eq!(layers[0].key, FrameKey::route(1, &route("A")));
        assert_eq!(layers[0].offset, interrupted);
        assert_eq!(layers.len(), 2);

        harness.tick(Duration::from_millis(175));
        let layers = harness.stack.layers();
        assert!(layers[0].offset < interrupted);

        harness.tick(Duration::from_secs(1));
        assert_eq!(harness.stack.depth(), 2);
        assert!(!harness.stack.state().is_animating());
    }

    #[test]
    fn test_equal_routes_get_distinct_frames() {
        let mut harness = Harness::new();
        harness.push("A");
        let first = harness.stack.current_key();
        harness.push("A");

        assert_ne!(harness.stack.current_key(), first);
        assert_eq!(harness.stack.depth(), 2);
    }

    #[test]
    fn test_unresolved_route_renders_placeholder() {
        let mut harness = Harness::new();
        harness.path.append(AnyRoute::new(7i64));
        harness.settle();

        let message = harness.current_message().unwrap_or_default();
        assert!(message.contains("no destination registered"));
    }

    #[test]
    fn test_render_draws_bar_of_pushed_screen() {
        let mut harness = Harness::new();
        let mut fb = Pixmap::new(600, 800);
        harness.stack.render(&mut fb, rect![0, 0, 600, 800]);
        assert_eq!(fb.get_pixel(pt!(300, 20)), Some(WHITE.gray()));

        harness.push("A");
        harness.stack.render(&mut fb, rect![0, 0, 600, 800]);
        assert_eq!(fb.get_pixel(pt!(300, 20)), Some(BAR_BACKGROUND.gray()));
    }

    #[test]
    fn test_shift_moves_frames() {
        let mut harness = Harness::new();
        harness.push("A");
        harness.stack.shift(pt!(0, 10));

        assert_eq!(*harness.stack.rect(), rect![0, 10, 600, 810]);
        assert_eq!(*harness.stack.current_frame().rect(), rect![0, 10, 600, 810]);
    }
}
