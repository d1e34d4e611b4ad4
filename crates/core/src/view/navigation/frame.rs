use super::navigation_bar::NavigationBar;
use super::route::FrameKey;
use crate::color::WHITE;
use crate::context::Context;
use crate::framebuffer::Framebuffer;
use crate::geom::Rectangle;
use crate::view::{Bus, Event, Hub, Id, RenderQueue, View, ID_FEEDER};

/// One screen of a navigation stack: its navigation bar above the content
/// built by a destination.
///
/// Frames slide horizontally. `offset` is the current displacement from the
/// stack's rect and is applied by shifting the whole subtree.
pub struct StackFrame {
    id: Id,
    rect: Rectangle,
    children: Vec<Box<dyn View>>,
    key: FrameKey,
    offset: i32,
}

impl StackFrame {
    /// Area left to the content below a bar of `bar_height`.
    pub fn content_rect(rect: &Rectangle, bar_height: u32) -> Rectangle {
        let bar_bottom = (rect.min.y + bar_height as i32).min(rect.max.y);
        rect![rect.min.x, bar_bottom, rect.max.x, rect.max.y]
    }

    pub fn new(key: FrameKey, rect: Rectangle, content: Box<dyn View>, bar_height: u32) -> StackFrame {
        let bar_bottom = (rect.min.y + bar_height as i32).min(rect.max.y);
        let bar_rect = rect![rect.min.x, rect.min.y, rect.max.x, bar_bottom];
        let bar = NavigationBar::new(bar_rect, key == FrameKey::Root);

        StackFrame {
            id: ID_FEEDER.next(),
            rect,
            children: vec![content, Box::new(bar) as Box<dyn View>],
            key,
            offset: 0,
        }
    }

    pub fn key(&self) -> FrameKey {
        self.key
    }

    pub fn depth(&self) -> usize {
        self.key.depth()
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Moves the frame to `offset` units right of its resting position.
    pub fn set_offset(&mut self, offset: i32) {
        let delta = offset - self.offset;
        if delta != 0 {
            self.shift(pt!(delta, 0));
            self.offset = offset;
        }
    }

    pub fn content(&self) -> &dyn View {
        self.children[0].as_ref()
    }

    pub fn bar(&self) -> Option<&NavigationBar> {
        self.children[1].downcast_ref::<NavigationBar>()
    }

    pub fn is_bar_hidden(&self) -> bool {
        self.bar().map_or(true, NavigationBar::is_hidden)
    }
}

impl View for StackFrame {
    fn handle_event(
        &mut self,
        _evt: &Event,
        _hub: &Hub,
        _bus: &mut Bus,
        _rq: &mut RenderQueue,
        _context: &mut Context,
    ) -> bool {
        false
    }

    fn render(&self, fb: &mut dyn Framebuffer, rect: Rectangle) {
        fb.draw_rectangle(&rect, WHITE);
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
}
