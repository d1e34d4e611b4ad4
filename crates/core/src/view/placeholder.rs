use super::{Bus, Event, Hub, Id, RenderQueue, View, ID_FEEDER};
use crate::color::PLACEHOLDER_BACKGROUND;
use crate::context::Context;
use crate::framebuffer::Framebuffer;
use crate::geom::Rectangle;

/// Diagnostic stand-in for content that couldn't be built.
pub struct Placeholder {
    id: Id,
    rect: Rectangle,
    children: Vec<Box<dyn View>>,
    message: String,
}

impl Placeholder {
    pub fn new(rect: Rectangle, message: String) -> Placeholder {
        Placeholder {
            id: ID_FEEDER.next(),
            rect,
            children: Vec::new(),
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl View for Placeholder {
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
        fb.draw_rectangle(&rect, PLACEHOLDER_BACKGROUND);
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
