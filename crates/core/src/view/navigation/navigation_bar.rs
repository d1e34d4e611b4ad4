use crate::color::BAR_BACKGROUND;
use crate::context::Context;
use crate::framebuffer::Framebuffer;
use crate::geom::Rectangle;
use crate::view::button::Button;
use crate::view::{Bus, Event, Hub, Id, RenderQueue, View, ID_FEEDER};

/// Top bar of a stacked screen.
///
/// Pushed screens get a square back button on the leading side that sends
/// [`Event::Back`]. The root screen's bar is hidden: it still takes its place
/// in the layout but draws nothing and has no button.
pub struct NavigationBar {
    id: Id,
    rect: Rectangle,
    children: Vec<Box<dyn View>>,
    hidden: bool,
}

impl NavigationBar {
    pub fn new(rect: Rectangle, hidden: bool) -> NavigationBar {
        let mut children = Vec::new();

        if !hidden {
            let side = rect.height() as i32;
            let back_rect = rect![rect.min.x, rect.min.y, rect.min.x + side, rect.max.y];
            children.push(Box::new(Button::new(back_rect, Event::Back)) as Box<dyn View>);
        }

        NavigationBar {
            id: ID_FEEDER.next(),
            rect,
            children,
            hidden,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn back_button(&self) -> Option<&Button> {
        self.children
            .first()
            .and_then(|child| child.downcast_ref::<Button>())
    }
}

impl View for NavigationBar {
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
        if self.hidden {
            return;
        }

        fb.draw_rectangle(&rect, BAR_BACKGROUND);
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
