//! Drawing surface abstraction.
//!
//! The navigation stack only needs to fill rectangles: content views are
//! consumer-supplied and draw themselves through the same trait.

mod pixmap;

pub use self::pixmap::Pixmap;

use crate::color::Color;
use crate::geom::Rectangle;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UpdateMode {
    /// Redraw only the damaged area.
    Partial,
    /// Redraw the area as part of an animation frame.
    Animation,
    Full,
}

pub trait Framebuffer {
    /// Fills `rect`, clipped to the surface bounds.
    fn draw_rectangle(&mut self, rect: &Rectangle, color: Color);

    fn dims(&self) -> (u32, u32);

    fn rect(&self) -> Rectangle {
        let (width, height) = self.dims();
        Rectangle::from_dims(width, height)
    }
}
