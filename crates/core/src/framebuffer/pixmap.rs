use super::Framebuffer;
use crate::color::{Color, WHITE};
use crate::geom::{Point, Rectangle};

/// In-memory grey surface.
#[derive(Debug, Clone)]
pub struct Pixmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Pixmap {
        let len = (width * height) as usize;
        Pixmap {
            width,
            height,
            data: vec![WHITE.gray(); len],
        }
    }

    pub fn try_new(width: u32, height: u32) -> Option<Pixmap> {
        let mut data = Vec::new();
        let len = (width * height) as usize;
        data.try_reserve_exact(len).ok()?;
        data.resize(len, WHITE.gray());
        Some(Pixmap {
            width,
            height,
            data,
        })
    }

    /// Returns the grey level at `pt`, or `None` outside the surface.
    pub fn get_pixel(&self, pt: Point) -> Option<u8> {
        if pt.x < 0 || pt.y < 0 || pt.x >= self.width as i32 || pt.y >= self.height as i32 {
            return None;
        }

        let addr = (pt.y as u32 * self.width + pt.x as u32) as usize;
        self.data.get(addr).copied()
    }

    pub fn clear(&mut self, color: Color) {
        self.data.fill(color.gray());
    }
}

impl Framebuffer for Pixmap {
    fn draw_rectangle(&mut self, rect: &Rectangle, color: Color) {
        let Some(rect) = rect.intersection(&self.rect()) else {
            return;
        };

        for y in rect.min.y..rect.max.y {
            let start = (y as u32 * self.width + rect.min.x as u32) as usize;
            let end = start + rect.width() as usize;
            self.data[start..end].fill(color.gray());
        }
    }

    fn dims(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
