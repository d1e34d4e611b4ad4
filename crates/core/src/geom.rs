//! Integer geometry used for layout and hit testing.

use std::ops::{Add, AddAssign, Sub, SubAssign};

#[macro_export]
macro_rules! pt {
    ($x:expr, $y:expr $(,)*) => {
        $crate::geom::Point::new($x, $y)
    };
    ($a:expr) => {
        $crate::geom::Point::new($a, $a)
    };
}

#[macro_export]
macro_rules! rect {
    ($x0:expr, $y0:expr, $x1:expr, $y1:expr $(,)*) => {
        $crate::geom::Rectangle::new($crate::pt!($x0, $y0), $crate::pt!($x1, $y1))
    };
    ($min:expr, $max:expr $(,)*) => {
        $crate::geom::Rectangle::new($min, $max)
    };
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        pt!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        pt!(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Half-open rectangle: `min` is inside, `max` is outside.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    pub const fn new(min: Point, max: Point) -> Rectangle {
        Rectangle { min, max }
    }

    pub fn from_dims(width: u32, height: u32) -> Rectangle {
        rect![0, 0, width as i32, height as i32]
    }

    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y).max(0) as u32
    }

    pub fn includes(&self, pt: Point) -> bool {
        self.min.x <= pt.x && pt.x < self.max.x && self.min.y <= pt.y && pt.y < self.max.y
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Returns the overlapping part of both rectangles, if any.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let rect = rect![
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y)
        ];

        if rect.is_empty() {
            None
        } else {
            Some(rect)
        }
    }
}

impl AddAssign<Point> for Rectangle {
    fn add_assign(&mut self, rhs: Point) {
        self.min += rhs;
        self.max += rhs;
    }
}

impl SubAssign<Point> for Rectangle {
    fn sub_assign(&mut self, rhs: Point) {
        self.min = self.min - rhs;
        self.max = self.max - rhs;
    }
}

impl Add<Point> for Rectangle {
    type Output = Rectangle;

    fn add(self, rhs: Point) -> Rectangle {
        rect![self.min + rhs, self.max + rhs]
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
