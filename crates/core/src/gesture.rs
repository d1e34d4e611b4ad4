//! Gesture events reported by the host.
//!
//! Recognition itself happens outside this crate: the platform layer turns raw
//! touches into taps and drag sequences and feeds them to the view tree wrapped
//! in [`crate::view::Event::Gesture`].

use crate::geom::Point;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DragPhase {
    Began,
    Moved,
    Ended,
    /// The platform aborted the touch sequence.
    Cancelled,
}

/// One sample of a single-finger drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragEvent {
    pub phase: DragPhase,
    /// Where the touch sequence started.
    pub start: Point,
    /// Current touch location.
    pub location: Point,
    /// Horizontal velocity in units per millisecond, positive to the right.
    pub velocity: f32,
}

impl DragEvent {
    pub fn began(start: Point) -> DragEvent {
        DragEvent {
            phase: DragPhase::Began,
            start,
            location: start,
            velocity: 0.0,
        }
    }

    pub fn moved(start: Point, location: Point, velocity: f32) -> DragEvent {
        DragEvent {
            phase: DragPhase::Moved,
            start,
            location,
            velocity,
        }
    }

    pub fn ended(start: Point, location: Point, velocity: f32) -> DragEvent {
        DragEvent {
            phase: DragPhase::Ended,
            start,
            location,
            velocity,
        }
    }

    pub fn cancelled(start: Point, location: Point) -> DragEvent {
        DragEvent {
            phase: DragPhase::Cancelled,
            start,
            location,
            velocity: 0.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureEvent {
    Tap(Point),
    Drag(DragEvent),
}
