// src/ui/core.rs
//! Core UI traits and types for the flowclock widgets

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Build a touch point from a signed display point, clamping to the
    /// positive quadrant.
    pub fn from_point(point: Point) -> Self {
        Self {
            x: point.x.clamp(0, u16::MAX as i32) as u16,
            y: point.y.clamp(0, u16::MAX as i32) as u16,
        }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events that can occur on the UI
///
/// A gesture always starts with `Press`, carries any number of `Move`s and
/// ends with either `Release` or `Cancel`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Pointer moved while pressed
    Move(TouchPoint),
    /// Pointer lifted
    Release(TouchPoint),
    /// Gesture taken away by a parent or aborted by the host
    Cancel,
}

impl TouchEvent {
    /// Position carried by the event, if any
    pub fn point(&self) -> Option<TouchPoint> {
        match self {
            TouchEvent::Press(p) | TouchEvent::Move(p) | TouchEvent::Release(p) => Some(*p),
            TouchEvent::Cancel => None,
        }
    }

    /// Same event with its position shifted horizontally by `dx` pixels
    pub fn offset_x(self, dx: i32) -> Self {
        let shift = |p: TouchPoint| {
            TouchPoint::from_point(Point::new(p.x as i32 + dx, p.y as i32))
        };
        match self {
            TouchEvent::Press(p) => TouchEvent::Press(shift(p)),
            TouchEvent::Move(p) => TouchEvent::Move(shift(p)),
            TouchEvent::Release(p) => TouchEvent::Release(shift(p)),
            TouchEvent::Cancel => TouchEvent::Cancel,
        }
    }

    /// True for the events that end a gesture
    pub fn ends_gesture(&self) -> bool {
        matches!(self, TouchEvent::Release(_) | TouchEvent::Cancel)
    }
}

/// Result from handling a touch event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchResult {
    /// Event was handled by this element
    Handled,
    /// Event was not handled, pass to next element
    NotHandled,
    /// Event triggered an action
    Action(Action),
}

impl TouchResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, TouchResult::NotHandled)
    }
}

/// Actions that UI elements can trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A tapped button, identified by the id it was built with
    Tap(u16),
}

/// Dirty region tracking for efficient rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyRegion {
    pub bounds: Rectangle,
    pub is_dirty: bool,
}

impl DirtyRegion {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            is_dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Expand this dirty region to include another region
    pub fn expand_to_include(&mut self, other: Rectangle) {
        if !self.is_dirty {
            self.bounds = other;
            self.is_dirty = true;
        } else {
            let min_x = self.bounds.top_left.x.min(other.top_left.x);
            let min_y = self.bounds.top_left.y.min(other.top_left.y);

            let max_x = (self.bounds.top_left.x + self.bounds.size.width as i32)
                .max(other.top_left.x + other.size.width as i32);
            let max_y = (self.bounds.top_left.y + self.bounds.size.height as i32)
                .max(other.top_left.y + other.size.height as i32);

            self.bounds = Rectangle::new(
                Point::new(min_x, min_y),
                Size::new((max_x - min_x) as u32, (max_y - min_y) as u32),
            );
        }
    }
}

/// Trait for any UI element that can be drawn
pub trait Drawable {
    /// Draw the element to the display within its placed bounds
    fn draw<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);

    /// Get the dirty region for partial updates
    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.is_dirty() {
            Some(DirtyRegion::new(self.bounds()))
        } else {
            None
        }
    }
}

/// Trait for UI elements that respond to touch events
pub trait Touchable {
    /// Check if a point is within this element's bounds
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event, returns result indicating if handled and any action
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}
