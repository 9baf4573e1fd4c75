// src/ui/layouts/scrolling_flow.rs
//! Flow layout that the user can drag sideways

use crate::ui::core::{DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::gesture::{DragGesture, GestureUpdate, TouchSlop};
use crate::ui::layouts::flow::FlowLayout;
use crate::ui::measure::{Layout, MeasureSpec};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

/// A [`FlowLayout`] with a horizontal scroll offset driven by drag gestures.
///
/// Touches go to the children until the finger travels further than the
/// touch slop from where it went down. From then on the container owns the
/// gesture: the child that was receiving it gets `Cancel`, and every
/// further move scrolls the content by the distance moved.
///
/// The offset is not clamped to the content width.
pub struct ScrollingFlowLayout<const N: usize> {
    flow: FlowLayout<N>,
    gesture: DragGesture,
    scroll_x: i32,
    dirty: bool,
}

impl<const N: usize> Default for ScrollingFlowLayout<N> {
    fn default() -> Self {
        Self::new(TouchSlop::default())
    }
}

impl<const N: usize> ScrollingFlowLayout<N> {
    pub fn new(slop: TouchSlop) -> Self {
        Self::from_flow(FlowLayout::new(), slop)
    }

    /// Wrap an already populated flow
    pub fn from_flow(flow: FlowLayout<N>, slop: TouchSlop) -> Self {
        Self {
            flow,
            gesture: DragGesture::new(slop),
            scroll_x: 0,
            dirty: true,
        }
    }

    pub fn flow(&self) -> &FlowLayout<N> {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut FlowLayout<N> {
        &mut self.flow
    }

    pub fn touch_slop(&self) -> TouchSlop {
        self.gesture.slop()
    }

    pub fn set_touch_slop(&mut self, slop: TouchSlop) {
        self.gesture.set_slop(slop);
    }

    /// Current horizontal offset of the content, in pixels
    pub fn scroll_x(&self) -> i32 {
        self.scroll_x
    }

    pub fn scroll_by(&mut self, dx: i32) {
        self.set_scroll_x(self.scroll_x.saturating_add(dx));
    }

    pub fn set_scroll_x(&mut self, x: i32) {
        if self.scroll_x != x {
            trace!("scroll_x {} -> {}", self.scroll_x, x);
            self.scroll_x = x;
            self.dirty = true;
        }
    }

    /// True while the container owns the current gesture
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Map a point on screen to the content coordinates children are placed in
    pub fn viewport_to_content(&self, point: TouchPoint) -> Option<TouchPoint> {
        if !self.contains_point(point) {
            return None;
        }
        Some(TouchPoint::from_point(
            point.to_point() + Point::new(self.scroll_x, 0),
        ))
    }

    /// Hand an event to the children in content coordinates.
    ///
    /// Points left of the content (negative content x) hit nothing. A
    /// release there ends the child's gesture without firing it.
    fn forward(&mut self, event: TouchEvent) -> TouchResult {
        let content_x = event.point().map(|p| p.x as i32 + self.scroll_x);
        match (event, content_x) {
            (TouchEvent::Release(_), Some(x)) if x < 0 => {
                self.flow.cancel_touch();
                TouchResult::Handled
            }
            (_, Some(x)) if x < 0 => TouchResult::NotHandled,
            _ => self.flow.handle_touch(event.offset_x(self.scroll_x)),
        }
    }
}

impl<const N: usize> Layout for ScrollingFlowLayout<N> {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        self.flow.measure(width, height)
    }

    fn measured_size(&self) -> Size {
        self.flow.measured_size()
    }

    fn place(&mut self, bounds: Rectangle) {
        if self.flow.bounds() != bounds {
            self.dirty = true;
        }
        self.flow.place(bounds);
    }
}

impl<const N: usize> Drawable for ScrollingFlowLayout<N> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        // The background stays put; only the children scroll
        self.flow.draw_background(display)?;
        let mut viewport = display.clipped(&self.flow.bounds());
        let mut content = viewport.translated(Point::new(-self.scroll_x, 0));
        self.flow.draw_children(&mut content)
    }

    fn bounds(&self) -> Rectangle {
        self.flow.bounds()
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.flow.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.flow.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty || self.flow.needs_full_redraw() {
            return Some(DirtyRegion::new(self.bounds()));
        }

        // Child regions are in content space
        let region = self.flow.children_dirty_region()?;
        let on_screen = region
            .bounds
            .translate(Point::new(-self.scroll_x, 0))
            .intersection(&self.bounds());
        if on_screen.is_zero_sized() {
            None
        } else {
            Some(DirtyRegion::new(on_screen))
        }
    }
}

impl<const N: usize> Touchable for ScrollingFlowLayout<N> {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds().contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if let TouchEvent::Press(point) = event
            && !self.contains_point(point)
        {
            return TouchResult::NotHandled;
        }

        match self.gesture.on_event(event) {
            GestureUpdate::Ignored => self.forward(event),
            GestureUpdate::Pending | GestureUpdate::Finished { was_dragging: false } => {
                match self.forward(event) {
                    // Keep the gesture even if no child wanted it, so a drag
                    // can still start from empty space.
                    TouchResult::NotHandled => TouchResult::Handled,
                    result => result,
                }
            }
            GestureUpdate::Claimed => {
                self.flow.cancel_touch();
                TouchResult::Handled
            }
            GestureUpdate::Scroll(dx) => {
                self.scroll_by(dx);
                TouchResult::Handled
            }
            GestureUpdate::Finished { was_dragging: true } => TouchResult::Handled,
        }
    }
}
