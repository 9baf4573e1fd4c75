// src/ui/layouts/flow.rs
//! Flow layout: children left to right, wrapping onto new lines

use crate::time::TimeSource;
use crate::ui::core::{DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::elements::Element;
use crate::ui::layouts::LayoutError;
use crate::ui::measure::{Layout, MeasureSpec};
use crate::ui::styling::{Padding, Style};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use log::{debug, warn};

/// Width constraint for flow layout children
///
/// - `Fit`: the child's natural width, limited by the room left on the line
/// - `Expand`: exactly the room left on the line
/// - `Fixed(n)`: exactly n pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeConstraint {
    /// Fit to content size
    Fit,
    /// Fill the rest of the current line
    Expand,
    /// Fixed width in pixels
    Fixed(u32),
}

impl SizeConstraint {
    /// Width spec for a child with `available` pixels left on its line
    pub fn width_spec(&self, available: u32) -> MeasureSpec {
        match self {
            SizeConstraint::Fit => MeasureSpec::at_most(available),
            SizeConstraint::Expand => MeasureSpec::exact(available),
            SizeConstraint::Fixed(px) => MeasureSpec::exact(*px),
        }
    }
}

/// Child element with its layout parameters
pub struct FlowChild {
    element: Element,
    constraint: SizeConstraint,
    visible: bool,
    line: usize,
}

impl FlowChild {
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn constraint(&self) -> SizeConstraint {
        self.constraint
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Line bookkeeping shared by the measure pass
#[derive(Default)]
struct LineState {
    used: u32,
    height: u32,
    items: usize,
}

/// Container that packs children into lines
///
/// Children are placed left to right in insertion order. When the next
/// child does not fit in what is left of the line it starts a new one.
/// Invisible children take no space.
///
/// # Type Parameters
/// - `N`: Maximum number of child elements (compile-time constant)
///
/// # Examples
/// ```ignore
/// let mut flow = FlowLayout::<8>::new();
/// flow.add_child(Element::label("tag", TextSize::Small), SizeConstraint::Fit)?;
/// flow.add_child(Element::button("Go", Action::Tap(1)), SizeConstraint::Expand)?;
/// layout_in(&mut flow, Rectangle::new(Point::zero(), Size::new(320, 240)));
/// ```
pub struct FlowLayout<const N: usize> {
    bounds: Rectangle,
    measured: Size,
    style: Style,
    children: Vec<FlowChild, N>,
    line_count: usize,
    touch_target: Option<usize>,
    dirty: bool,
}

impl<const N: usize> Default for FlowLayout<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FlowLayout<N> {
    pub fn new() -> Self {
        Self {
            bounds: Rectangle::zero(),
            measured: Size::zero(),
            style: Style::default(),
            children: Vec::new(),
            line_count: 0,
            touch_target: None,
            dirty: true,
        }
    }

    /// Background, border and padding
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.style.padding = padding;
        self.dirty = true;
        self
    }

    /// Append a child.
    ///
    /// Returns the child's index, or `CapacityExceeded` once `N` children
    /// are held. The caller re-runs layout afterwards.
    pub fn add_child(
        &mut self,
        element: impl Into<Element>,
        constraint: SizeConstraint,
    ) -> Result<usize, LayoutError> {
        let child = FlowChild {
            element: element.into(),
            constraint,
            visible: true,
            line: 0,
        };
        self.children
            .push(child)
            .map_err(|_| LayoutError::CapacityExceeded { capacity: N })?;
        self.dirty = true;
        Ok(self.children.len() - 1)
    }

    /// Remove and return the child at `index`; later children shift down.
    pub fn remove_child(&mut self, index: usize) -> Result<Element, LayoutError> {
        if index >= self.children.len() {
            return Err(LayoutError::NoSuchChild(index));
        }
        self.touch_target = None;
        self.dirty = true;
        Ok(self.children.remove(index).element)
    }

    /// Hidden children are skipped by measure, layout, drawing and touch.
    pub fn set_child_visible(&mut self, index: usize, visible: bool) -> Result<(), LayoutError> {
        let child = self
            .children
            .get_mut(index)
            .ok_or(LayoutError::NoSuchChild(index))?;
        if child.visible != visible {
            child.visible = visible;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&FlowChild> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index).map(|c| &mut c.element)
    }

    /// All child elements, visible or not
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().map(|c| &mut c.element)
    }

    /// Get the placed bounds for a child at the given index.
    pub fn child_bounds(&self, index: usize) -> Option<Rectangle> {
        self.children.get(index).map(|c| c.element.bounds())
    }

    /// Line (0-based) the child was placed on by the last layout pass
    pub fn child_line(&self, index: usize) -> Option<usize> {
        self.children
            .get(index)
            .filter(|c| c.visible)
            .map(|c| c.line)
    }

    /// Number of lines produced by the last measure pass
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    fn content_area(&self) -> Rectangle {
        let padding = self.style.padding;
        Rectangle::new(
            self.bounds.top_left + Point::new(padding.left as i32, padding.top as i32),
            Size::new(
                self.bounds.size.width.saturating_sub(padding.horizontal()),
                self.bounds.size.height.saturating_sub(padding.vertical()),
            ),
        )
    }

    /// No width limit: everything goes on one line
    fn measure_single_line(&mut self, height: MeasureSpec) -> Size {
        let mut width = 0u32;
        let mut line_height = 0u32;
        let mut items = 0usize;

        for child in self.children.iter_mut().filter(|c| c.visible) {
            let width_spec = match child.constraint {
                SizeConstraint::Fixed(px) => MeasureSpec::exact(px),
                SizeConstraint::Fit | SizeConstraint::Expand => MeasureSpec::unspecified(),
            };
            let size = child.element.measure(width_spec, height);
            width = width.saturating_add(size.width);
            line_height = line_height.max(size.height);
            items += 1;
        }

        self.line_count = usize::from(items > 0);
        Size::new(width, line_height)
    }

    /// Forward pass over the children, one line at a time.
    ///
    /// A child is measured against the room left on the current line. If it
    /// cannot fit and the line already holds something, the line is closed
    /// and the child is measured once more against a fresh line. A fresh
    /// line is the widest a child can get, so no child is measured more
    /// than twice.
    fn measure_wrapped(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let max_width = width.size;
        let height_spec = |remaining: u32| {
            if height.is_unspecified() {
                MeasureSpec::unspecified()
            } else {
                MeasureSpec::at_most(remaining)
            }
        };

        let mut remaining_height = height.size;
        let mut total_height = 0u32;
        let mut lines = 0usize;
        let mut wrapped = false;
        let mut line = LineState::default();

        for (index, child) in self
            .children
            .iter_mut()
            .enumerate()
            .filter(|(_, c)| c.visible)
        {
            let mut remaining = max_width.saturating_sub(line.used);

            if line.items > 0 {
                let fits = match child.constraint {
                    SizeConstraint::Expand => remaining > 0,
                    SizeConstraint::Fixed(px) => px <= remaining,
                    SizeConstraint::Fit => {
                        let probe = child.element.measure(
                            MeasureSpec::at_most(max_width),
                            height_spec(remaining_height),
                        );
                        probe.width <= remaining
                    }
                };

                if !fits {
                    total_height = total_height.saturating_add(line.height);
                    remaining_height = remaining_height.saturating_sub(line.height);
                    lines += 1;
                    wrapped = true;
                    line = LineState::default();
                    remaining = max_width;
                }
            }

            let size = child.element.measure(
                child.constraint.width_spec(remaining),
                height_spec(remaining_height),
            );
            if size.width > remaining {
                warn!(
                    "flow child {} is {}px wide but only {}px are available; placing it anyway",
                    index, size.width, remaining
                );
            }

            line.used = line.used.saturating_add(size.width);
            line.height = line.height.max(size.height);
            line.items += 1;
        }

        if line.items > 0 {
            total_height = total_height.saturating_add(line.height);
            lines += 1;
        }

        self.line_count = lines;
        let content_width = if wrapped { max_width } else { line.used };
        Size::new(content_width, total_height)
    }

    /// Paint the container's own background and border over its bounds
    pub fn draw_background<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        if self.style.has_fill_or_border() {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }
        Ok(())
    }

    /// Draw the visible children, without the container background
    pub fn draw_children<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        for child in self.children.iter().filter(|c| c.visible) {
            child.element.draw(display)?;
        }
        Ok(())
    }

    /// True when the container itself changed (children, visibility,
    /// bounds), as opposed to one of its children
    pub fn needs_full_redraw(&self) -> bool {
        self.dirty
    }

    /// Union of the visible children's dirty regions
    pub fn children_dirty_region(&self) -> Option<DirtyRegion> {
        let mut region: Option<DirtyRegion> = None;
        for child in self.children.iter().filter(|c| c.visible) {
            if let Some(child_region) = child.element.dirty_region() {
                match region {
                    Some(ref mut r) => r.expand_to_include(child_region.bounds),
                    None => region = Some(child_region),
                }
            }
        }
        region
    }

    /// Give every clock among the children a chance to start its next frame.
    ///
    /// Returns true if any clock became dirty.
    pub fn poll_redraw<T: TimeSource>(&mut self, time: &T) -> bool {
        let mut redraw = false;
        for clock in self.elements_mut().filter_map(Element::as_clock_mut) {
            redraw |= clock.poll_redraw(time);
        }
        redraw
    }

    /// Send `Cancel` to whichever child is receiving the current gesture
    pub fn cancel_touch(&mut self) {
        if let Some(index) = self.touch_target.take()
            && let Some(child) = self.children.get_mut(index)
        {
            child.element.handle_touch(TouchEvent::Cancel);
        }
    }

    /// Index of the child receiving the current gesture
    pub fn touch_target(&self) -> Option<usize> {
        self.touch_target
    }
}

impl<const N: usize> Layout for FlowLayout<N> {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let padding = self.style.padding;
        let content_width = width.shrink(padding.horizontal());
        let content_height = height.shrink(padding.vertical());

        let content = if content_width.is_unspecified() {
            self.measure_single_line(content_height)
        } else {
            self.measure_wrapped(content_width, content_height)
        };

        self.measured = Size::new(
            width.resolve(content.width.saturating_add(padding.horizontal())),
            height.resolve(content.height.saturating_add(padding.vertical())),
        );
        debug!(
            "flow measured {}x{} in {} line(s)",
            self.measured.width, self.measured.height, self.line_count
        );
        self.measured
    }

    fn measured_size(&self) -> Size {
        self.measured
    }

    fn place(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }

        let content = self.content_area();
        let width = content.size.width;
        let mut cursor = Point::zero();
        let mut line = 0usize;
        let mut line_height = 0u32;
        let mut items_on_line = 0usize;

        for child in self.children.iter_mut().filter(|c| c.visible) {
            let size = child.element.measured_size();

            if items_on_line > 0 && cursor.x as u32 + size.width > width {
                cursor = Point::new(0, cursor.y + line_height as i32);
                line += 1;
                line_height = 0;
                items_on_line = 0;
            }

            child
                .element
                .place(Rectangle::new(content.top_left + cursor, size));
            child.line = line;

            cursor.x += size.width as i32;
            line_height = line_height.max(size.height);
            items_on_line += 1;
        }
    }
}

impl<const N: usize> Drawable for FlowLayout<N> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.draw_background(display)?;
        self.draw_children(display)
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self
                .children
                .iter()
                .any(|c| c.visible && c.element.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        for child in self.children.iter_mut().filter(|c| c.visible) {
            child.element.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            return Some(DirtyRegion::new(self.bounds));
        }
        self.children_dirty_region()
    }
}

impl<const N: usize> Touchable for FlowLayout<N> {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    /// Route a gesture to the child under the press.
    ///
    /// The press goes to the topmost visible child that contains it and
    /// accepts it; the rest of the gesture follows that child.
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) => {
                self.touch_target = None;
                for (index, child) in self.children.iter_mut().enumerate().rev() {
                    if !child.visible || !child.element.contains_point(point) {
                        continue;
                    }
                    let result = child.element.handle_touch(event);
                    if result.is_handled() {
                        self.touch_target = Some(index);
                        return result;
                    }
                }
                TouchResult::NotHandled
            }
            _ => {
                let Some(index) = self.touch_target else {
                    return TouchResult::NotHandled;
                };
                if event.ends_gesture() {
                    self.touch_target = None;
                }
                match self.children.get_mut(index) {
                    Some(child) => child.element.handle_touch(event),
                    None => TouchResult::NotHandled,
                }
            }
        }
    }
}
