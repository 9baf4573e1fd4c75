// src/ui/elements.rs
//! Concrete UI element enum.
//!
//! Layout containers own heterogeneous children *without* trait objects.
//! `DrawTarget` is generic, which makes our `Drawable` trait not
//! object-safe, so the built-in widgets are wrapped in this enum instead.

use crate::ui::components::{Button, ClockView, Label, TextSize};
use crate::ui::core::{
    Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable,
};
use crate::ui::measure::{Layout, MeasureSpec};
use crate::ui::styling::Style;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// A box with a preferred size that draws an optional style.
pub struct Spacer {
    natural: Size,
    measured: Size,
    bounds: Rectangle,
    style: Style,
    dirty: bool,
}

impl Spacer {
    pub fn new(natural: Size) -> Self {
        Self {
            natural,
            measured: Size::zero(),
            bounds: Rectangle::zero(),
            style: Style::new(),
            dirty: true,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn natural_size(&self) -> Size {
        self.natural
    }
}

/// A concrete, layout-friendly UI element.
pub enum Element {
    Label(Label),
    Button(Button),
    Clock(ClockView),
    /// A layout-only element that draws nothing unless styled.
    Spacer(Spacer),
}

impl Element {
    /// Convenience constructor: text label.
    pub fn label(text: &str, size: TextSize) -> Self {
        Self::Label(Label::new(text, size))
    }

    /// Convenience constructor: button element.
    pub fn button(label: &str, action: Action) -> Self {
        Self::Button(Button::new(label, action))
    }

    /// Convenience constructor: spacer with a preferred size.
    pub fn spacer(natural: Size) -> Self {
        Self::Spacer(Spacer::new(natural))
    }

    pub fn as_clock_mut(&mut self) -> Option<&mut ClockView> {
        match self {
            Element::Clock(clock) => Some(clock),
            _ => None,
        }
    }
}

impl From<Label> for Element {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

impl From<Button> for Element {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<ClockView> for Element {
    fn from(clock: ClockView) -> Self {
        Self::Clock(clock)
    }
}

impl From<Spacer> for Element {
    fn from(spacer: Spacer) -> Self {
        Self::Spacer(spacer)
    }
}

impl Layout for Element {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        match self {
            Element::Label(l) => l.measure(width, height),
            Element::Button(b) => b.measure(width, height),
            Element::Clock(c) => c.measure(width, height),
            Element::Spacer(s) => {
                s.measured = Size::new(
                    width.resolve(s.natural.width),
                    height.resolve(s.natural.height),
                );
                s.measured
            }
        }
    }

    fn measured_size(&self) -> Size {
        match self {
            Element::Label(l) => l.measured_size(),
            Element::Button(b) => b.measured_size(),
            Element::Clock(c) => c.measured_size(),
            Element::Spacer(s) => s.measured,
        }
    }

    fn place(&mut self, bounds: Rectangle) {
        match self {
            Element::Label(l) => l.place(bounds),
            Element::Button(b) => b.place(bounds),
            Element::Clock(c) => c.place(bounds),
            Element::Spacer(s) => {
                if s.bounds != bounds {
                    s.bounds = bounds;
                    s.dirty = true;
                }
            }
        }
    }
}

impl Drawable for Element {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        match self {
            Element::Label(l) => l.draw(display),
            Element::Button(b) => b.draw(display),
            Element::Clock(c) => c.draw(display),
            Element::Spacer(s) => {
                if s.style.has_fill_or_border() {
                    s.bounds
                        .into_styled(s.style.to_primitive_style())
                        .draw(display)?;
                }
                Ok(())
            }
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            Element::Label(l) => l.bounds(),
            Element::Button(b) => b.bounds(),
            Element::Clock(c) => c.bounds(),
            Element::Spacer(s) => s.bounds,
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            Element::Label(l) => l.is_dirty(),
            Element::Button(b) => b.is_dirty(),
            Element::Clock(c) => c.is_dirty(),
            Element::Spacer(s) => s.dirty,
        }
    }

    fn mark_clean(&mut self) {
        match self {
            Element::Label(l) => l.mark_clean(),
            Element::Button(b) => b.mark_clean(),
            Element::Clock(c) => c.mark_clean(),
            Element::Spacer(s) => s.dirty = false,
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            Element::Label(l) => l.mark_dirty(),
            Element::Button(b) => b.mark_dirty(),
            Element::Clock(c) => c.mark_dirty(),
            Element::Spacer(s) => s.dirty = true,
        }
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        match self {
            Element::Label(l) => l.dirty_region(),
            Element::Button(b) => b.dirty_region(),
            Element::Clock(c) => c.dirty_region(),
            Element::Spacer(s) => {
                if s.dirty {
                    Some(DirtyRegion::new(s.bounds))
                } else {
                    None
                }
            }
        }
    }
}

impl Touchable for Element {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds().contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match self {
            Element::Button(b) => b.handle_touch(event),
            Element::Label(_) | Element::Clock(_) | Element::Spacer(_) => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacer_resolves_natural_size() {
        let mut spacer = Element::spacer(Size::new(40, 20));
        assert_eq!(
            spacer.measure(MeasureSpec::at_most(30), MeasureSpec::unspecified()),
            Size::new(30, 20)
        );
        assert_eq!(
            spacer.measure(MeasureSpec::unspecified(), MeasureSpec::exact(5)),
            Size::new(40, 5)
        );
        assert_eq!(spacer.measured_size(), Size::new(40, 5));
    }

    #[test]
    fn test_only_buttons_take_touch() {
        let mut label = Element::label("hi", TextSize::Small);
        assert_eq!(
            label.handle_touch(TouchEvent::Press(TouchPoint::new(0, 0))),
            TouchResult::NotHandled
        );
    }
}
