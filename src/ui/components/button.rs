// src/ui/components/button.rs
//! Button component that fires its action on tap

use crate::ui::core::{
    Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable,
};
use crate::ui::measure::{Layout, MeasureSpec};
use crate::ui::styling::{ButtonVariant, ColorPalette, Style};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment as TextAlignment, Baseline, Text, TextStyleBuilder};

/// Button state
#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Normal,
    Pressed,
    Disabled,
}

/// Button component with label and action
///
/// The action fires when a press that started on the button is released
/// over it. A `Cancel` (for example when a scrolling parent claims the
/// gesture) drops the press without firing.
pub struct Button {
    bounds: Rectangle,
    measured: Size,
    label: heapless::String<32>,
    action: Action,
    state: ButtonState,
    variant: ButtonVariant,
    palette: ColorPalette,
    border_radius: u32,
    dirty: bool,
}

impl Button {
    pub fn new(label: &str, action: Action) -> Self {
        let mut label_string = heapless::String::new();
        label_string.push_str(label).ok();

        Self {
            bounds: Rectangle::zero(),
            measured: Size::zero(),
            label: label_string,
            action,
            state: ButtonState::Normal,
            variant: ButtonVariant::Primary,
            palette: ColorPalette::default(),
            border_radius: 6,
            dirty: true,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self.dirty = true;
        self
    }

    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self.dirty = true;
        self
    }

    pub fn with_border_radius(mut self, radius: u32) -> Self {
        self.border_radius = radius;
        self.dirty = true;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        let new_state = if enabled {
            ButtonState::Normal
        } else {
            ButtonState::Disabled
        };

        if self.state != new_state {
            self.state = new_state;
            self.dirty = true;
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, ButtonState::Disabled)
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, ButtonState::Pressed)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn set_state(&mut self, state: ButtonState) {
        if self.state != state {
            self.state = state;
            self.dirty = true;
        }
    }

    fn get_style(&self) -> Style {
        let base_style = self.variant.to_style(&self.palette);

        match self.state {
            ButtonState::Normal => base_style,
            ButtonState::Pressed => {
                // Darken the background for pressed state
                let bg = base_style.background_color.unwrap_or(self.palette.primary);
                let darkened = Rgb565::new(
                    bg.r().saturating_sub(4),
                    bg.g().saturating_sub(8),
                    bg.b().saturating_sub(4),
                );
                base_style.with_background(darkened)
            }
            ButtonState::Disabled => base_style
                .with_background(self.palette.surface)
                .with_foreground(self.palette.text_secondary),
        }
    }
}

impl Layout for Button {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let padding = self.variant.to_style(&self.palette).padding;
        let glyph = FONT_6X10.character_size;
        let chars = self.label.chars().count() as u32;

        self.measured = Size::new(
            width.resolve(chars * glyph.width + padding.horizontal()),
            height.resolve(glyph.height + padding.vertical()),
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
    }
}

impl Drawable for Button {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = self.get_style();

        let corner_radius = Size::new(self.border_radius, self.border_radius);
        RoundedRectangle::with_equal_corners(self.bounds, corner_radius)
            .into_styled(style.to_primitive_style())
            .draw(display)?;

        let text_color = style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(&FONT_6X10, text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(TextAlignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.label, self.bounds.center(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            Some(DirtyRegion::new(self.bounds))
        } else {
            None
        }
    }
}

impl Touchable for Button {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if !self.is_enabled() {
            return TouchResult::NotHandled;
        }

        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.set_state(ButtonState::Pressed);
                TouchResult::Handled
            }
            TouchEvent::Move(point) => {
                // Track whether the pointer is still over the button
                let new_state = if self.contains_point(point) {
                    ButtonState::Pressed
                } else {
                    ButtonState::Normal
                };
                self.set_state(new_state);
                TouchResult::Handled
            }
            TouchEvent::Release(point) if self.is_pressed() => {
                self.set_state(ButtonState::Normal);
                if self.contains_point(point) {
                    TouchResult::Action(self.action)
                } else {
                    TouchResult::Handled
                }
            }
            TouchEvent::Cancel => {
                self.set_state(ButtonState::Normal);
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed_button() -> Button {
        let mut button = Button::new("OK", Action::Tap(7));
        let size = button.measure(MeasureSpec::unspecified(), MeasureSpec::unspecified());
        button.place(Rectangle::new(Point::new(10, 10), size));
        button
    }

    #[test]
    fn test_measure_includes_padding() {
        let mut button = Button::new("OK", Action::Tap(1));
        // Primary variant pads 6px vertically and 10px horizontally
        let size = button.measure(MeasureSpec::unspecified(), MeasureSpec::unspecified());
        assert_eq!(size, Size::new(32, 22));

        let size = button.measure(MeasureSpec::exact(50), MeasureSpec::at_most(12));
        assert_eq!(size, Size::new(50, 12));
    }

    #[test]
    fn test_tap_fires_on_release() {
        let mut button = placed_button();
        let inside = TouchPoint::new(15, 15);

        assert_eq!(button.handle_touch(TouchEvent::Press(inside)), TouchResult::Handled);
        assert!(button.is_pressed());
        assert_eq!(
            button.handle_touch(TouchEvent::Release(inside)),
            TouchResult::Action(Action::Tap(7))
        );
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_cancel_suppresses_action() {
        let mut button = placed_button();
        let inside = TouchPoint::new(15, 15);

        button.handle_touch(TouchEvent::Press(inside));
        button.handle_touch(TouchEvent::Cancel);
        assert_eq!(
            button.handle_touch(TouchEvent::Release(inside)),
            TouchResult::NotHandled
        );
    }

    #[test]
    fn test_release_outside_does_not_fire() {
        let mut button = placed_button();

        button.handle_touch(TouchEvent::Press(TouchPoint::new(15, 15)));
        assert_eq!(
            button.handle_touch(TouchEvent::Release(TouchPoint::new(200, 15))),
            TouchResult::Handled
        );
    }

    #[test]
    fn test_disabled_ignores_touch() {
        let mut button = placed_button();
        button.set_enabled(false);
        assert_eq!(
            button.handle_touch(TouchEvent::Press(TouchPoint::new(15, 15))),
            TouchResult::NotHandled
        );
    }
}
