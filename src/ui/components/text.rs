// src/ui/components/text.rs
//! Text label with word wrapping

use crate::ui::core::{DirtyRegion, Drawable};
use crate::ui::measure::{Layout, MeasureSpec};
use crate::ui::styling::Style;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text as EgText};

/// Text size variants
///
/// - `Small`: 5x8 font
/// - `Medium`: 6x10 font (default)
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &embedded_graphics::mono_font::ascii::FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &embedded_graphics::mono_font::ascii::FONT_10X20,
        }
    }

    /// Horizontal distance from one glyph to the next
    fn advance(&self) -> u32 {
        let font = self.font();
        font.character_size.width + font.character_spacing
    }

    /// Pixel width of `chars` glyphs on one line
    pub fn text_width(&self, chars: usize) -> u32 {
        if chars == 0 {
            return 0;
        }
        chars as u32 * self.advance() - self.font().character_spacing
    }

    /// Number of glyphs that fit in `width` pixels (at least one)
    pub fn chars_in(&self, width: u32) -> usize {
        let fit = (width + self.font().character_spacing) / self.advance();
        (fit as usize).max(1)
    }
}

/// Greedy word wrap.
///
/// Lines are broken at spaces; a word longer than `max_chars` is broken
/// mid-word. `None` only splits on explicit newlines.
pub fn wrap_text<'t>(text: &'t str, max_chars: Option<usize>, mut emit: impl FnMut(&'t str)) {
    for paragraph in text.split('\n') {
        let Some(max) = max_chars else {
            emit(paragraph);
            continue;
        };
        let max = max.max(1);

        let mut rest = paragraph.trim_end();
        if rest.is_empty() {
            emit("");
            continue;
        }

        while !rest.is_empty() {
            if rest.chars().count() <= max {
                emit(rest);
                break;
            }

            // Byte offset just past `max` characters
            let limit = rest
                .char_indices()
                .nth(max)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());

            let split = if rest[limit..].starts_with(' ') {
                Some(limit)
            } else {
                rest[..limit].rfind(' ')
            };

            match split {
                Some(i) if i > 0 => {
                    emit(rest[..i].trim_end());
                    rest = rest[i..].trim_start();
                }
                _ => {
                    emit(&rest[..limit]);
                    rest = rest[limit..].trim_start();
                }
            }
        }
    }
}

/// Multi-line text label
///
/// Measures to its natural single-line width when unconstrained and wraps
/// words when a width limit is smaller than that. Supports up to 128
/// characters of text.
///
/// # Examples
/// ```ignore
/// let label = Label::new("Temperature 22.5 C", TextSize::Medium)
///     .with_style(Style::new().with_padding(Padding::all(2)));
/// ```
pub struct Label {
    bounds: Rectangle,
    measured: Size,
    text: heapless::String<128>,
    size: TextSize,
    line_spacing: u32,
    style: Style,
    dirty: bool,
}

impl Label {
    pub fn new(text: &str, size: TextSize) -> Self {
        let mut text_string = heapless::String::new();
        text_string.push_str(text).ok();

        Self {
            bounds: Rectangle::zero(),
            measured: Size::zero(),
            text: text_string,
            size,
            line_spacing: 2,
            style: Style::default(),
            dirty: true,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_line_spacing(mut self, spacing: u32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Update the displayed text, marking the label dirty if it changed.
    pub fn set_text(&mut self, text: &str) {
        let mut new_text = heapless::String::new();
        new_text.push_str(text).ok();

        if self.text != new_text {
            self.text = new_text;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn line_height(&self) -> u32 {
        self.size.font().character_size.height
    }

    /// Widest line and line count when wrapped to `content_width`
    fn text_extent(&self, content_width: Option<u32>) -> (u32, u32) {
        let max_chars = content_width.map(|w| self.size.chars_in(w));
        let mut widest = 0usize;
        let mut lines = 0u32;
        wrap_text(&self.text, max_chars, |line| {
            widest = widest.max(line.chars().count());
            lines += 1;
        });
        (self.size.text_width(widest), lines)
    }

    fn block_height(&self, lines: u32) -> u32 {
        if lines == 0 {
            return 0;
        }
        lines * self.line_height() + (lines - 1) * self.line_spacing
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
}

impl Layout for Label {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let padding = self.style.padding;
        let content_limit = width.limit().map(|w| w.saturating_sub(padding.horizontal()));
        let (text_width, lines) = self.text_extent(content_limit);

        self.measured = Size::new(
            width.resolve(text_width + padding.horizontal()),
            height.resolve(self.block_height(lines) + padding.vertical()),
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

impl Drawable for Label {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.style.has_fill_or_border() {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }

        let text_color = self.style.foreground_color.unwrap_or(Rgb565::WHITE);
        let text_style = MonoTextStyle::new(self.size.font(), text_color);
        let area = self.content_area();
        let max_chars = self.size.chars_in(area.size.width);
        let step = (self.line_height() + self.line_spacing) as i32;
        let bottom = area.top_left.y + area.size.height as i32;

        let mut y = area.top_left.y;
        let mut result = Ok(());
        wrap_text(&self.text, Some(max_chars), |line| {
            // Stop once we run out of room
            if result.is_err() || y >= bottom {
                return;
            }
            result = EgText::with_baseline(
                line,
                Point::new(area.top_left.x, y),
                text_style,
                Baseline::Top,
            )
            .draw(display)
            .map(|_| ());
            y += step;
        });
        result
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::Padding;
    use alloc::vec::Vec;
    use embedded_graphics::mock_display::MockDisplay;

    fn wrapped(text: &str, max: Option<usize>) -> Vec<&str> {
        let mut lines = Vec::new();
        wrap_text(text, max, |line| lines.push(line));
        lines
    }

    #[test]
    fn test_wrap_on_spaces() {
        assert_eq!(
            wrapped("the quick brown fox", Some(10)),
            ["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrapped("abcdefgh", Some(3)), ["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        assert_eq!(wrapped("a\n\nb", None), ["a", "", "b"]);
        assert_eq!(wrapped("a\n\nb", Some(4)), ["a", "", "b"]);
    }

    #[test]
    fn test_natural_size_is_single_line() {
        let mut label = Label::new("hello", TextSize::Medium);
        let size = label.measure(MeasureSpec::unspecified(), MeasureSpec::unspecified());
        // FONT_6X10 has no character spacing
        assert_eq!(size, Size::new(30, 10));
    }

    #[test]
    fn test_narrow_limit_wraps_and_grows_taller() {
        let mut label = Label::new("hello world", TextSize::Medium).with_line_spacing(2);
        let size = label.measure(MeasureSpec::at_most(40), MeasureSpec::unspecified());
        assert_eq!(size, Size::new(30, 22));
    }

    #[test]
    fn test_padding_is_included() {
        let mut label = Label::new("hi", TextSize::Medium)
            .with_style(Style::new().with_padding(Padding::symmetric(1, 3)));
        let size = label.measure(MeasureSpec::unspecified(), MeasureSpec::at_most(5));
        assert_eq!(size, Size::new(18, 5));
    }

    #[test]
    fn test_draws_inside_bounds() {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);

        let mut label = Label::new("ab", TextSize::Small);
        let size = label.measure(MeasureSpec::unspecified(), MeasureSpec::unspecified());
        label.place(Rectangle::new(Point::new(2, 2), size));
        label.draw(&mut display).unwrap();

        let area = display.affected_area();
        assert!(!area.is_zero_sized());
        assert!(label.bounds().contains(area.top_left));
    }
}
