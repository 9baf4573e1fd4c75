//! Named styling attributes
//!
//! Widgets that are configured from a style sheet read their values through
//! [`Attributes`]. Lookups never fail: a missing attribute, or one stored
//! with the wrong kind, reads as zero.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;

/// A single attribute value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue {
    /// A length in pixels
    Dimension(f32),
    /// A packed RGB565 color
    Color(u16),
}

/// Borrowed list of `(name, value)` pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct Attributes<'a> {
    entries: &'a [(&'a str, AttrValue)],
}

impl<'a> Attributes<'a> {
    pub const fn new(entries: &'a [(&'a str, AttrValue)]) -> Self {
        Self { entries }
    }

    /// An attribute set with nothing in it
    pub const fn empty() -> Self {
        Self { entries: &[] }
    }

    fn get(&self, name: &str) -> Option<AttrValue> {
        // Last entry wins so later style layers override earlier ones.
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Dimension attribute in pixels, `0.0` when absent
    pub fn dimension(&self, name: &str) -> f32 {
        match self.get(name) {
            Some(AttrValue::Dimension(value)) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    /// Dimension attribute rounded to whole, non-negative pixels
    pub fn dimension_px(&self, name: &str) -> u32 {
        libm::roundf(self.dimension(name).max(0.0)) as u32
    }

    /// Color attribute, black when absent
    pub fn color(&self, name: &str) -> Rgb565 {
        match self.get(name) {
            Some(AttrValue::Color(raw)) => Rgb565::from(RawU16::new(raw)),
            _ => Rgb565::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: &[(&str, AttrValue)] = &[
        ("hour_radius", AttrValue::Dimension(40.4)),
        ("hour_width", AttrValue::Color(0xFFFF)),
        ("minute_radius", AttrValue::Dimension(-3.0)),
        ("arrow_color", AttrValue::Color(0xF800)),
        ("hour_radius", AttrValue::Dimension(42.6)),
    ];

    #[test]
    fn test_missing_attributes_default_to_zero() {
        let attrs = Attributes::empty();
        assert_eq!(attrs.dimension("hour_radius"), 0.0);
        assert_eq!(attrs.color("arrow_color"), Rgb565::BLACK);
    }

    #[test]
    fn test_later_entries_override() {
        let attrs = Attributes::new(ENTRIES);
        assert_eq!(attrs.dimension_px("hour_radius"), 43);
    }

    #[test]
    fn test_wrong_kind_and_negative_values_read_as_zero() {
        let attrs = Attributes::new(ENTRIES);
        assert_eq!(attrs.dimension_px("hour_width"), 0);
        assert_eq!(attrs.dimension_px("minute_radius"), 0);
    }

    #[test]
    fn test_color_lookup() {
        let attrs = Attributes::new(ENTRIES);
        assert_eq!(attrs.color("arrow_color"), Rgb565::RED);
    }
}
