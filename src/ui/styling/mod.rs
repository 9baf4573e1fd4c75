//! Styling system for UI elements
//!
//! - [`colors`] - RGB565 color constants and the widget palette
//! - [`layout`] - padding around element content
//! - [`style`] - per-element style configuration and button variants
//! - [`attributes`] - named styling attributes with zero defaults
//!
//! # Examples
//!
//! ```ignore
//! use flowclock::ui::styling::*;
//!
//! let palette = ColorPalette::default();
//! let style = Style::new()
//!     .with_background(palette.surface)
//!     .with_padding(Padding::all(4));
//! ```

pub mod attributes;
pub mod colors;
pub mod layout;
pub mod style;

pub use attributes::{AttrValue, Attributes};
pub use colors::{
    BLACK, COLOR_ACCENT, COLOR_BACKGROUND, COLOR_SURFACE, COLOR_STROKE, ColorPalette, DARK_GRAY,
    LIGHT_GRAY, WHITE,
};
pub use layout::Padding;
pub use style::{ButtonVariant, Style};
