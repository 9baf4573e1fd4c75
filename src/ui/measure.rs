// src/ui/measure.rs
//! Measurement constraints and the measure/place contract shared by every element
//!
//! Layout runs in two passes. The parent first asks each child for a size
//! with [`Layout::measure`], passing one [`MeasureSpec`] per axis, and then
//! hands out final bounds with [`Layout::place`].

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// How a [`MeasureSpec`] constrains one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The element must be exactly this size
    Exact,
    /// The element may be any size up to this one
    AtMost,
    /// The parent imposes no constraint; the size is ignored
    Unspecified,
}

/// A constraint on one axis: a mode and a size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: u32,
}

impl MeasureSpec {
    pub const fn new(mode: MeasureMode, size: u32) -> Self {
        Self { mode, size }
    }

    pub const fn exact(size: u32) -> Self {
        Self::new(MeasureMode::Exact, size)
    }

    pub const fn at_most(size: u32) -> Self {
        Self::new(MeasureMode::AtMost, size)
    }

    pub const fn unspecified() -> Self {
        Self::new(MeasureMode::Unspecified, 0)
    }

    pub fn is_exact(&self) -> bool {
        self.mode == MeasureMode::Exact
    }

    pub fn is_unspecified(&self) -> bool {
        self.mode == MeasureMode::Unspecified
    }

    /// Reconcile a desired size with this constraint
    pub fn resolve(&self, desired: u32) -> u32 {
        match self.mode {
            MeasureMode::Exact => self.size,
            MeasureMode::AtMost => desired.min(self.size),
            MeasureMode::Unspecified => desired,
        }
    }

    /// Upper bound for content, if the spec has one
    pub fn limit(&self) -> Option<u32> {
        match self.mode {
            MeasureMode::Exact | MeasureMode::AtMost => Some(self.size),
            MeasureMode::Unspecified => None,
        }
    }

    /// Same mode with `amount` taken off the size (used for padding)
    pub fn shrink(&self, amount: u32) -> Self {
        Self::new(self.mode, self.size.saturating_sub(amount))
    }
}

/// The measure/place half of the element contract; rendering lives in
/// [`Drawable`](crate::ui::core::Drawable).
pub trait Layout {
    /// Compute and remember the element's size under the given constraints
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size;

    /// Size computed by the most recent [`Layout::measure`]
    fn measured_size(&self) -> Size;

    /// Assign final bounds (in the parent's coordinate space)
    fn place(&mut self, bounds: Rectangle);
}

/// Lay an element out to fill `area` exactly.
///
/// Returns the size the element settled on.
pub fn layout_in<E: Layout + ?Sized>(element: &mut E, area: Rectangle) -> Size {
    let size = element.measure(
        MeasureSpec::exact(area.size.width),
        MeasureSpec::exact(area.size.height),
    );
    element.place(Rectangle::new(area.top_left, size));
    size
}
