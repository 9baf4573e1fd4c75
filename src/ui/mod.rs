// src/ui/mod.rs
//! Flowclock UI system for embedded displays
//!
//! This module provides:
//! - Core traits for drawable and touchable elements
//! - A two-pass measure/place layout contract
//! - Flow containers, including one that scrolls sideways on drag
//! - Styled components (buttons, labels, an analog clock)
//! - Dirty region tracking for efficient rendering

pub mod components;
pub mod core;
pub mod elements;
pub mod gesture;
pub mod layouts;
pub mod measure;
pub mod styling;

// Re-export commonly used items
pub use components::{Button, ClockHand, ClockStyle, ClockView, Label, TextSize};
pub use core::{
    Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable,
};
pub use elements::{Element, Spacer};
pub use gesture::{DragGesture, TouchSlop};
pub use layouts::{FlowLayout, LayoutError, ScrollingFlowLayout, SizeConstraint};
pub use measure::{Layout, MeasureMode, MeasureSpec, layout_in};
pub use styling::{AttrValue, Attributes, ButtonVariant, ColorPalette, Padding, Style};
