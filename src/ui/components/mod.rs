// src/ui/components/mod.rs
//! UI components library

pub mod button;
pub mod clock;
pub mod text;

pub use button::Button;
pub use clock::{ClockHand, ClockStyle, ClockView, RenderState, hand_angle};
pub use text::{Label, TextSize, wrap_text};
