// src/ui/layouts/mod.rs
//! Layout containers for arranging UI elements

pub mod flow;
pub mod scrolling_flow;

pub use flow::{FlowChild, FlowLayout, SizeConstraint};
pub use scrolling_flow::ScrollingFlowLayout;

use thiserror_no_std::Error;

/// Errors from editing a container's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("container is full ({capacity} children)")]
    CapacityExceeded { capacity: usize },
    #[error("no child at index {0}")]
    NoSuchChild(usize),
}
