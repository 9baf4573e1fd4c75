#![no_std]

extern crate alloc;

pub mod config;
pub mod redraw;
pub mod time;
pub mod ui;
