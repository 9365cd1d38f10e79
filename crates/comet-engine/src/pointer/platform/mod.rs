//! Platform event translation for the pointer subsystem.

mod winit;

pub use winit::{apply_pointer_event, TouchState};
