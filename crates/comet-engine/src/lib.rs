//! Comet engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the viewer:
//! pointer tracking, the trail buffer, frame timing, device/surface
//! management and the trail-plane renderer.

pub mod device;
pub mod window;
pub mod pointer;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod scene;
