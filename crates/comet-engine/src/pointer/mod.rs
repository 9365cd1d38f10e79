//! Pointer subsystem.
//!
//! Tracks the pointer in NDC with a debounced "recently moved" flag and a
//! fixed-length trail of past samples. The public API is platform-agnostic;
//! the runtime translates winit events via `pointer::platform`.

mod tracker;
mod trail;

pub mod platform;

pub use tracker::{PointerTracker, IDLE_AFTER};
pub use trail::{PointerTrail, TRAIL_LENGTH};
