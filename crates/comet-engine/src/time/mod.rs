//! Time subsystem.
//!
//! Provides stable, testable frame timing without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window
//! - call `tick()` once per presented frame to obtain `FrameTime`
//!
//! `FrameTime::elapsed` is what drives the shader's time uniform.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
