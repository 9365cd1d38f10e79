//! GPU rendering subsystem.
//!
//! A single renderer draws the full-screen trail plane. It owns its GPU
//! resources (pipeline, quad buffers, uniform buffer) and consumes a
//! per-frame uniform bundle built from the pointer/trail/camera state.

mod ctx;
mod plane;

pub use ctx::{RenderCtx, RenderTarget};
pub use plane::{PlaneRenderer, TrailUniform};
