//! Core engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and
//! the viewer: an application callback trait and a per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
