//! Coordinate and geometry types shared across the engine.
//!
//! Canonical CPU spaces:
//! - Raw pointer input: physical pixels, origin top-left, +X right, +Y down
//! - Pointer/trail state: normalized device coordinates in [-1, 1], +Y up
//!
//! `Viewport::normalize` is the only place the pixel-to-NDC conversion
//! happens; everything downstream of the tracker works in NDC.

mod vec2;
mod vec3;
mod viewport;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use viewport::Viewport;
