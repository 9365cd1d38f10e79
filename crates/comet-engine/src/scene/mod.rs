//! Scene state: camera and orbit controls.
//!
//! The trail plane itself is drawn full-screen; the camera only shapes
//! the rays the fragment shader marches, so orbiting rotates the view of
//! the trail without touching the plane geometry.

mod camera;
mod orbit;

pub use camera::Camera;
pub use orbit::OrbitController;
