use crate::coords::{Vec2, Vec3};

use super::Camera;

/// Pitch limit just short of the poles, where the view basis degenerates.
const PITCH_LIMIT: f32 = 1.45;

const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 30.0;

/// Drag-to-orbit / wheel-zoom controller around the camera target.
///
/// Holds a spherical pose (yaw, pitch, distance) and applies it to the
/// camera once per tick via `update`.
#[derive(Debug)]
pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    dragging: bool,
    last_cursor: Option<Vec2>,
    rotate_speed: f32,
}

impl OrbitController {
    /// Starts at the camera's default pose: straight down +Z, 10 units out.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
            dragging: false,
            last_cursor: None,
            rotate_speed: 0.005,
        }
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.last_cursor = None;
    }

    /// Feeds a cursor position (pixels); rotates while a drag is active.
    pub fn on_cursor(&mut self, px: Vec2) {
        if !self.dragging {
            return;
        }

        if let Some(last) = self.last_cursor {
            let d = px - last;
            self.yaw -= d.x * self.rotate_speed;
            self.pitch = (self.pitch + d.y * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.last_cursor = Some(px);
    }

    /// Feeds a scroll delta in lines; positive zooms in.
    pub fn on_scroll(&mut self, lines: f32) {
        self.distance = (self.distance * (1.0 - lines * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Applies the spherical pose to the camera. Call once per tick.
    pub fn update(&self, camera: &mut Camera) {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        let offset = Vec3::new(
            self.distance * cp * sy,
            self.distance * sp,
            self.distance * cp * cy,
        );
        camera.position = camera.target + offset;
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(orbit: &mut OrbitController, from: Vec2, to: Vec2) {
        orbit.begin_drag();
        orbit.on_cursor(from);
        orbit.on_cursor(to);
        orbit.end_drag();
    }

    #[test]
    fn default_pose_matches_camera_default() {
        let orbit = OrbitController::new();
        let mut cam = Camera::new(1.0);
        orbit.update(&mut cam);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn camera_stays_at_orbit_distance() {
        let mut orbit = OrbitController::new();
        drag(&mut orbit, Vec2::new(0.0, 0.0), Vec2::new(120.0, -60.0));

        let mut cam = Camera::new(1.0);
        orbit.update(&mut cam);
        let r = (cam.position - cam.target).length();
        assert!((r - orbit.distance()).abs() < 1e-4);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_poles() {
        let mut orbit = OrbitController::new();
        drag(&mut orbit, Vec2::new(0.0, 0.0), Vec2::new(0.0, 10000.0));
        assert!(orbit.pitch() <= PITCH_LIMIT);

        drag(&mut orbit, Vec2::new(0.0, 0.0), Vec2::new(0.0, -10000.0));
        assert!(orbit.pitch() >= -PITCH_LIMIT);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = OrbitController::new();
        for _ in 0..100 {
            orbit.on_scroll(1.0);
        }
        assert_eq!(orbit.distance(), MIN_DISTANCE);

        for _ in 0..100 {
            orbit.on_scroll(-1.0);
        }
        assert_eq!(orbit.distance(), MAX_DISTANCE);
    }

    #[test]
    fn cursor_moves_without_drag_are_ignored() {
        let mut orbit = OrbitController::new();
        orbit.on_cursor(Vec2::new(50.0, 50.0));
        orbit.on_cursor(Vec2::new(500.0, 500.0));

        let mut cam = Camera::new(1.0);
        orbit.update(&mut cam);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 10.0));
    }
}
