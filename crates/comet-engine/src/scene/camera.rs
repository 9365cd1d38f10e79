use crate::coords::Vec3;

/// Perspective camera aimed at the scene origin.
///
/// Defaults match the scene the trail is tuned for: 60° vertical FOV,
/// near 0.1, far 50, positioned at (0, 0, 10) looking at the origin.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::zero(),
            fov_y: 60f32.to_radians(),
            aspect,
            near: 0.1,
            far: 50.0,
        }
    }

    /// Updates the aspect ratio after a resize.
    ///
    /// Non-finite or non-positive values are ignored so a transient 0x0
    /// surface cannot poison ray generation.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Distance from the image plane for a unit-height NDC frustum.
    ///
    /// `1 / tan(fov/2)`; the fragment shader uses it to build ray
    /// directions.
    #[inline]
    pub fn focal(&self) -> f32 {
        1.0 / (self.fov_y * 0.5).tan()
    }

    /// Near plane; the ray march starts here.
    #[inline]
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far plane; the ray march gives up past this distance.
    #[inline]
    pub fn far(&self) -> f32 {
        self.far
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_aspect_updates_value() {
        let mut cam = Camera::new(1.0);
        cam.set_aspect(16.0 / 9.0);
        assert_eq!(cam.aspect(), 16.0 / 9.0);
    }

    #[test]
    fn set_aspect_rejects_degenerate_values() {
        let mut cam = Camera::new(1.5);
        cam.set_aspect(0.0);
        cam.set_aspect(-2.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect(), 1.5);
    }

    #[test]
    fn focal_matches_sixty_degree_fov() {
        let cam = Camera::new(1.0);
        let expected = 1.0 / (30f32.to_radians()).tan();
        assert!((cam.focal() - expected).abs() < 1e-6);
    }
}
