use super::Vec2;

/// Viewport size in physical pixels.
///
/// This is the coordinate basis for converting raw pointer positions into
/// NDC, and it feeds the resolution uniform of the trail shader.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn aspect(self) -> f32 {
        self.width / self.height
    }

    /// Maps a pixel position into normalized device coordinates.
    ///
    /// Pixel space has its origin top-left with +Y down; NDC spans [-1, 1]
    /// on both axes with +Y up, so the Y axis is flipped here.
    #[inline]
    pub fn normalize(self, px: Vec2) -> Vec2 {
        Vec2::new(
            (px.x / self.width) * 2.0 - 1.0,
            -((px.y / self.height) * 2.0 - 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalize ─────────────────────────────────────────────────────────

    #[test]
    fn normalize_center_is_origin() {
        let vp = Viewport::new(800.0, 600.0);
        let n = vp.normalize(Vec2::new(400.0, 300.0));
        assert_eq!(n, Vec2::zero());
    }

    #[test]
    fn normalize_top_left() {
        let vp = Viewport::new(800.0, 600.0);
        let n = vp.normalize(Vec2::new(0.0, 0.0));
        assert_eq!(n, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn normalize_bottom_right() {
        let vp = Viewport::new(800.0, 600.0);
        let n = vp.normalize(Vec2::new(800.0, 600.0));
        assert_eq!(n, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn normalize_stays_in_ndc_range() {
        let vp = Viewport::new(1920.0, 1080.0);
        for &(x, y) in &[(0.0, 0.0), (17.0, 901.5), (1919.0, 1.0), (960.0, 540.0)] {
            let n = vp.normalize(Vec2::new(x, y));
            assert!(n.x >= -1.0 && n.x <= 1.0, "x out of range: {n:?}");
            assert!(n.y >= -1.0 && n.y <= 1.0, "y out of range: {n:?}");
        }
    }

    #[test]
    fn normalize_flips_y() {
        let vp = Viewport::new(100.0, 100.0);
        // A point in the upper half of the screen lands in the upper (+Y) half of NDC.
        assert!(vp.normalize(Vec2::new(50.0, 10.0)).y > 0.0);
        assert!(vp.normalize(Vec2::new(50.0, 90.0)).y < 0.0);
    }

    // ── validity ──────────────────────────────────────────────────────────

    #[test]
    fn zero_sized_viewport_is_invalid() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(800.0, 0.0).is_valid());
        assert!(Viewport::new(800.0, 600.0).is_valid());
    }
}
