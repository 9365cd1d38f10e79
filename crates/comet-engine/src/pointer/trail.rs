use crate::coords::Vec2;

/// Number of past pointer samples kept for the trail effect.
pub const TRAIL_LENGTH: usize = 15;

/// Fixed-size history of pointer positions in NDC, newest first.
///
/// The runtime pushes the current pointer position once per frame, so
/// index 0 is this frame's sample and index 14 the one from 14 frames ago.
#[derive(Debug, Clone)]
pub struct PointerTrail {
    points: [Vec2; TRAIL_LENGTH],
}

impl PointerTrail {
    pub fn new() -> Self {
        Self {
            points: [Vec2::zero(); TRAIL_LENGTH],
        }
    }

    /// Shifts the history by one slot and stores `p` at index 0.
    ///
    /// O(TRAIL_LENGTH) copy, once per frame.
    pub fn push(&mut self, p: Vec2) {
        for i in (1..TRAIL_LENGTH).rev() {
            self.points[i] = self.points[i - 1];
        }
        self.points[0] = p;
    }

    #[inline]
    pub fn points(&self) -> &[Vec2; TRAIL_LENGTH] {
        &self.points
    }

    /// Exports the trail as a vec4-padded array.
    ///
    /// WGSL requires a 16-byte element stride for arrays in the uniform
    /// address space, so each point occupies the xy of a vec4 slot.
    pub fn to_uniform(&self) -> [[f32; 4]; TRAIL_LENGTH] {
        let mut out = [[0.0; 4]; TRAIL_LENGTH];
        for (slot, p) in out.iter_mut().zip(self.points.iter()) {
            slot[0] = p.x;
            slot[1] = p.y;
        }
        out
    }
}

impl Default for PointerTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_always_has_fixed_length() {
        let mut trail = PointerTrail::new();
        assert_eq!(trail.points().len(), TRAIL_LENGTH);

        for i in 0..40 {
            trail.push(Vec2::new(i as f32, 0.0));
            assert_eq!(trail.points().len(), TRAIL_LENGTH);
        }
    }

    #[test]
    fn newest_sample_is_index_zero() {
        let mut trail = PointerTrail::new();
        trail.push(Vec2::new(0.25, -0.5));
        assert_eq!(trail.points()[0], Vec2::new(0.25, -0.5));
    }

    #[test]
    fn history_order_after_many_pushes() {
        let mut trail = PointerTrail::new();

        // Push 40 distinct positions; the trail keeps the last 15.
        for i in 0..40 {
            trail.push(Vec2::new(i as f32, -(i as f32)));
        }

        assert_eq!(trail.points()[0], Vec2::new(39.0, -39.0));
        assert_eq!(trail.points()[14], Vec2::new(25.0, -25.0));

        // Monotonic: each slot is one push older than the previous.
        for i in 1..TRAIL_LENGTH {
            assert_eq!(trail.points()[i].x, trail.points()[i - 1].x - 1.0);
        }
    }

    #[test]
    fn uniform_export_pads_to_vec4() {
        let mut trail = PointerTrail::new();
        trail.push(Vec2::new(0.5, -0.25));

        let u = trail.to_uniform();
        assert_eq!(u.len(), TRAIL_LENGTH);
        assert_eq!(u[0], [0.5, -0.25, 0.0, 0.0]);
        assert_eq!(u[1], [0.0, 0.0, 0.0, 0.0]);
    }
}
