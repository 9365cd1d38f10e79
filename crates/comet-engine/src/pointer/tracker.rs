use std::time::{Duration, Instant};

use crate::coords::{Vec2, Viewport};

/// Debounce window after which the pointer counts as idle.
pub const IDLE_AFTER: Duration = Duration::from_millis(100);

/// Pointer state for a single window, in normalized device coordinates.
///
/// `set_coords` is called per input event; `update` once per render tick.
/// The moved flag is debounced: every sample re-arms an inactivity
/// deadline, and the flag stays set until the deadline passes with no
/// further samples. The deadline is checked on the frame tick rather than
/// by an OS timer; all mutation happens on the event-loop thread.
#[derive(Debug)]
pub struct PointerTracker {
    coords: Vec2,
    prev_coords: Vec2,
    delta: Vec2,
    moved_until: Option<Instant>,
    idle_after: Duration,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::with_idle_window(IDLE_AFTER)
    }

    /// Creates a tracker with a custom debounce window.
    pub fn with_idle_window(idle_after: Duration) -> Self {
        Self {
            coords: Vec2::zero(),
            prev_coords: Vec2::zero(),
            delta: Vec2::zero(),
            moved_until: None,
            idle_after,
        }
    }

    /// Records a raw pixel-space sample.
    ///
    /// The position is normalized against the current viewport into
    /// [-1, 1] with Y flipped, motion is marked active, and the idle
    /// deadline is re-armed (replacing any previous deadline).
    ///
    /// Samples against an invalid (zero-sized) viewport are dropped.
    pub fn set_coords(&mut self, px: Vec2, viewport: Viewport, now: Instant) {
        if !viewport.is_valid() {
            return;
        }

        self.coords = viewport.normalize(px);
        self.moved_until = Some(now + self.idle_after);
    }

    /// Advances per-frame state.
    ///
    /// Computes the frame delta (current minus previous), moves the
    /// previous-coordinate snapshot forward, and expires the moved flag
    /// once the idle deadline has passed. Intended to be invoked once per
    /// render tick, not per input event.
    pub fn update(&mut self, now: Instant) {
        self.delta = self.coords - self.prev_coords;
        self.prev_coords = self.coords;

        if let Some(deadline) = self.moved_until {
            if now >= deadline {
                self.moved_until = None;
            }
        }
    }

    /// Current pointer position in NDC.
    #[inline]
    pub fn coords(&self) -> Vec2 {
        self.coords
    }

    /// Frame-to-frame delta computed by the last `update`.
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// True while within the idle window of the last sample.
    #[inline]
    pub fn moved(&self, now: Instant) -> bool {
        self.moved_until.is_some_and(|deadline| now < deadline)
    }

    /// Clears the idle deadline.
    ///
    /// Idempotent; called on teardown so no debounce state outlives the
    /// window.
    pub fn reset(&mut self) {
        self.moved_until = None;
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    // ── normalization ─────────────────────────────────────────────────────

    #[test]
    fn sample_is_normalized_into_ndc() {
        let mut t = PointerTracker::new();
        let now = Instant::now();

        t.set_coords(Vec2::new(400.0, 300.0), vp(), now);
        assert_eq!(t.coords(), Vec2::zero());

        t.set_coords(Vec2::new(800.0, 0.0), vp(), now);
        assert_eq!(t.coords(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn sample_against_zero_viewport_is_dropped() {
        let mut t = PointerTracker::new();
        let now = Instant::now();

        t.set_coords(Vec2::new(10.0, 10.0), Viewport::new(0.0, 0.0), now);
        assert_eq!(t.coords(), Vec2::zero());
        assert!(!t.moved(now));
    }

    // ── debounce ──────────────────────────────────────────────────────────

    #[test]
    fn moved_flag_set_immediately_after_sample() {
        let mut t = PointerTracker::new();
        let now = Instant::now();

        t.set_coords(Vec2::new(1.0, 1.0), vp(), now);
        assert!(t.moved(now));
    }

    #[test]
    fn moved_flag_clears_after_idle_window() {
        let mut t = PointerTracker::new();
        let now = Instant::now();

        t.set_coords(Vec2::new(1.0, 1.0), vp(), now);

        let later = now + IDLE_AFTER;
        t.update(later);
        assert!(!t.moved(later));
    }

    #[test]
    fn new_sample_rearms_the_full_window() {
        let mut t = PointerTracker::new();
        let now = Instant::now();

        t.set_coords(Vec2::new(1.0, 1.0), vp(), now);

        // Sample again just before expiry; the deadline moves forward.
        let almost = now + Duration::from_millis(90);
        t.set_coords(Vec2::new(2.0, 2.0), vp(), almost);

        let past_first = now + Duration::from_millis(150);
        t.update(past_first);
        assert!(t.moved(past_first));

        let past_second = almost + IDLE_AFTER;
        t.update(past_second);
        assert!(!t.moved(past_second));
    }

    // ── frame delta ───────────────────────────────────────────────────────

    #[test]
    fn update_computes_delta_and_advances_snapshot() {
        let mut t = PointerTracker::new();
        let now = Instant::now();

        t.set_coords(Vec2::new(600.0, 300.0), vp(), now);
        t.update(now);
        assert_eq!(t.delta(), Vec2::new(0.5, 0.0));

        // No motion between ticks: delta settles to zero.
        t.update(now);
        assert_eq!(t.delta(), Vec2::zero());
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn reset_is_idempotent() {
        let mut t = PointerTracker::new();
        let now = Instant::now();

        t.set_coords(Vec2::new(1.0, 1.0), vp(), now);
        t.reset();
        t.reset();
        assert!(!t.moved(now));
    }
}
