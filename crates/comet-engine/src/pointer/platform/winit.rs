use std::time::Instant;

use winit::event::{Touch, TouchPhase, WindowEvent};

use crate::coords::{Vec2, Viewport};
use crate::pointer::PointerTracker;

/// Tracks which touch id currently acts as the primary pointer.
///
/// The first touch to start is primary until it ends or is cancelled;
/// samples from any other touch are ignored. This mirrors the
/// `isPrimary` dispatch of web pointer events, where only the primary
/// touch drives the trail.
#[derive(Debug, Default)]
pub struct TouchState {
    primary_id: Option<u64>,
}

impl TouchState {
    /// Applies a touch phase transition for touch `id`.
    ///
    /// Returns true when this touch is the primary pointer and the phase
    /// carries a position worth sampling.
    pub fn on_touch(&mut self, id: u64, phase: TouchPhase) -> bool {
        match phase {
            TouchPhase::Started => {
                if self.primary_id.is_none() {
                    self.primary_id = Some(id);
                }
                self.primary_id == Some(id)
            }
            TouchPhase::Moved => self.primary_id == Some(id),
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.primary_id == Some(id) {
                    self.primary_id = None;
                }
                false
            }
        }
    }
}

/// Feeds a winit window event into the pointer tracker.
///
/// Mouse motion always samples; touch input samples on down and move but
/// only for the primary touch. Positions arrive in physical pixels and
/// are normalized by the tracker against `viewport`.
///
/// Returns true when a sample was taken.
pub fn apply_pointer_event(
    tracker: &mut PointerTracker,
    touch: &mut TouchState,
    viewport: Viewport,
    event: &WindowEvent,
    now: Instant,
) -> bool {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let px = Vec2::new(position.x as f32, position.y as f32);
            tracker.set_coords(px, viewport, now);
            true
        }

        WindowEvent::Touch(Touch {
            id,
            phase,
            location,
            ..
        }) => {
            if !touch.on_touch(*id, *phase) {
                return false;
            }
            let px = Vec2::new(location.x as f32, location.y as f32);
            tracker.set_coords(px, viewport, now);
            true
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Constructing winit `WindowEvent`s requires opaque device ids, so the
    // dispatch policy is tested through `TouchState` directly.

    #[test]
    fn first_touch_becomes_primary() {
        let mut t = TouchState::default();
        assert!(t.on_touch(7, TouchPhase::Started));
        assert!(t.on_touch(7, TouchPhase::Moved));
    }

    #[test]
    fn secondary_touch_is_ignored() {
        let mut t = TouchState::default();
        assert!(t.on_touch(1, TouchPhase::Started));
        assert!(!t.on_touch(2, TouchPhase::Started));
        assert!(!t.on_touch(2, TouchPhase::Moved));
        assert!(t.on_touch(1, TouchPhase::Moved));
    }

    #[test]
    fn primary_slot_frees_on_release() {
        let mut t = TouchState::default();
        assert!(t.on_touch(1, TouchPhase::Started));
        assert!(!t.on_touch(1, TouchPhase::Ended));

        // The next touch to start takes over as primary.
        assert!(t.on_touch(2, TouchPhase::Started));
    }

    #[test]
    fn cancelled_touch_frees_the_primary_slot() {
        let mut t = TouchState::default();
        assert!(t.on_touch(3, TouchPhase::Started));
        assert!(!t.on_touch(3, TouchPhase::Cancelled));
        assert!(t.on_touch(4, TouchPhase::Started));
    }
}
