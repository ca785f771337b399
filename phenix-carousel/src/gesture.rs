//! Horizontal swipe tracking.

/// Minimum horizontal travel, in CSS pixels, for a swipe to navigate.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Which way the finger travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved towards the left edge; shows the next image.
    Left,
    /// Finger moved towards the right edge; shows the previous image.
    Right,
}

/// `Idle` / `Tracking` gesture state machine.
///
/// Only the origin and the most recent coordinate are kept. Vertical motion
/// is never reported here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SwipeTracker {
    #[default]
    Idle,
    Tracking { origin: f64, latest: f64 },
}

impl SwipeTracker {
    pub fn start(&mut self, x: f64) {
        *self = SwipeTracker::Tracking {
            origin: x,
            latest: x,
        };
    }

    pub fn track(&mut self, x: f64) {
        if let SwipeTracker::Tracking { latest, .. } = self {
            *latest = x;
        }
    }

    /// Ends the gesture and returns to `Idle`. An end without a start yields
    /// `None`.
    pub fn finish(&mut self) -> Option<SwipeDirection> {
        match std::mem::take(self) {
            SwipeTracker::Idle => None,
            SwipeTracker::Tracking { origin, latest } => {
                classify(origin - latest)
            }
        }
    }

    /// Drops an in-progress gesture without navigating.
    pub fn cancel(&mut self) {
        *self = SwipeTracker::Idle;
    }

    pub fn origin(&self) -> Option<f64> {
        match self {
            SwipeTracker::Idle => None,
            SwipeTracker::Tracking { origin, .. } => Some(*origin),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, SwipeTracker::Tracking { .. })
    }
}

/// `distance` is origin minus end coordinate.
pub fn classify(distance: f64) -> Option<SwipeDirection> {
    if distance > SWIPE_THRESHOLD {
        Some(SwipeDirection::Left)
    } else if distance < -SWIPE_THRESHOLD {
        Some(SwipeDirection::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftward_swipe_past_threshold() {
        let mut tracker = SwipeTracker::default();
        tracker.start(200.0);
        tracker.track(150.0);
        tracker.track(120.0);
        assert_eq!(tracker.finish(), Some(SwipeDirection::Left));
        assert_eq!(tracker, SwipeTracker::Idle);
    }

    #[test]
    fn short_swipe_is_ignored_and_clears_origin() {
        let mut tracker = SwipeTracker::default();
        tracker.start(120.0);
        tracker.track(140.0);
        assert_eq!(tracker.finish(), None);
        assert_eq!(tracker.origin(), None);
    }

    #[test]
    fn exactly_threshold_does_not_navigate() {
        assert_eq!(classify(SWIPE_THRESHOLD), None);
        assert_eq!(classify(-SWIPE_THRESHOLD), None);
        assert_eq!(classify(-51.0), Some(SwipeDirection::Right));
    }

    #[test]
    fn tap_without_move_is_not_a_swipe() {
        let mut tracker = SwipeTracker::default();
        tracker.start(300.0);
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn end_without_start_is_noop() {
        let mut tracker = SwipeTracker::default();
        tracker.track(10.0);
        assert_eq!(tracker.finish(), None);
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn cancel_discards_gesture() {
        let mut tracker = SwipeTracker::default();
        tracker.start(400.0);
        tracker.track(100.0);
        tracker.cancel();
        assert_eq!(tracker.finish(), None);
    }
}
