//! CarouselState: cyclic position, load-failure flag and gesture tracking.

use thiserror::Error;

use crate::gesture::{SwipeDirection, SwipeTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("image index {index} is out of range for {count} image(s)")]
    OutOfRange { index: usize, count: usize },
}

/// Index change performed by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    Jump(usize),
}

/// Transient per-instance state. Every index change clears
/// `has_load_error`, so each image gets a fresh load attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    count: usize,
    current_index: usize,
    has_load_error: bool,
    gesture: SwipeTracker,
}

impl CarouselState {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current_index: 0,
            has_load_error: false,
            gesture: SwipeTracker::Idle,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn has_load_error(&self) -> bool {
        self.has_load_error
    }

    pub fn gesture_origin(&self) -> Option<f64> {
        self.gesture.origin()
    }

    /// Advances with wrap-around. No-op on an empty carousel.
    pub fn next(&mut self) -> usize {
        if self.count > 0 {
            self.select((self.current_index + 1) % self.count);
        }
        self.current_index
    }

    /// Steps back with wrap-around. No-op on an empty carousel.
    pub fn previous(&mut self) -> usize {
        if self.count > 0 {
            self.select((self.current_index + self.count - 1) % self.count);
        }
        self.current_index
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), NavigationError> {
        if index >= self.count {
            return Err(NavigationError::OutOfRange {
                index,
                count: self.count,
            });
        }
        self.select(index);
        Ok(())
    }

    /// Marks the currently displayed image as broken.
    pub fn report_load_failure(&mut self) {
        if self.count > 0 {
            self.has_load_error = true;
        }
    }

    pub fn gesture_start(&mut self, x: f64) {
        if self.count > 0 {
            self.gesture.start(x);
        }
    }

    pub fn gesture_move(&mut self, x: f64) {
        self.gesture.track(x);
    }

    /// Completes the gesture, navigating when it was a swipe.
    pub fn gesture_end(&mut self) -> Option<Navigation> {
        match self.gesture.finish()? {
            SwipeDirection::Left => {
                self.next();
                Some(Navigation::Next)
            }
            SwipeDirection::Right => {
                self.previous();
                Some(Navigation::Previous)
            }
        }
    }

    pub fn gesture_cancel(&mut self) {
        self.gesture.cancel();
    }

    fn select(&mut self, index: usize) {
        self.current_index = index;
        self.has_load_error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_back_to_start() {
        for count in 1..=6 {
            for start in 0..count {
                let mut state = CarouselState::new(count);
                state.go_to(start).expect("in range");
                for _ in 0..count {
                    state.next();
                }
                assert_eq!(state.current_index(), start, "count={count}");
            }
        }
    }

    #[test]
    fn previous_inverts_next() {
        for count in 1..=6 {
            for start in 0..count {
                let mut state = CarouselState::new(count);
                state.go_to(start).expect("in range");
                state.next();
                state.previous();
                assert_eq!(state.current_index(), start);
            }
        }
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut state = CarouselState::new(4);
        assert_eq!(state.previous(), 3);
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut state = CarouselState::new(3);
        state.go_to(1).expect("in range");
        state.report_load_failure();

        assert_eq!(
            state.go_to(3),
            Err(NavigationError::OutOfRange { index: 3, count: 3 })
        );
        assert_eq!(state.current_index(), 1);
        assert!(state.has_load_error());
    }

    #[test]
    fn every_index_change_clears_load_error() {
        let mut state = CarouselState::new(3);

        state.report_load_failure();
        state.next();
        assert!(!state.has_load_error());

        state.report_load_failure();
        state.previous();
        assert!(!state.has_load_error());

        state.report_load_failure();
        state.go_to(2).expect("in range");
        assert!(!state.has_load_error());

        state.report_load_failure();
        state.go_to(2).expect("same index");
        assert!(!state.has_load_error());
    }

    #[test]
    fn single_image_cycles_onto_itself() {
        let mut state = CarouselState::new(1);
        assert_eq!(state.next(), 0);
        assert_eq!(state.previous(), 0);
    }

    #[test]
    fn empty_state_never_moves() {
        let mut state = CarouselState::new(0);
        assert_eq!(state.next(), 0);
        assert_eq!(state.previous(), 0);
        assert!(state.go_to(0).is_err());
        state.report_load_failure();
        assert!(!state.has_load_error());
        state.gesture_start(200.0);
        assert_eq!(state.gesture_origin(), None);
    }

    #[test]
    fn swipe_left_triggers_one_next() {
        let mut state = CarouselState::new(5);
        state.gesture_start(200.0);
        assert_eq!(state.gesture_origin(), Some(200.0));
        state.gesture_move(120.0);
        assert_eq!(state.gesture_end(), Some(Navigation::Next));
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.gesture_origin(), None);
    }

    #[test]
    fn short_swipe_leaves_index() {
        let mut state = CarouselState::new(5);
        state.gesture_start(120.0);
        state.gesture_move(140.0);
        assert_eq!(state.gesture_end(), None);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.gesture_origin(), None);
    }

    #[test]
    fn swipe_right_goes_back() {
        let mut state = CarouselState::new(3);
        state.gesture_start(10.0);
        state.gesture_move(90.0);
        assert_eq!(state.gesture_end(), Some(Navigation::Previous));
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn gesture_end_without_start_is_noop() {
        let mut state = CarouselState::new(3);
        let before = state.clone();
        assert_eq!(state.gesture_end(), None);
        assert_eq!(state, before);
    }
}
