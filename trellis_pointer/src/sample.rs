// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tick pointer state derived from two consecutive raw samples.

use kurbo::{Point, Vec2};

/// One raw pointer sample as reported by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawPointer {
    /// Pointer position in screen space.
    pub position: Point,
    /// Left button currently held.
    pub left_down: bool,
    /// Right button currently held.
    pub right_down: bool,
    /// Accumulated scroll wheel value.
    pub scroll: f64,
}

impl RawPointer {
    /// A released pointer at `position`.
    pub fn at(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            ..Self::default()
        }
    }

    /// Same sample with the left button held or released.
    #[must_use]
    pub fn with_left(mut self, down: bool) -> Self {
        self.left_down = down;
        self
    }

    /// Same sample with the right button held or released.
    #[must_use]
    pub fn with_right(mut self, down: bool) -> Self {
        self.right_down = down;
        self
    }

    /// Same sample with a new accumulated scroll value.
    #[must_use]
    pub fn with_scroll(mut self, scroll: f64) -> Self {
        self.scroll = scroll;
        self
    }
}

/// Normalized pointer state for one tick.
///
/// Edges are derived from the previous and current raw samples: a press edge is
/// "down now, up before" and a release edge is "up now, down before".
///
/// ```rust
/// use trellis_pointer::{PointerSample, RawPointer};
///
/// let before = RawPointer::at((10.0, 10.0));
/// let now = RawPointer::at((12.0, 9.0)).with_left(true);
/// let sample = PointerSample::new(before, now);
/// assert!(sample.left_pressed());
/// assert!(!sample.left_released());
/// assert_eq!(sample.delta(), kurbo::Vec2::new(2.0, -1.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Raw sample from the previous tick.
    pub previous: RawPointer,
    /// Raw sample for this tick.
    pub current: RawPointer,
}

impl PointerSample {
    /// Derive a sample from two consecutive raw samples.
    pub fn new(previous: RawPointer, current: RawPointer) -> Self {
        Self { previous, current }
    }

    /// Current pointer position.
    pub fn position(&self) -> Point {
        self.current.position
    }

    /// Movement since the previous tick.
    pub fn delta(&self) -> Vec2 {
        self.current.position - self.previous.position
    }

    /// Left button held this tick.
    pub fn left_down(&self) -> bool {
        self.current.left_down
    }

    /// Left button not held this tick.
    pub fn left_up(&self) -> bool {
        !self.current.left_down
    }

    /// Left button went down this tick.
    pub fn left_pressed(&self) -> bool {
        self.current.left_down && !self.previous.left_down
    }

    /// Left button went up this tick.
    pub fn left_released(&self) -> bool {
        !self.current.left_down && self.previous.left_down
    }

    /// Right button held this tick.
    pub fn right_down(&self) -> bool {
        self.current.right_down
    }

    /// Right button went down this tick.
    pub fn right_pressed(&self) -> bool {
        self.current.right_down && !self.previous.right_down
    }

    /// Accumulated scroll value.
    pub fn scroll(&self) -> f64 {
        self.current.scroll
    }

    /// Scroll movement since the previous tick.
    pub fn scroll_delta(&self) -> f64 {
        self.current.scroll - self.previous.scroll
    }

    /// Whether the scroll value moved this tick.
    pub fn scroll_changed(&self) -> bool {
        self.scroll_delta() != 0.0
    }
}

/// Keeps the previous raw sample between ticks.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    last: RawPointer,
    sample: PointerSample,
}

impl PointerTracker {
    /// A tracker whose first tick is derived against a released pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's raw sample and return the derived sample.
    pub fn advance(&mut self, raw: RawPointer) -> PointerSample {
        self.sample = PointerSample::new(self.last, raw);
        self.last = raw;
        self.sample
    }

    /// The sample derived by the latest [`PointerTracker::advance`].
    pub fn sample(&self) -> &PointerSample {
        &self.sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_hold_release_edges() {
        let mut tracker = PointerTracker::new();

        let s = tracker.advance(RawPointer::at((1.0, 1.0)).with_left(true));
        assert!(s.left_pressed() && s.left_down() && !s.left_released());

        let s = tracker.advance(RawPointer::at((1.0, 1.0)).with_left(true));
        assert!(!s.left_pressed() && s.left_down() && !s.left_released());

        let s = tracker.advance(RawPointer::at((1.0, 1.0)));
        assert!(!s.left_pressed() && s.left_up() && s.left_released());

        let s = tracker.advance(RawPointer::at((1.0, 1.0)));
        assert!(!s.left_pressed() && !s.left_released());
    }

    #[test]
    fn right_button_and_scroll_are_reported_raw() {
        let mut tracker = PointerTracker::new();
        let s = tracker.advance(RawPointer::at((0.0, 0.0)).with_right(true).with_scroll(120.0));
        assert!(s.right_pressed());
        assert!(s.right_down());
        assert_eq!(s.scroll_delta(), 120.0);
        assert!(s.scroll_changed());

        let s = tracker.advance(RawPointer::at((0.0, 0.0)).with_right(true).with_scroll(120.0));
        assert!(!s.right_pressed());
        assert!(!s.scroll_changed());
        assert_eq!(s.scroll(), 120.0);
    }

    #[test]
    fn tracker_remembers_latest_sample() {
        let mut tracker = PointerTracker::new();
        tracker.advance(RawPointer::at((3.0, 4.0)));
        let s = tracker.advance(RawPointer::at((5.0, 1.0)));
        assert_eq!(tracker.sample(), &s);
        assert_eq!(s.delta(), Vec2::new(2.0, -3.0));
        assert_eq!(s.position(), Point::new(5.0, 1.0));
    }
}
