//! Pointer sample tracking for drag gestures.

use kurbo::{Point, Vec2};
use std::collections::VecDeque;

/// How far back (seconds) samples count toward the release velocity.
pub const VELOCITY_WINDOW: f64 = 0.1;

/// Estimates pointer velocity from timestamped positions.
///
/// Only the samples inside [`VELOCITY_WINDOW`] of the newest one are used, so
/// a pointer that stops before release reports (near) zero velocity.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(f64, Point)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all samples (call at gesture start).
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Record the pointer at `position` at time `time` (seconds).
    pub fn push(&mut self, time: f64, position: Point) {
        // Out-of-order timestamps restart the window.
        if self.samples.back().is_some_and(|(t, _)| time < *t) {
            self.samples.clear();
        }
        self.samples.push_back((time, position));
        while let Some(&(t, _)) = self.samples.front() {
            if time - t > VELOCITY_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in units per second between the oldest and newest sample.
    pub fn velocity(&self) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back())
        else {
            return Vec2::ZERO;
        };
        let dt = t1 - t0;
        if dt <= f64::EPSILON {
            return Vec2::ZERO;
        }
        (p1 - p0) / dt
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single_sample_report_zero() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), Vec2::ZERO);
        tracker.push(0.0, Point::new(0.0, 0.0));
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_constant_downward_motion() {
        let mut tracker = VelocityTracker::new();
        for i in 0..6 {
            let t = i as f64 * 0.016;
            tracker.push(t, Point::new(10.0, 600.0 * t));
        }
        let v = tracker.velocity();
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_old_samples_fall_out_of_window() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0.0, Point::new(0.0, 0.0));
        tracker.push(0.05, Point::new(0.0, 100.0));
        // Pointer rests for a while before release
        tracker.push(0.5, Point::new(0.0, 100.0));
        tracker.push(0.55, Point::new(0.0, 100.0));
        assert_eq!(tracker.len(), 2);
        assert!(tracker.velocity().y.abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_samples() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0.0, Point::ZERO);
        tracker.push(0.01, Point::new(0.0, 5.0));
        tracker.reset();
        assert!(tracker.is_empty());
    }
}
