// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Temporal steadiness test over a sliding window of detections.
//
// Auto-capture fires only when the last few detections agree closely enough
// that the boundary can be trusted as non-moving. Agreement is tested over
// every pair in the window, not just consecutive ones: consecutive frames of
// a slowly drifting boundary look similar pairwise, but the oldest-vs-newest
// comparison still fails, so only genuine holds settle.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use steadyscan_core::CaptureConfig;
use steadyscan_core::types::Detection;

use crate::geometry::intersection_over_union;

/// Outcome of feeding one detector cycle into the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteadyDecision {
    /// The window agrees — the boundary has settled and capture should fire.
    Settle,
    /// Not settled yet; keep streaming detections.
    Continue,
    /// The detector found nothing this cycle; the window is untouched.
    Ignore,
}

/// Sliding window of the most recent detections plus the agreement policy.
///
/// The window never exceeds its configured length. Insertion when full
/// evicts the oldest entry, except immediately after a settle, where the
/// window is cleared entirely so the next capture requires a fresh run of
/// agreement.
#[derive(Debug, Clone)]
pub struct SteadinessTracker {
    window: VecDeque<Detection>,
    threshold: f64,
    window_len: usize,
}

impl SteadinessTracker {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            window: VecDeque::with_capacity(config.steadiness_window),
            threshold: config.steadiness_threshold,
            window_len: config.steadiness_window.max(1),
        }
    }

    /// Feed the result of one detector cycle.
    ///
    /// `None` (detector found nothing) leaves the window unchanged. With
    /// fewer than `window_len - 1` prior entries the detection is appended
    /// and the decision is `Continue`. Once the window fills, all pairwise
    /// IoUs are tested against the threshold: if every pair exceeds it the
    /// decision is `Settle` and the window is cleared; otherwise the oldest
    /// entry is evicted and the window keeps sliding.
    pub fn observe(&mut self, detection: Option<Detection>) -> SteadyDecision {
        let Some(detection) = detection else {
            return SteadyDecision::Ignore;
        };

        if self.window.len() + 1 < self.window_len {
            self.window.push_back(detection);
            return SteadyDecision::Continue;
        }

        self.window.push_back(detection);
        if self.all_pairs_agree() {
            debug!(window = self.window.len(), "boundary settled");
            self.window.clear();
            SteadyDecision::Settle
        } else {
            self.window.pop_front();
            SteadyDecision::Continue
        }
    }

    fn all_pairs_agree(&self) -> bool {
        for i in 0..self.window.len() {
            for j in (i + 1)..self.window.len() {
                let iou = intersection_over_union(
                    &self.window[i].quadrilateral,
                    &self.window[j].quadrilateral,
                );
                if iou <= self.threshold {
                    return false;
                }
            }
        }
        true
    }

    /// Discard all window state (capture begun, or session retake).
    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steadyscan_core::types::{Point, Quadrilateral};

    fn detection(points: [(f64, f64); 4]) -> Detection {
        Detection::new(
            Quadrilateral::new([
                Point::new(points[0].0, points[0].1),
                Point::new(points[1].0, points[1].1),
                Point::new(points[2].0, points[2].1),
                Point::new(points[3].0, points[3].1),
            ]),
            90.0,
        )
    }

    fn held_boundary() -> Detection {
        detection([(10.0, 10.0), (90.0, 10.0), (90.0, 90.0), (10.0, 90.0)])
    }

    fn tracker() -> SteadinessTracker {
        SteadinessTracker::new(&CaptureConfig::default())
    }

    #[test]
    fn three_identical_detections_settle_on_third() {
        let mut tracker = tracker();
        assert_eq!(tracker.observe(Some(held_boundary())), SteadyDecision::Continue);
        assert_eq!(tracker.observe(Some(held_boundary())), SteadyDecision::Continue);
        assert_eq!(tracker.observe(Some(held_boundary())), SteadyDecision::Settle);
    }

    #[test]
    fn window_is_empty_after_settle() {
        let mut tracker = tracker();
        tracker.observe(Some(held_boundary()));
        tracker.observe(Some(held_boundary()));
        assert_eq!(tracker.observe(Some(held_boundary())), SteadyDecision::Settle);

        assert!(tracker.is_empty());
        // The next observation behaves like the first ever.
        assert_eq!(tracker.observe(Some(held_boundary())), SteadyDecision::Continue);
    }

    #[test]
    fn moved_boundary_keeps_sliding() {
        let mut tracker = tracker();
        let far = detection([(200.0, 200.0), (300.0, 200.0), (300.0, 300.0), (200.0, 300.0)]);

        tracker.observe(Some(held_boundary()));
        tracker.observe(Some(held_boundary()));
        assert_eq!(tracker.observe(Some(far)), SteadyDecision::Continue);
        // Oldest was evicted, so the window holds [held, far].
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn slow_drift_does_not_settle() {
        // A 100px square sliding 5px per frame: consecutive pairs score
        // 95/105 ≈ 0.905, above the threshold, but oldest-vs-newest is only
        // 90/110 ≈ 0.818 — the all-pairs test rejects the drift.
        let mut tracker = tracker();
        let step =
            |dx: f64| detection([(dx, 0.0), (dx + 100.0, 0.0), (dx + 100.0, 100.0), (dx, 100.0)]);

        tracker.observe(Some(step(0.0)));
        tracker.observe(Some(step(5.0)));
        assert_eq!(tracker.observe(Some(step(10.0))), SteadyDecision::Continue);
    }

    #[test]
    fn empty_cycle_is_ignored_and_window_untouched() {
        let mut tracker = tracker();
        tracker.observe(Some(held_boundary()));
        tracker.observe(Some(held_boundary()));

        assert_eq!(tracker.observe(None), SteadyDecision::Ignore);
        assert_eq!(tracker.len(), 2);

        // The pending pair still settles on the next real detection.
        assert_eq!(tracker.observe(Some(held_boundary())), SteadyDecision::Settle);
    }

    #[test]
    fn reset_clears_the_window() {
        let mut tracker = tracker();
        tracker.observe(Some(held_boundary()));
        tracker.observe(Some(held_boundary()));
        tracker.reset();
        assert!(tracker.is_empty());
    }

    #[test]
    fn window_never_exceeds_configured_length() {
        let mut tracker = tracker();
        let wander = |i: f64| {
            detection([
                (i * 50.0, 0.0),
                (i * 50.0 + 100.0, 0.0),
                (i * 50.0 + 100.0, 100.0),
                (i * 50.0, 100.0),
            ])
        };
        for i in 0..10 {
            tracker.observe(Some(wander(f64::from(i))));
            assert!(tracker.len() <= 3);
        }
    }
}
