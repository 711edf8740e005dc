// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture policy configuration.

use serde::{Deserialize, Serialize};

/// Tunable policy constants for a scan session.
///
/// The defaults reproduce the behaviour the capture pipeline was tuned
/// against on device; they are exposed for experimentation, not because any
/// deployment is known to need different values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Minimum pairwise IoU for consecutive detections to count as steady.
    pub steadiness_threshold: f64,
    /// How many recent detections must agree before auto-capture (window
    /// length of the steadiness tracker).
    pub steadiness_window: usize,
    /// Target detector cadence, driven by the frame producer.
    pub target_detection_fps: u32,
    /// Per-event drag step above which a corner-handle move is discarded as
    /// gesture jitter (applies to each axis independently).
    pub max_drag_step: f64,
    /// Side length of the square corner handles, in display pixels.
    pub handle_size: f64,
    /// Side length of the tap hit box around each corner handle.
    pub handle_hit_box: f64,
    /// Detector template name, e.g. an HSV template for documents on white
    /// backgrounds. `None` selects the detector default.
    pub detection_template: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            steadiness_threshold: 0.9,
            steadiness_window: 3,
            target_detection_fps: 3,
            max_drag_step: 5.0,
            handle_size: 10.0,
            handle_hit_box: 35.0,
            detection_template: None,
        }
    }
}
