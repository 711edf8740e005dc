// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// steadyscan-capture — The document-scan capture engine.
//
// Provides quadrilateral geometry (bounding rects, IoU), coordinate mapping
// between frame/display/photo space, the temporal steadiness test that gates
// auto-capture, the scan-session state machine, and the manual crop
// adjustment model.

pub mod adjust;
pub mod geometry;
pub mod mapping;
pub mod orientation;
pub mod rotate;
pub mod session;
pub mod steadiness;

// Re-export the primary types so callers can use `steadyscan_capture::ScanSession` etc.
pub use adjust::CropAdjustment;
pub use orientation::CornerLabels;
pub use rotate::ImageFileRotator;
pub use session::{FrameAction, ScanSession, SessionState};
pub use steadiness::{SteadinessTracker, SteadyDecision};
