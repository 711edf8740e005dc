// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan-session state machine: feeds live detections through the steadiness
// tracker, fires a single still capture when the boundary settles, and
// carries the frame-space detection across to the crop stage.
//
// All state lives on the session object itself; there are no ambient
// globals. Transitions are only triggered from the single event stream
// (detection callback, capture completion, user gesture), in program order,
// so no locking is needed. The `Capturing` state doubles as the gate that
// drops detections while a capture is in flight.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use steadyscan_bridge::{PhotoRotator, StillCamera};
use steadyscan_core::CaptureConfig;
use steadyscan_core::error::{Result, ScanError};
use steadyscan_core::types::{
    CaptureOutcome, CapturedPhoto, Detection, ExifOrientation, PixelDimensions, SensorOrientation,
    SessionId,
};

use crate::orientation::{CornerLabels, correct_orientation};
use crate::steadiness::{SteadinessTracker, SteadyDecision};

/// Lifecycle states of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Live detection is running; nothing captured yet.
    Scanning,
    /// A still capture is in flight; detections are dropped.
    Capturing,
    /// A photo has been captured and handed to the crop stage.
    Done,
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            Self::Scanning => "scanning",
            Self::Capturing => "capturing",
            Self::Done => "done",
        }
    }
}

/// What the caller should do after feeding one frame's detection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameAction {
    /// Keep streaming frames.
    Continue,
    /// The boundary settled — run `capture` now.
    TriggerCapture,
    /// The frame was discarded (capture in flight, or session done).
    Dropped,
}

/// One scanning session: steadiness window, state machine, and the
/// detection pinned at the moment of capture.
///
/// Each session owns its state outright; tearing down the scanning UI
/// discards it, and a new session starts fresh.
pub struct ScanSession {
    id: SessionId,
    state: SessionState,
    tracker: SteadinessTracker,
    /// Dimensions of the upright frame the latest detection was made in.
    frame: Option<PixelDimensions>,
    /// The detection that settled the window, in upright frame space.
    pinned: Option<Detection>,
}

impl ScanSession {
    pub fn new(config: &CaptureConfig) -> Self {
        let id = SessionId::new();
        info!(session = %id, "scan session started");
        Self {
            id,
            state: SessionState::Scanning,
            tracker: SteadinessTracker::new(config),
            frame: None,
            pinned: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Feed the detection result of one camera frame.
    ///
    /// Synchronous and non-blocking — must complete within a frame tick.
    /// Outside `Scanning` the frame is dropped without touching any state,
    /// which is what prevents a second capture from racing the first.
    ///
    /// Landscape-right frames are rotated upright and their corners
    /// re-labelled before entering the window; frames whose corners cannot
    /// be labelled are skipped like empty detector cycles.
    pub fn observe_frame(
        &mut self,
        frame: PixelDimensions,
        sensor: SensorOrientation,
        detection: Option<Detection>,
    ) -> FrameAction {
        if self.state != SessionState::Scanning {
            return FrameAction::Dropped;
        }

        let corrected = detection.and_then(|d| {
            match correct_orientation(d.quadrilateral, frame, sensor) {
                CornerLabels::Resolved(quadrilateral) => Some(Detection { quadrilateral, ..d }),
                CornerLabels::Ambiguous => {
                    debug!(session = %self.id, "corner labelling ambiguous, skipping frame");
                    None
                }
            }
        });

        if corrected.is_some() {
            self.frame = Some(match sensor {
                SensorOrientation::Upright => frame,
                SensorOrientation::LandscapeRight => frame.swapped(),
            });
        }

        match self.tracker.observe(corrected) {
            SteadyDecision::Settle => {
                self.pinned = corrected;
                self.state = SessionState::Capturing;
                info!(session = %self.id, "boundary settled, requesting capture");
                FrameAction::TriggerCapture
            }
            SteadyDecision::Continue | SteadyDecision::Ignore => FrameAction::Continue,
        }
    }

    /// Request the still photo for a settled boundary.
    ///
    /// The single asynchronous boundary of the engine: suspends until the
    /// camera returns. Only legal in `Capturing` — at most one capture per
    /// settle, and a second call is rejected rather than re-entering the
    /// camera.
    ///
    /// On success the photo is EXIF-corrected in place if needed and the
    /// session moves to `Done`. On failure the session returns to
    /// `Scanning` with a cleared window so the caller can surface a notice
    /// and resume detection.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn capture<C, R>(&mut self, camera: &C, rotator: &R) -> Result<CaptureOutcome>
    where
        C: StillCamera,
        R: PhotoRotator,
    {
        if self.state != SessionState::Capturing {
            return Err(ScanError::InvalidState(self.state.name()));
        }

        let photo = match camera.take_photo().await {
            Ok(photo) => photo,
            Err(err) => {
                warn!(error = %err, "still capture failed, resuming detection");
                self.resume_scanning();
                return Err(err);
            }
        };

        let photo = match self.correct_photo_orientation(photo, rotator) {
            Ok(photo) => photo,
            Err(err) => {
                warn!(error = %err, "photo rotation failed, resuming detection");
                self.resume_scanning();
                return Err(err);
            }
        };

        let detection = self
            .pinned
            .take()
            .ok_or(ScanError::InvalidState("capturing without a detection"))?;
        let frame = self
            .frame
            .ok_or(ScanError::InvalidState("capturing without frame dimensions"))?;

        self.state = SessionState::Done;
        info!(
            path = %photo.path.display(),
            width = photo.dimensions.width,
            height = photo.dimensions.height,
            "capture complete"
        );

        Ok(CaptureOutcome {
            photo,
            detection,
            frame,
        })
    }

    /// Rotate a 90°-tagged photo file upright and swap its dimensions.
    fn correct_photo_orientation<R: PhotoRotator>(
        &self,
        photo: CapturedPhoto,
        rotator: &R,
    ) -> Result<CapturedPhoto> {
        if !photo.orientation.needs_rotation() {
            return Ok(photo);
        }

        debug!(session = %self.id, "correcting 90° photo orientation");
        rotator.rotate_file(&photo.path, 90)?;
        Ok(CapturedPhoto {
            dimensions: photo.dimensions.swapped(),
            orientation: ExifOrientation::UPRIGHT,
            ..photo
        })
    }

    /// Discard all capture state and return to live scanning (user retake,
    /// or recovery from a failed capture).
    pub fn retake(&mut self) {
        info!(session = %self.id, "retake, resuming detection");
        self.resume_scanning();
    }

    fn resume_scanning(&mut self) {
        self.tracker.reset();
        self.pinned = None;
        self.state = SessionState::Scanning;
    }
}
