// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end scan simulation without camera hardware: a scripted detector
// wobbles a boundary for a few frames and then holds it steady, the session
// auto-captures through a fake camera, and the crop stage reuses the live
// detection before confirming the final photo-space boundary.
//
// Run with: cargo run --example simulated_scan

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tracing::info;

use steadyscan_bridge::{DocumentDetector, StillCamera};
use steadyscan_capture::{CropAdjustment, FrameAction, ImageFileRotator, ScanSession};
use steadyscan_core::CaptureConfig;
use steadyscan_core::error::Result;
use steadyscan_core::types::{
    CameraFrame, CapturedPhoto, Detection, ExifOrientation, PixelDimensions, Point, Quadrilateral,
    SensorOrientation,
};

fn boundary(offset: f64) -> Detection {
    Detection::new(
        Quadrilateral::new([
            Point::new(140.0 + offset, 90.0),
            Point::new(1130.0 + offset, 110.0),
            Point::new(1120.0 + offset, 630.0),
            Point::new(150.0 + offset, 610.0),
        ]),
        92.5,
    )
}

/// Replays a scripted wobble, then reports the held boundary forever.
struct ScriptedDetector {
    wobble: Mutex<VecDeque<Option<Detection>>>,
}

impl ScriptedDetector {
    fn new() -> Self {
        Self {
            wobble: Mutex::new(VecDeque::from([
                None,
                Some(boundary(120.0)),
                Some(boundary(60.0)),
                Some(boundary(25.0)),
            ])),
        }
    }
}

impl DocumentDetector for ScriptedDetector {
    fn detect_frame(
        &self,
        _frame: &CameraFrame,
        _template: Option<&str>,
    ) -> Result<Option<Detection>> {
        let mut wobble = self.wobble.lock().expect("script mutex");
        Ok(wobble.pop_front().unwrap_or_else(|| Some(boundary(0.0))))
    }

    fn detect_file(&self, _path: &Path, _template: Option<&str>) -> Result<Option<Detection>> {
        Ok(Some(boundary(0.0)))
    }
}

/// Camera that returns a fixed still photo sharing the frame's aspect ratio.
struct ScriptedCamera;

impl StillCamera for ScriptedCamera {
    async fn take_photo(&self) -> Result<CapturedPhoto> {
        Ok(CapturedPhoto::new(
            PathBuf::from("/tmp/steadyscan-simulated.jpg"),
            PixelDimensions::new(3840, 2160),
            ExifOrientation::UPRIGHT,
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let config = CaptureConfig::default();
    let detector = ScriptedDetector::new();
    let camera = ScriptedCamera;
    let rotator = ImageFileRotator;
    let viewport = PixelDimensions::new(1080, 1920);

    let frame = CameraFrame {
        dimensions: PixelDimensions::new(1280, 720),
        orientation: SensorOrientation::Upright,
        data: Vec::new(),
    };
    let tick = Duration::from_millis(1000 / u64::from(config.target_detection_fps));

    let mut session = ScanSession::new(&config);
    loop {
        let detection = detector.detect_frame(&frame, config.detection_template.as_deref())?;
        match session.observe_frame(frame.dimensions, frame.orientation, detection) {
            FrameAction::TriggerCapture => break,
            FrameAction::Continue | FrameAction::Dropped => tokio::time::sleep(tick).await,
        }
    }

    let outcome = session.capture(&camera, &rotator).await?;
    info!(photo = %outcome.photo.path.display(), "auto-capture complete");

    let mut crop = CropAdjustment::from_capture(&outcome, viewport, &detector, &config)?;
    info!(corners = ?crop.corners(), "initial crop handles");

    // Nudge the bottom-right handle a few pixels, as a user would.
    let bottom_right = crop.corners()[2];
    crop.select_handle(Point::new(bottom_right.x + 4.0, bottom_right.y + 4.0));
    crop.drag_by(3.0, 2.0);
    crop.drag_by(2.0, 1.0);

    let confirmed = crop.confirm();
    info!(corners = ?confirmed.corners, "confirmed crop boundary in photo space");

    Ok(())
}
