// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub capabilities for desktop/CI builds where the native camera and
// detection SDK are unavailable.
//
// Every method returns `PlatformUnavailable` — real implementations are
// provided by the host application's iOS/Android bindings.

use std::path::Path;

use steadyscan_core::error::{Result, ScanError};
use steadyscan_core::types::{CameraFrame, CapturedPhoto, Detection};

use crate::traits::{DocumentDetector, PhotoRotator, StillCamera};

/// No-op detector returned on platforms without the detection SDK.
pub struct StubDetector;

impl DocumentDetector for StubDetector {
    fn detect_frame(
        &self,
        _frame: &CameraFrame,
        _template: Option<&str>,
    ) -> Result<Option<Detection>> {
        tracing::warn!("DocumentDetector::detect_frame called on stub bridge");
        Err(ScanError::PlatformUnavailable)
    }

    fn detect_file(&self, _path: &Path, _template: Option<&str>) -> Result<Option<Detection>> {
        tracing::warn!("DocumentDetector::detect_file called on stub bridge");
        Err(ScanError::PlatformUnavailable)
    }
}

/// No-op camera returned on platforms without capture hardware.
pub struct StubCamera;

impl StillCamera for StubCamera {
    async fn take_photo(&self) -> Result<CapturedPhoto> {
        tracing::warn!("StillCamera::take_photo called on stub bridge");
        Err(ScanError::PlatformUnavailable)
    }
}

/// No-op rotator for platforms that delegate EXIF correction elsewhere.
pub struct StubRotator;

impl PhotoRotator for StubRotator {
    fn rotate_file(&self, _path: &Path, _degrees: u32) -> Result<()> {
        tracing::warn!("PhotoRotator::rotate_file called on stub bridge");
        Err(ScanError::PlatformUnavailable)
    }
}
