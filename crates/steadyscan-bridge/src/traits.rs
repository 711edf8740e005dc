// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native capture capabilities.
//
// The engine never talks to a camera or a detection SDK directly. Each
// capability is a trait the host platform implements; the engine stays
// generic over them so sessions can be driven by real hardware on device and
// by scripted fakes in tests.

use std::path::Path;

use steadyscan_core::error::Result;
use steadyscan_core::types::{CameraFrame, CapturedPhoto, Detection};

/// Document-boundary detection over frames and still images.
///
/// The detection algorithm itself is an opaque external capability. A
/// detector may report any number of candidate boundaries internally, but
/// this interface surfaces only the first/best candidate — zero or one
/// result per invocation.
pub trait DocumentDetector {
    /// Detect the dominant document boundary in a live camera frame.
    ///
    /// `template` selects a detector-specific processing template (e.g. an
    /// HSV template for documents on white backgrounds); `None` selects the
    /// detector default.
    fn detect_frame(&self, frame: &CameraFrame, template: Option<&str>) -> Result<Option<Detection>>;

    /// Detect the dominant document boundary in an encoded still image on
    /// disk. Used when a live frame-space detection cannot be reused for the
    /// captured photo.
    fn detect_file(&self, path: &Path, template: Option<&str>) -> Result<Option<Detection>>;
}

/// Still-photo capture from the device camera.
#[allow(async_fn_in_trait)]
pub trait StillCamera {
    /// Request a full-resolution still photo.
    ///
    /// Suspends until the camera returns the encoded photo or fails. At most
    /// one request may be in flight per scan session; the session state
    /// machine enforces this.
    async fn take_photo(&self) -> Result<CapturedPhoto>;
}

/// In-place rotation of an encoded photo file.
pub trait PhotoRotator {
    /// Rotate the photo at `path` clockwise by `degrees` (multiples of 90)
    /// and write it back to the same path.
    fn rotate_file(&self, path: &Path, degrees: u32) -> Result<()>;
}
