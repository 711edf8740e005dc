// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Steadyscan capture engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in some pixel coordinate space.
///
/// Which space (frame, display, or photo) a point lives in is tracked by the
/// caller — the type carries no space tag, and conversions must never be
/// applied twice without an intervening inverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An ordered four-corner polygon representing a detected or user-edited
/// document boundary.
///
/// Corner order is significant for rendering (the last edge closes corner 3
/// back to corner 0) and, after orientation correction, corresponds to
/// {top-left, top-right, bottom-right, bottom-left}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub corners: [Point; 4],
}

impl Quadrilateral {
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Build a quadrilateral from a slice of corner points.
    ///
    /// Anything other than exactly four points is a programming error in the
    /// caller and fails loudly rather than degrading silently.
    pub fn from_slice(points: &[Point]) -> Self {
        assert_eq!(points.len(), 4, "a document boundary has exactly 4 corners");
        Self {
            corners: [points[0], points[1], points[2], points[3]],
        }
    }

    /// Apply a per-point transform, preserving corner order.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            corners: [
                f(self.corners[0]),
                f(self.corners[1]),
                f(self.corners[2]),
                f(self.corners[3]),
            ],
        }
    }
}

/// Axis-aligned rectangle in some pixel coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fractional on-screen size of content rendered under "contain" fit.
///
/// Kept separate from `PixelDimensions` because letterboxed sizes are not
/// generally whole pixels (e.g. 1080 × 607.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

/// Integer pixel dimensions of an image, frame, or viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelDimensions {
    pub width: u32,
    pub height: u32,
}

impl PixelDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Same dimensions with width and height exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Exact aspect-ratio equality via integer cross-multiplication.
    ///
    /// Used to decide whether a live frame-space detection can be rescaled
    /// onto the captured photo or a fresh detection pass is needed.
    pub fn same_aspect_as(&self, other: &PixelDimensions) -> bool {
        u64::from(self.width) * u64::from(other.height)
            == u64::from(self.height) * u64::from(other.width)
    }
}

/// Per-frame sensor rotation as reported by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorOrientation {
    /// Frame pixels are already upright.
    Upright,
    /// Sensor delivered a landscape-right frame — points need a 90° remap
    /// before they can be compared against upright frames.
    LandscapeRight,
}

/// EXIF orientation code carried in captured photo metadata.
///
/// Only code 6 (stored rotated 90° counter-clockwise, display requires a 90°
/// clockwise turn) occurs on the supported camera stacks; every other code is
/// treated as upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExifOrientation(pub u16);

impl ExifOrientation {
    pub const UPRIGHT: ExifOrientation = ExifOrientation(1);
    pub const ROTATED_90_CW: ExifOrientation = ExifOrientation(6);

    /// Whether the stored pixels need a 90° rotation before use.
    pub fn needs_rotation(&self) -> bool {
        *self == Self::ROTATED_90_CW
    }
}

impl Default for ExifOrientation {
    fn default() -> Self {
        Self::UPRIGHT
    }
}

/// One detector result over one frame or still image.
///
/// A detector invocation yields zero or one of these — the engine only ever
/// acts on the first/best candidate the detector reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// The detected boundary, in the coordinate space of the detected image.
    pub quadrilateral: Quadrilateral,
    /// Detector confidence that the boundary is a document edge, 0–100.
    pub confidence: f32,
    pub detected_at: DateTime<Utc>,
}

impl Detection {
    pub fn new(quadrilateral: Quadrilateral, confidence: f32) -> Self {
        Self {
            quadrilateral,
            confidence,
            detected_at: Utc::now(),
        }
    }
}

/// A raw camera frame handed to the detector.
///
/// The pixel payload is opaque to the engine — only the detector interprets
/// it.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub dimensions: PixelDimensions,
    pub orientation: SensorOrientation,
    pub data: Vec<u8>,
}

/// A still photo returned by the camera collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedPhoto {
    /// Path of the encoded photo file on disk.
    pub path: PathBuf,
    /// Stored pixel dimensions, before any EXIF rotation is applied.
    pub dimensions: PixelDimensions,
    pub orientation: ExifOrientation,
    pub taken_at: DateTime<Utc>,
}

impl CapturedPhoto {
    pub fn new(path: PathBuf, dimensions: PixelDimensions, orientation: ExifOrientation) -> Self {
        Self {
            path,
            dimensions,
            orientation,
            taken_at: Utc::now(),
        }
    }
}

/// Everything the crop stage needs from a completed capture: the photo, the
/// frame-space detection pinned at the moment of capture, and the dimensions
/// of the frame that detection was made in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub photo: CapturedPhoto,
    pub detection: Detection,
    pub frame: PixelDimensions,
}
