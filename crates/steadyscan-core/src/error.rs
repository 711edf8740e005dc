// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Steadyscan.

use thiserror::Error;

/// Top-level error type for all Steadyscan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    // -- Detection --
    #[error("boundary detection failed: {0}")]
    Detector(String),

    // -- Capture --
    #[error("still capture failed: {0}")]
    Camera(String),

    #[error("operation not valid in session state {0}")]
    InvalidState(&'static str),

    // -- Photo handling --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanError>;
