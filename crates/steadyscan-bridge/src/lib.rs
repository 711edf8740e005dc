// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Steadyscan — Native platform bridge abstractions.
//
// Defines the capability traits the capture engine is generic over: the
// document-boundary detector, the still camera, and the photo-file rotator.
// Host applications supply the concrete iOS (Core Foundation) and Android
// (ART/JNI) implementations; the `stub` module covers desktop and CI builds.

pub mod stub;
pub mod traits;

pub use stub::{StubCamera, StubDetector, StubRotator};
pub use traits::{DocumentDetector, PhotoRotator, StillCamera};
