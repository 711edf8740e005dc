// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-place photo rotation backed by the `image` crate.
//
// Mobile targets normally delegate EXIF correction to a native rotator; this
// implementation covers desktop builds and tests, where re-encoding through
// `image` is acceptable.

use std::path::Path;

use tracing::{info, instrument};

use steadyscan_bridge::PhotoRotator;
use steadyscan_core::error::{Result, ScanError};

/// Rotates encoded photo files by decoding, turning, and re-encoding to the
/// same path.
pub struct ImageFileRotator;

impl PhotoRotator for ImageFileRotator {
    #[instrument(skip(self), fields(path = %path.display(), degrees))]
    fn rotate_file(&self, path: &Path, degrees: u32) -> Result<()> {
        let img = image::open(path).map_err(|err| {
            ScanError::ImageError(format!("failed to open photo {}: {}", path.display(), err))
        })?;

        let rotated = match degrees % 360 {
            0 => img,
            90 => img.rotate90(),
            180 => img.rotate180(),
            270 => img.rotate270(),
            other => {
                return Err(ScanError::ImageError(format!(
                    "unsupported rotation angle: {other}"
                )));
            }
        };

        rotated.save(path).map_err(|err| {
            ScanError::ImageError(format!("failed to write rotated photo: {err}"))
        })?;

        info!("photo rotated in place");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn write_test_photo(dir: &tempfile::TempDir, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.path().join("photo.png");
        let img = ImageBuffer::from_pixel(width, height, Rgb([120u8, 130, 140]));
        image::DynamicImage::ImageRgb8(img)
            .save(&path)
            .expect("write test photo");
        path
    }

    #[test]
    fn rotate_90_swaps_dimensions_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_test_photo(&dir, 40, 30);

        ImageFileRotator.rotate_file(&path, 90).expect("rotate");

        let rotated = image::open(&path).expect("reopen");
        assert_eq!(rotated.width(), 30);
        assert_eq!(rotated.height(), 40);
    }

    #[test]
    fn rotate_180_keeps_dimensions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_test_photo(&dir, 40, 30);

        ImageFileRotator.rotate_file(&path, 180).expect("rotate");

        let rotated = image::open(&path).expect("reopen");
        assert_eq!(rotated.width(), 40);
        assert_eq!(rotated.height(), 30);
    }

    #[test]
    fn odd_angle_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_test_photo(&dir, 10, 10);

        let err = ImageFileRotator.rotate_file(&path, 45).expect_err("must reject");
        assert!(matches!(err, ScanError::ImageError(_)));
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let err = ImageFileRotator
            .rotate_file(Path::new("/nonexistent/photo.jpg"), 90)
            .expect_err("must fail");
        assert!(matches!(err, ScanError::ImageError(_)));
    }
}
