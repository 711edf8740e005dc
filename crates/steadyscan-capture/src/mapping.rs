// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Coordinate mapping between the three pixel spaces a corner point moves
// through: raw camera frame, letterboxed on-screen display, and captured
// photo.
//
// The three conversions carry three deliberately different rounding and
// clamping policies, because each feeds a different consumer: the live
// overlay tolerates a point nudged slightly outward, final-crop coordinates
// must never reference a pixel on or outside the image border, and a
// frame-to-photo rescale must never exceed the actual photo bounds. Keep
// them distinct.

use steadyscan_core::types::{DisplaySize, PixelDimensions, Point};

/// On-screen size of content rendered into a viewport under "contain"
/// (aspect-preserving, letterboxed) fit.
///
/// The returned size always has the content's aspect ratio and fits inside
/// the viewport; one axis fills the viewport exactly.
pub fn display_size(content: PixelDimensions, viewport: PixelDimensions) -> DisplaySize {
    let (cw, ch) = (f64::from(content.width), f64::from(content.height));
    let (vw, vh) = (f64::from(viewport.width), f64::from(viewport.height));

    if ch / cw > vh / vw {
        // Content is taller than the viewport: height-constrained.
        DisplaySize {
            width: cw * (vh / ch),
            height: vh,
        }
    } else {
        DisplaySize {
            width: vw,
            height: ch * (vw / cw),
        }
    }
}

/// Map a content-space point onto the screen.
///
/// Scales by the displayed/content ratio per axis, then offsets by half the
/// letterbox gap. Ceiling-rounded so the overlay is biased outward and never
/// clips a detected edge.
pub fn to_display_space(point: Point, content: PixelDimensions, viewport: PixelDimensions) -> Point {
    let displayed = display_size(content, viewport);
    let x_ratio = displayed.width / f64::from(content.width);
    let y_ratio = displayed.height / f64::from(content.height);
    let x_offset = (f64::from(viewport.width) - displayed.width) / 2.0;
    let y_offset = (f64::from(viewport.height) - displayed.height) / 2.0;

    Point {
        x: (point.x * x_ratio + x_offset).ceil(),
        y: (point.y * y_ratio + y_offset).ceil(),
    }
}

/// Map a screen point back into content space.
///
/// Exact inverse of `to_display_space` up to ceiling rounding, then clamped
/// to `[1, dimension - 1]`: the cropper downstream treats coordinates at or
/// beyond the border (and at 0) specially, so a corner may never land there.
pub fn from_display_space(
    point: Point,
    content: PixelDimensions,
    viewport: PixelDimensions,
) -> Point {
    let displayed = display_size(content, viewport);
    let x_ratio = displayed.width / f64::from(content.width);
    let y_ratio = displayed.height / f64::from(content.height);
    let x_offset = (f64::from(viewport.width) - displayed.width) / 2.0;
    let y_offset = (f64::from(viewport.height) - displayed.height) / 2.0;

    Point {
        x: ((point.x - x_offset) / x_ratio)
            .ceil()
            .clamp(1.0, f64::from(content.width) - 1.0),
        y: ((point.y - y_offset) / y_ratio)
            .ceil()
            .clamp(1.0, f64::from(content.height) - 1.0),
    }
}

/// Rescale a frame-space point into photo space.
///
/// Only valid when frame and photo share an aspect ratio (the caller checks
/// with `PixelDimensions::same_aspect_as`). Ceiling-rounded, then clamped to
/// `[0, dimension]` — inclusive upper bound, unlike `from_display_space`,
/// because this feeds the still-photo detection path rather than the crop
/// confirm path.
pub fn frame_to_photo(point: Point, frame: PixelDimensions, photo: PixelDimensions) -> Point {
    let x_ratio = f64::from(frame.width) / f64::from(photo.width);
    let y_ratio = f64::from(frame.height) / f64::from(photo.height);

    Point {
        x: (point.x / x_ratio).ceil().clamp(0.0, f64::from(photo.width)),
        y: (point.y / y_ratio).ceil().clamp(0.0, f64::from(photo.height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_size_exact_fit_when_aspects_match() {
        let displayed = display_size(
            PixelDimensions::new(720, 1280),
            PixelDimensions::new(1080, 1920),
        );
        assert_eq!(displayed.width, 1080.0);
        assert_eq!(displayed.height, 1920.0);
    }

    #[test]
    fn display_size_rotated_content_is_width_constrained() {
        // Landscape content in a portrait viewport: the width fills and the
        // height letterboxes to 1080 * 720 / 1280 = 607.5.
        let displayed = display_size(
            PixelDimensions::new(1280, 720),
            PixelDimensions::new(1080, 1920),
        );
        assert_eq!(displayed.width, 1080.0);
        assert_eq!(displayed.height, 607.5);
    }

    #[test]
    fn display_size_tall_content_is_height_constrained() {
        let displayed = display_size(
            PixelDimensions::new(720, 2880),
            PixelDimensions::new(1080, 1920),
        );
        assert_eq!(displayed.height, 1920.0);
        assert_eq!(displayed.width, 480.0);
    }

    #[test]
    fn display_size_preserves_aspect_and_fits_viewport() {
        let cases = [
            ((640, 480), (1080, 1920)),
            ((3000, 4000), (1080, 1920)),
            ((4032, 3024), (2160, 1080)),
            ((1080, 1920), (1080, 1920)),
        ];
        for ((cw, ch), (vw, vh)) in cases {
            let content = PixelDimensions::new(cw, ch);
            let viewport = PixelDimensions::new(vw, vh);
            let displayed = display_size(content, viewport);

            assert!(displayed.width <= f64::from(vw) + 1e-9);
            assert!(displayed.height <= f64::from(vh) + 1e-9);
            let content_aspect = f64::from(cw) / f64::from(ch);
            let displayed_aspect = displayed.width / displayed.height;
            assert!(
                (content_aspect - displayed_aspect).abs() < 1e-9,
                "aspect drifted for content {cw}x{ch}"
            );
        }
    }

    #[test]
    fn to_display_applies_letterbox_offset() {
        // 1280x720 content in 1080x1920 viewport: displayed 1080x607.5,
        // vertical letterbox of (1920 - 607.5) / 2 = 656.25 per side.
        let content = PixelDimensions::new(1280, 720);
        let viewport = PixelDimensions::new(1080, 1920);

        let mapped = to_display_space(Point::new(0.0, 0.0), content, viewport);
        assert_eq!(mapped.x, 0.0);
        assert_eq!(mapped.y, 657.0); // ceil(656.25)
    }

    #[test]
    fn round_trip_within_one_pixel() {
        let content = PixelDimensions::new(720, 1280);
        let viewport = PixelDimensions::new(1080, 1920);

        for (x, y) in [(1.0, 1.0), (100.0, 257.0), (359.0, 640.0), (700.0, 1200.0)] {
            let original = Point::new(x, y);
            let there = to_display_space(original, content, viewport);
            let back = from_display_space(there, content, viewport);
            assert!(
                (back.x - original.x).abs() <= 1.0 && (back.y - original.y).abs() <= 1.0,
                "({x}, {y}) round-tripped to ({}, {})",
                back.x,
                back.y
            );
        }
    }

    #[test]
    fn from_display_clamps_inside_borders() {
        let content = PixelDimensions::new(720, 1280);
        let viewport = PixelDimensions::new(1080, 1920);

        // Far outside the displayed rect on both sides.
        let low = from_display_space(Point::new(-500.0, -500.0), content, viewport);
        assert_eq!(low.x, 1.0);
        assert_eq!(low.y, 1.0);

        let high = from_display_space(Point::new(5000.0, 5000.0), content, viewport);
        assert_eq!(high.x, 719.0);
        assert_eq!(high.y, 1279.0);
    }

    #[test]
    fn frame_to_photo_scales_and_ceils() {
        // Frame 1280x720 up to photo 4000x2250 (same aspect): ratio 0.32.
        let frame = PixelDimensions::new(1280, 720);
        let photo = PixelDimensions::new(4000, 2250);

        let mapped = frame_to_photo(Point::new(100.0, 50.0), frame, photo);
        assert_eq!(mapped.x, (100.0f64 / (1280.0 / 4000.0)).ceil());
        assert_eq!(mapped.y, (50.0f64 / (720.0 / 2250.0)).ceil());
    }

    #[test]
    fn frame_to_photo_upper_bound_is_inclusive() {
        let frame = PixelDimensions::new(1280, 720);
        let photo = PixelDimensions::new(4000, 2250);

        let corner = frame_to_photo(Point::new(1280.0, 720.0), frame, photo);
        assert_eq!(corner.x, 4000.0);
        assert_eq!(corner.y, 2250.0);
    }
}
