// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sensor-orientation correction for frame-space detections.
//
// Some camera stacks deliver landscape-right frames while the UI runs
// portrait. Before such a detection can enter the steadiness window its
// points must be rotated into upright frame space and re-labelled into
// canonical corner order.

use steadyscan_core::types::{PixelDimensions, Point, Quadrilateral, SensorOrientation};

/// Result of corner re-labelling.
///
/// A point lying exactly on a centre axis, or two points falling into the
/// same quadrant, cannot be labelled; such frames are reported as
/// `Ambiguous` and the caller skips them rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerLabels {
    /// Corners in {top-left, top-right, bottom-right, bottom-left} order.
    Resolved(Quadrilateral),
    Ambiguous,
}

/// Rotate a detection into upright frame space and re-label its corners.
///
/// `frame` is the dimensions of the frame the detection was made in, as
/// delivered by the sensor. Upright frames pass through with their original
/// corner order; landscape-right frames get each point `(x, y)` remapped to
/// `(frame_height - y, x)` and are then re-labelled against the rotated
/// frame's centre.
pub fn correct_orientation(
    quad: Quadrilateral,
    frame: PixelDimensions,
    sensor: SensorOrientation,
) -> CornerLabels {
    match sensor {
        SensorOrientation::Upright => CornerLabels::Resolved(quad),
        SensorOrientation::LandscapeRight => {
            let rotated = quad.map(|p| Point::new(f64::from(frame.height) - p.y, p.x));
            relabel_corners(&rotated, frame.swapped())
        }
    }
}

/// Re-derive canonical corner order by quadrant tests against the frame
/// centre.
///
/// Strictly less/greater comparisons on both axes: top-left is the point
/// left of and above centre, and so on around. Each quadrant must claim
/// exactly one point for the labelling to resolve.
pub fn relabel_corners(quad: &Quadrilateral, frame: PixelDimensions) -> CornerLabels {
    let centre_x = f64::from(frame.width) / 2.0;
    let centre_y = f64::from(frame.height) / 2.0;

    let mut top_left = None;
    let mut top_right = None;
    let mut bottom_right = None;
    let mut bottom_left = None;

    for p in quad.corners {
        let slot = if p.x < centre_x && p.y < centre_y {
            &mut top_left
        } else if p.x > centre_x && p.y < centre_y {
            &mut top_right
        } else if p.x > centre_x && p.y > centre_y {
            &mut bottom_right
        } else if p.x < centre_x && p.y > centre_y {
            &mut bottom_left
        } else {
            // On a centre axis — no quadrant matches.
            return CornerLabels::Ambiguous;
        };

        if slot.is_some() {
            return CornerLabels::Ambiguous;
        }
        *slot = Some(p);
    }

    match (top_left, top_right, bottom_right, bottom_left) {
        (Some(tl), Some(tr), Some(br), Some(bl)) => {
            CornerLabels::Resolved(Quadrilateral::new([tl, tr, br, bl]))
        }
        _ => CornerLabels::Ambiguous,
    }
}
