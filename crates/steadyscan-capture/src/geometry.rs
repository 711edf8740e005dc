// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pure quadrilateral geometry — bounding rectangles and the
// intersection-over-union similarity metric that drives steadiness
// detection.

use geo::Area;
use geo_clipper::Clipper;
use geo_types::{Coord, LineString, Polygon};

use steadyscan_core::types::{Quadrilateral, Rect};

/// Scale factor applied before clipper's integer arithmetic; 10^4 keeps
/// sub-pixel precision well past anything a camera frame produces.
const CLIP_FACTOR: f64 = 10_000.0;

/// Axis-aligned bounding box of the four corner points.
pub fn bounding_rect(quad: &Quadrilateral) -> Rect {
    let xs = quad.corners.iter().map(|p| p.x);
    let ys = quad.corners.iter().map(|p| p.y);
    let min_x = xs.clone().fold(f64::INFINITY, f64::min);
    let max_x = xs.fold(f64::NEG_INFINITY, f64::max);
    let min_y = ys.clone().fold(f64::INFINITY, f64::min);
    let max_y = ys.fold(f64::NEG_INFINITY, f64::max);

    Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Intersection-over-union of two detected boundaries, in [0, 1].
///
/// The boolean operations run through the clipper library, so concave and
/// self-intersecting inputs are treated as simple polygons rather than
/// panicking. Degenerate (zero-area) or non-overlapping inputs yield 0.
///
/// This is the similarity metric the steadiness tracker compares against its
/// threshold — its precision directly sets the false-trigger rate of
/// auto-capture.
pub fn intersection_over_union(a: &Quadrilateral, b: &Quadrilateral) -> f64 {
    let poly_a = to_polygon(a);
    let poly_b = to_polygon(b);

    let intersection = poly_a.intersection(&poly_b, CLIP_FACTOR).unsigned_area();
    if intersection <= 0.0 {
        return 0.0;
    }

    let union = poly_a.union(&poly_b, CLIP_FACTOR).unsigned_area();
    if union <= 0.0 {
        return 0.0;
    }

    (intersection / union).clamp(0.0, 1.0)
}

/// Build a closed geo polygon from the four corners.
fn to_polygon(quad: &Quadrilateral) -> Polygon<f64> {
    let mut ring: Vec<Coord<f64>> = quad
        .corners
        .iter()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect();
    let first = ring[0];
    ring.push(first);
    Polygon::new(LineString::from(ring), vec![])
}
