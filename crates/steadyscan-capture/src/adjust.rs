// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Manual corner adjustment over the captured photo: initial handle
// placement, tap selection, drag updates, and the final display-to-photo
// mapping on confirm.

use tracing::{debug, info, instrument};

use steadyscan_bridge::DocumentDetector;
use steadyscan_core::CaptureConfig;
use steadyscan_core::error::Result;
use steadyscan_core::types::{CaptureOutcome, PixelDimensions, Point, Quadrilateral, Rect};

use crate::mapping::{frame_to_photo, from_display_space, to_display_space};

/// Placeholder corners shown when neither the live detection nor a fresh
/// pass over the still photo produced a boundary; the user drags them into
/// place from scratch.
const PLACEHOLDER_CORNERS: [Point; 4] = [
    Point { x: 100.0, y: 50.0 },
    Point { x: 200.0, y: 50.0 },
    Point { x: 200.0, y: 100.0 },
    Point { x: 100.0, y: 100.0 },
];

/// Interactive crop model: four display-space corner handles over the
/// letterboxed photo, one of which may be selected for dragging.
pub struct CropAdjustment {
    photo: PixelDimensions,
    viewport: PixelDimensions,
    /// Current corner positions, in display space.
    corners: [Point; 4],
    selected: Option<usize>,
    max_drag_step: f64,
    handle_size: f64,
    handle_hit_box: f64,
}

impl CropAdjustment {
    /// Build the initial crop model from a completed capture.
    ///
    /// The photo's stored dimensions are reconciled with the frame
    /// orientation first (camera stacks disagree on whether a rotated photo
    /// reports swapped width/height). The live frame-space detection is then
    /// reused when frame and photo share an aspect ratio; otherwise the
    /// still photo gets a fresh detector pass — rescaling across different
    /// aspect ratios would silently misplace every corner.
    #[instrument(skip_all, fields(photo = %outcome.photo.path.display()))]
    pub fn from_capture<D: DocumentDetector>(
        outcome: &CaptureOutcome,
        viewport: PixelDimensions,
        detector: &D,
        config: &CaptureConfig,
    ) -> Result<Self> {
        let mut photo = outcome.photo.dimensions;
        if photo.is_landscape() != outcome.frame.is_landscape() {
            debug!("frame and photo orientation disagree, swapping photo dimensions");
            photo = photo.swapped();
        }

        let photo_quad = if outcome.frame.same_aspect_as(&photo) {
            debug!("reusing live detection for crop handles");
            Some(
                outcome
                    .detection
                    .quadrilateral
                    .map(|p| frame_to_photo(p, outcome.frame, photo)),
            )
        } else {
            info!("frame/photo aspect mismatch, re-detecting on still photo");
            detector
                .detect_file(&outcome.photo.path, config.detection_template.as_deref())?
                .map(|d| d.quadrilateral)
        };

        let corners = match photo_quad {
            Some(quad) => quad.map(|p| to_display_space(p, photo, viewport)).corners,
            None => {
                debug!("no boundary on still photo, using placeholder corners");
                PLACEHOLDER_CORNERS
            }
        };

        Ok(Self {
            photo,
            viewport,
            corners,
            selected: None,
            max_drag_step: config.max_drag_step,
            handle_size: config.handle_size,
            handle_hit_box: config.handle_hit_box,
        })
    }

    /// Current display-space corner positions.
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Index of the handle currently selected for dragging, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Photo dimensions after orientation reconciliation.
    pub fn photo_dimensions(&self) -> PixelDimensions {
        self.photo
    }

    /// The square handle drawn for a corner.
    ///
    /// Handles hang off their corner towards the outside of the polygon:
    /// the top-left handle sits above-left of its corner, the top-right
    /// above-right, and so on around.
    pub fn handle_rect(&self, index: usize) -> Rect {
        let s = self.handle_size;
        let p = self.corners[index];
        let (dx, dy) = match index {
            0 => (-s, -s),
            1 => (0.0, -s),
            2 => (0.0, 0.0),
            3 => (-s, 0.0),
            _ => panic!("corner index out of range: {index}"),
        };
        Rect {
            x: p.x + dx,
            y: p.y + dy,
            width: s,
            height: s,
        }
    }

    /// Hit-test a tap against the corner handles and select the first hit.
    ///
    /// A tap counts as a hit when it lands within the hit box of a handle's
    /// anchor on both axes. When hit boxes overlap, the lowest corner index
    /// wins. A miss leaves any existing selection in place.
    pub fn select_handle(&mut self, tap: Point) -> Option<usize> {
        for index in 0..4 {
            let rect = self.handle_rect(index);
            if (tap.x - rect.x).abs() < self.handle_hit_box
                && (tap.y - rect.y).abs() < self.handle_hit_box
            {
                debug!(index, "corner handle selected");
                self.selected = Some(index);
                return Some(index);
            }
        }
        None
    }

    /// Move the selected corner by a pan delta.
    ///
    /// Deltas at or above the configured cutoff on either axis are discarded
    /// as gesture noise (multi-touch jitter produces large jumps between
    /// consecutive pan events; real drags arrive as a stream of small
    /// steps). Returns whether the corner moved.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        if dx.abs() >= self.max_drag_step || dy.abs() >= self.max_drag_step {
            debug!(dx, dy, "drag step discarded as jitter");
            return false;
        }
        self.corners[index].x += dx;
        self.corners[index].y += dy;
        true
    }

    /// Map the current corners back to photo space as the final crop
    /// boundary.
    pub fn confirm(&self) -> Quadrilateral {
        let quad = Quadrilateral::new(self.corners)
            .map(|p| from_display_space(p, self.photo, self.viewport));
        info!(corners = ?quad.corners, "crop confirmed");
        quad
    }
}
