//! Segment length calculation
//!
//! Combines a bar axis with the boundary lines at each end into the
//! production cut length:
//!
//! `final = max(0, axis_length + correction_start + correction_end - clearance_start - clearance_end)`
//!
//! where the correction at each end is `(face_width / 2) / tan(angle)` for a
//! non-square miter and zero for near-parallel (< 1°) or square (≥ 89.9°)
//! joints.

use crate::boundary::Boundary;
use muntinkit_core::{angle_between, distance, Bar, Line, Point};
use serde::{Deserialize, Serialize};

/// Below this angle the joint is treated as degenerate (no correction)
pub const MIN_CORRECTION_ANGLE: f64 = 1.0;

/// From this angle on the joint is a square cut (no correction)
pub const SQUARE_CUT_ANGLE: f64 = 89.9;

/// Cut geometry for one bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutResult {
    /// Production length, never negative
    pub final_length: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Axis/boundary intersection at the start (diagnostics only)
    pub trimmed_start: Point,
    /// Axis/boundary intersection at the end (diagnostics only)
    pub trimmed_end: Point,
}

/// Extra axial length needed for the outer corner to reach the boundary
pub fn miter_correction(face_width: f64, angle_deg: f64) -> f64 {
    if !(MIN_CORRECTION_ANGLE..SQUARE_CUT_ANGLE).contains(&angle_deg) {
        return 0.0;
    }
    (face_width / 2.0) / angle_deg.to_radians().tan()
}

/// Compute the cut for `bar` trimmed by two boundary lines.
///
/// A boundary parallel to the axis falls back to the bar's own endpoint.
pub fn calculate_segment(
    bar: &Bar,
    start_boundary: &Line,
    end_boundary: &Line,
    clearance_start: f64,
    clearance_end: f64,
) -> CutResult {
    let axis = bar.axis();
    let trimmed_start = axis.intersection(start_boundary).unwrap_or(bar.start);
    let trimmed_end = axis.intersection(end_boundary).unwrap_or(bar.end);
    let axis_length = distance(trimmed_start, trimmed_end);

    let start_angle = angle_between(&axis, start_boundary);
    let end_angle = angle_between(&axis, end_boundary);

    let correction_start = miter_correction(bar.face_width, start_angle);
    let correction_end = miter_correction(bar.face_width, end_angle);

    let final_length = (axis_length + correction_start + correction_end
        - clearance_start
        - clearance_end)
        .max(0.0);

    CutResult {
        final_length,
        start_angle,
        end_angle,
        trimmed_start,
        trimmed_end,
    }
}

/// [`calculate_segment`] driven by resolved boundaries
pub fn calculate_with_boundaries(bar: &Bar, start: &Boundary, end: &Boundary) -> CutResult {
    calculate_segment(bar, &start.line, &end.line, start.clearance, end.clearance)
}
