//! # Boundary Resolver
//!
//! For one endpoint of a straight bar, finds the line that trims it and the
//! clearance gap to subtract there. Checked in priority order:
//!
//! 1. **Frame edge**: the point lies on the opening boundary (top, bottom,
//!    left, right). Clearance is the glass-to-frame margin.
//! 2. **Crossing bar**: the point lies on another, non-parallel bar. The
//!    other bar's axis is the boundary, clearance is half its face width plus
//!    the joint clearance. Collinear splices are skipped.
//! 3. **Free end**: a perpendicular through the point, clearance 0.
//!
//! Other bars are scanned in input order, so ties resolve reproducibly.

use crate::cut_list::CutListParams;
use muntinkit_core::{Bar, Line, Point, Rect};
use serde::{Deserialize, Serialize};

/// Which end of a bar is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarEnd {
    Start,
    End,
}

/// What kind of joint governs a bar end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    Frame,
    /// Butts against the bar with this id
    Crossing { bar_id: usize },
    Free,
}

/// A trimming line paired with the clearance subtracted at that joint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub line: Line,
    pub clearance: f64,
    pub kind: BoundaryKind,
}

/// Resolves the boundary at each bar end against an opening and its siblings
pub struct BoundaryResolver<'a> {
    bars: &'a [Bar],
    rect: Rect,
    params: &'a CutListParams,
}

impl<'a> BoundaryResolver<'a> {
    pub fn new(bars: &'a [Bar], rect: Rect, params: &'a CutListParams) -> Self {
        Self { bars, rect, params }
    }

    /// Resolve the boundary for one end of `bars[index]`
    pub fn resolve(&self, index: usize, end: BarEnd) -> Boundary {
        let bar = &self.bars[index];
        let point = match end {
            BarEnd::Start => bar.start,
            BarEnd::End => bar.end,
        };

        if let Some(edge) = self.rect.edge_at(point, self.params.boundary_epsilon) {
            return Boundary {
                line: edge,
                clearance: self.params.frame_clearance,
                kind: BoundaryKind::Frame,
            };
        }

        if let Some(other) = self.find_crossing(index, point) {
            return Boundary {
                line: other.axis(),
                clearance: other.face_width / 2.0 + self.params.joint_clearance,
                kind: BoundaryKind::Crossing { bar_id: other.id },
            };
        }

        Boundary {
            line: bar.axis().perpendicular_through(point),
            clearance: 0.0,
            kind: BoundaryKind::Free,
        }
    }

    fn find_crossing(&self, index: usize, point: Point) -> Option<&'a Bar> {
        let eps = self.params.boundary_epsilon;
        let dir = self.bars[index].axis().vector().normalized();

        self.bars.iter().enumerate().find_map(|(i, other)| {
            if i == index || !is_point_on_segment(point, other.start, other.end, eps) {
                return None;
            }
            let other_dir = other.axis().vector().normalized();
            // Collinear touches are splices, not structural crossings
            if dir.cross(&other_dir).abs() < eps {
                return None;
            }
            Some(other)
        })
    }
}

/// True when `p` lies on segment a→b within `eps` (perpendicular distance
/// and projection along the segment).
pub fn is_point_on_segment(p: Point, a: Point, b: Point, eps: f64) -> bool {
    let ab = b - a;
    let len = ab.length();
    if len < muntinkit_core::geometry::DEGENERATE_EPSILON {
        return p.distance_to(&a) <= eps;
    }
    let ap = p - a;
    if (ab.cross(&ap) / len).abs() > eps {
        return false;
    }
    let projection = ab.dot(&ap) / len;
    projection >= -eps && projection <= len + eps
}
