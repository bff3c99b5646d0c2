//! # Topology Resolver
//!
//! Cut geometry for angular and freeform layouts (diagonals, spider webs,
//! arch chords) where bars are not an orthogonal grid.
//!
//! 1. Every [`Pattern`] is expanded into raw segments clipped to the usable
//!    rectangle.
//! 2. All pairs of raw segments are intersected as bounded segments.
//! 3. At each crossing [`resolve_continuity`] picks the bar that runs through;
//!    the other one records a cut point.
//! 4. Each segment is split at its cut points and every piece is pulled back
//!    by `face_width / 2 + joint_clearance` on each cut side. Pieces that
//!    invert or shrink to within `boundary_epsilon` are dropped.
//!
//! The resolved pieces become [`CutItem`]s (aggregated like straight cuts)
//! and one [`MountMark`] each.

pub mod patterns;

pub use patterns::{ArchPattern, DiagonalLine, FreeformBar, Pattern, RawSegment, SpiderPattern};

use crate::cut_list::{CutItem, CutListAggregator};
use crate::error::CamToolResult;
use muntinkit_core::error::{ensure_finite, ensure_non_negative};
use muntinkit_core::geometry::{normalize_degrees, segment_intersection};
use muntinkit_core::{angle_between, InputError, Line, Point, Rect};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tolerance around 90°/270° for the near-vertical rule
pub const VERTICAL_TOLERANCE_DEG: f64 = 10.0;

/// Parameters for angular layouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularParams {
    /// Visible profile width of every generated bar (mm)
    pub face_width: f64,
    /// Gap added to half the face width on each side of a crossing (mm)
    pub joint_clearance: f64,
    /// Gap subtracted where a piece meets the frame (mm)
    pub frame_clearance: f64,
    /// Signed length adjustment for the saw (mm)
    pub saw_correction: f64,
    /// Distance within which an endpoint counts as on the frame (mm)
    pub boundary_epsilon: f64,
}

impl Default for AngularParams {
    fn default() -> Self {
        Self {
            face_width: 26.0,
            joint_clearance: 1.0,
            frame_clearance: 1.0,
            saw_correction: 0.0,
            boundary_epsilon: 0.001,
        }
    }
}

impl AngularParams {
    pub fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("face_width", self.face_width)?;
        ensure_non_negative("joint_clearance", self.joint_clearance)?;
        ensure_non_negative("frame_clearance", self.frame_clearance)?;
        ensure_finite("saw_correction", self.saw_correction)?;
        ensure_non_negative("boundary_epsilon", self.boundary_epsilon)
    }
}

/// Which of two crossing segments runs through uninterrupted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    First,
    Second,
}

/// Inputs to the continuity decision for one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuityTraits {
    /// Marked continuous by its pattern
    pub explicit: bool,
    /// Within [`VERTICAL_TOLERANCE_DEG`] of 90° or 270°
    pub near_vertical: bool,
}

impl ContinuityTraits {
    pub fn new(explicit: bool, angle_deg: f64) -> Self {
        Self {
            explicit,
            near_vertical: is_near_vertical(angle_deg),
        }
    }
}

pub fn is_near_vertical(angle_deg: f64) -> bool {
    let a = normalize_degrees(angle_deg);
    (a - 90.0).abs() < VERTICAL_TOLERANCE_DEG || (a - 270.0).abs() < VERTICAL_TOLERANCE_DEG
}

/// Decide which segment is continuous at a crossing.
///
/// | first claims | second claims | winner |
/// |---|---|---|
/// | yes | no  | first  |
/// | no  | yes | second |
/// | yes | yes | first  |
/// | no  | no  | first  |
///
/// A segment claims continuity when it is explicitly marked, or when it is
/// near-vertical and the other one is not explicitly marked. Near-horizontal
/// segments get no preference of their own.
pub fn resolve_continuity(first: ContinuityTraits, second: ContinuityTraits) -> Winner {
    let first_claims = first.explicit || (first.near_vertical && !second.explicit);
    let second_claims = second.explicit || (second.near_vertical && !first.explicit);

    match (first_claims, second_claims) {
        (true, false) => Winner::First,
        (false, true) => Winner::Second,
        (true, true) | (false, false) => Winner::First,
    }
}

/// How one end of a resolved piece is supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Joint {
    Frame,
    /// Butts against raw segment `segment` (index into the raw list)
    Crossing { segment: usize },
    Free,
}

/// One piece after splitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSegment {
    pub line: Line,
    /// Index of the raw segment this piece came from
    pub source: usize,
    pub start_joint: Joint,
    pub end_joint: Joint,
    pub continuous: bool,
    pub angle_deg: f64,
    pub description: String,
}

impl ResolvedSegment {
    pub fn length(&self) -> f64 {
        self.line.length()
    }
}

/// Where to mount one resolved piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountMark {
    /// 1-based piece number
    pub item_index: usize,
    pub description: String,
    /// Midpoint measured from the top-left corner of the usable area
    pub midpoint: Point,
    pub angle_deg: f64,
    pub label: String,
}

/// Output of [`compute_angular_cut_list`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularResult {
    pub cut_items: Vec<CutItem>,
    pub mount_marks: Vec<MountMark>,
    pub segments: Vec<ResolvedSegment>,
}

/// Cut points recorded on one raw segment: (point, index of the winner)
type CutPoints = Vec<(Point, usize)>;

/// Resolves crossings between raw segments and splits the losers
pub struct TopologyResolver<'a> {
    rect: Rect,
    params: &'a AngularParams,
}

impl<'a> TopologyResolver<'a> {
    pub fn new(rect: Rect, params: &'a AngularParams) -> Self {
        Self { rect, params }
    }

    /// Pairwise intersection pass: cut points per raw segment
    pub fn find_cut_points(&self, raw: &[RawSegment]) -> Vec<CutPoints> {
        let mut cuts: Vec<CutPoints> = vec![Vec::new(); raw.len()];

        for i in 0..raw.len() {
            for j in (i + 1)..raw.len() {
                let (a, b) = (&raw[i], &raw[j]);
                let Some(p) = segment_intersection(a.line.p1, a.line.p2, b.line.p1, b.line.p2)
                else {
                    continue;
                };
                let winner = resolve_continuity(
                    ContinuityTraits::new(a.continuous, a.angle_deg),
                    ContinuityTraits::new(b.continuous, b.angle_deg),
                );
                match winner {
                    Winner::First => cuts[j].push((p, i)),
                    Winner::Second => cuts[i].push((p, j)),
                }
            }
        }

        cuts
    }

    /// Split every raw segment at its cut points
    pub fn resolve(&self, raw: &[RawSegment]) -> Vec<ResolvedSegment> {
        let cuts = self.find_cut_points(raw);
        let gap = self.params.face_width / 2.0 + self.params.joint_clearance;
        let mut out = Vec::new();

        for (index, (seg, mut seg_cuts)) in raw.iter().zip(cuts).enumerate() {
            let start_joint = self.end_joint(seg.line.p1);
            let end_joint = self.end_joint(seg.line.p2);

            if seg_cuts.is_empty() {
                out.push(ResolvedSegment {
                    line: seg.line,
                    source: index,
                    start_joint,
                    end_joint,
                    continuous: seg.continuous,
                    angle_deg: seg.angle_deg,
                    description: seg.description.clone(),
                });
                continue;
            }

            let origin = seg.line.p1;
            seg_cuts.sort_by(|a, b| origin.distance_to(&a.0).total_cmp(&origin.distance_to(&b.0)));

            let dir = seg.line.vector().normalized();
            let mut stops: Vec<(Point, Joint)> = Vec::with_capacity(seg_cuts.len() + 2);
            stops.push((seg.line.p1, start_joint));
            stops.extend(
                seg_cuts
                    .iter()
                    .map(|&(p, other)| (p, Joint::Crossing { segment: other })),
            );
            stops.push((seg.line.p2, end_joint));

            let last = stops.len() - 2;
            for (k, pair) in stops.windows(2).enumerate() {
                let (mut start, s_joint) = pair[0];
                let (mut end, e_joint) = pair[1];
                if k > 0 {
                    start = start + dir * gap;
                }
                if k < last {
                    end = end - dir * gap;
                }
                if (end - start).dot(&dir) <= self.params.boundary_epsilon {
                    debug!("{} part {} closed up by joint gaps, dropped", seg.description, k + 1);
                    continue;
                }
                out.push(ResolvedSegment {
                    line: Line::new(start, end),
                    source: index,
                    start_joint: s_joint,
                    end_joint: e_joint,
                    continuous: seg.continuous,
                    angle_deg: seg.angle_deg,
                    description: format!("{} part {}", seg.description, k + 1),
                });
            }
        }

        out
    }

    fn end_joint(&self, p: Point) -> Joint {
        if self.rect.edge_at(p, self.params.boundary_epsilon).is_some() {
            Joint::Frame
        } else {
            Joint::Free
        }
    }

    /// Miter angle at one end of a resolved piece
    fn joint_angle(&self, piece: &ResolvedSegment, joint: Joint, at: Point, raw: &[RawSegment]) -> f64 {
        match joint {
            Joint::Frame => self
                .rect
                .edge_at(at, self.params.boundary_epsilon)
                .map(|edge| angle_between(&piece.line, &edge))
                .unwrap_or(90.0),
            Joint::Crossing { segment } => angle_between(&piece.line, &raw[segment].line),
            Joint::Free => 90.0,
        }
    }

    /// Production length of a resolved piece
    fn cut_length(&self, piece: &ResolvedSegment) -> f64 {
        let frame_ends = [piece.start_joint, piece.end_joint]
            .iter()
            .filter(|j| **j == Joint::Frame)
            .count() as f64;
        (piece.length() - frame_ends * self.params.frame_clearance + self.params.saw_correction)
            .max(0.0)
    }
}

/// Cut list and mounting marks for an angular layout inside `rect`.
///
/// Fails on an empty rectangle or invalid pattern parameters. Patterns that
/// fall entirely outside `rect` contribute nothing.
pub fn compute_angular_cut_list(
    patterns: &[Pattern],
    rect: Rect,
    params: &AngularParams,
) -> CamToolResult<AngularResult> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(rect.width()) || !valid(rect.height()) {
        return Err(InputError::InvalidOpening {
            width: rect.width(),
            height: rect.height(),
        }
        .into());
    }
    params.validate()?;
    for (i, p) in patterns.iter().enumerate() {
        p.validate(i)?;
    }

    let mut raw = Vec::new();
    for (i, p) in patterns.iter().enumerate() {
        raw.extend(p.generate(i, &rect)?);
    }

    let resolver = TopologyResolver::new(rect, params);
    let segments = resolver.resolve(&raw);

    let mut aggregator = CutListAggregator::new();
    let mut mount_marks = Vec::with_capacity(segments.len());

    for (i, piece) in segments.iter().enumerate() {
        let start_angle = resolver.joint_angle(piece, piece.start_joint, piece.line.p1, &raw);
        let end_angle = resolver.joint_angle(piece, piece.end_joint, piece.line.p2, &raw);
        aggregator.add(resolver.cut_length(piece), start_angle, end_angle);

        let mid = piece.line.p1.midpoint(&piece.line.p2);
        let rel = Point::new(mid.x - rect.min_x, mid.y - rect.min_y);
        mount_marks.push(MountMark {
            item_index: i + 1,
            description: piece.description.clone(),
            midpoint: rel,
            angle_deg: piece.angle_deg,
            label: format!("X={:.1}, Y={:.1}", rel.x, rel.y),
        });
    }

    let cut_items = aggregator.finish();
    debug!(
        "angular layout: {} patterns -> {} raw segments -> {} pieces, {} cut items",
        patterns.len(),
        raw.len(),
        segments.len(),
        cut_items.len()
    );

    Ok(AngularResult {
        cut_items,
        mount_marks,
        segments,
    })
}
