//! Pattern definitions for angular layouts and their expansion into raw
//! segments clipped to the usable rectangle.

use crate::error::{CamToolError, ParameterError, ParameterResult};
use muntinkit_core::geometry::{clip_line, clip_ray, clip_segment};
use muntinkit_core::{InputError, Line, Point, Rect};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of spider arms
pub const MAX_ARM_COUNT: usize = 360;

/// An infinite straight line at `angle_deg` through the usable area.
///
/// Steep lines (|tan| > 1) are anchored `offset_mm` along the top edge,
/// shallow ones `offset_mm` down the left edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagonalLine {
    pub angle_deg: f64,
    pub offset_mm: f64,
    #[serde(default)]
    pub continuous: bool,
}

/// Radial arms from a centre plus concentric rings of chords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiderPattern {
    /// Defaults to the centre of the usable area
    #[serde(default)]
    pub center: Option<Point>,
    pub arm_count: usize,
    #[serde(default)]
    pub start_angle_deg: f64,
    #[serde(default)]
    pub ring_count: usize,
    #[serde(default)]
    pub ring_spacing_mm: f64,
}

/// Polyline chord approximation of a circular arch.
///
/// The radius is `radius_mm` when given, otherwise derived from
/// `chord_mm` and `sagitta_mm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchPattern {
    #[serde(default)]
    pub radius_mm: Option<f64>,
    #[serde(default)]
    pub chord_mm: Option<f64>,
    #[serde(default)]
    pub sagitta_mm: Option<f64>,
    #[serde(default = "default_arc_start")]
    pub arc_start_deg: f64,
    #[serde(default = "default_arc_end")]
    pub arc_end_deg: f64,
    #[serde(default = "default_divisions")]
    pub division_count: usize,
    /// Defaults to `(centre_x, min_y + radius)`, an arch touching the top edge
    #[serde(default)]
    pub center: Option<Point>,
}

fn default_arc_start() -> f64 {
    225.0
}

fn default_arc_end() -> f64 {
    315.0
}

fn default_divisions() -> usize {
    20
}

impl ArchPattern {
    /// Arch of the given radius with default sweep and divisions
    pub fn with_radius(radius_mm: f64) -> Self {
        Self {
            radius_mm: Some(radius_mm),
            chord_mm: None,
            sagitta_mm: None,
            arc_start_deg: default_arc_start(),
            arc_end_deg: default_arc_end(),
            division_count: default_divisions(),
            center: None,
        }
    }

    /// Radius from `radius_mm`, or `(c²/4 + s²) / 2s` from chord and sagitta
    pub fn radius(&self) -> ParameterResult<f64> {
        if let Some(r) = self.radius_mm {
            if !r.is_finite() || r <= 0.0 {
                return Err(ParameterError::invalid("radius_mm", format!("must be > 0, got {r}")));
            }
            return Ok(r);
        }
        match (self.chord_mm, self.sagitta_mm) {
            (Some(c), Some(s)) => {
                if !c.is_finite() || c <= 0.0 {
                    return Err(ParameterError::invalid("chord_mm", format!("must be > 0, got {c}")));
                }
                if !s.is_finite() || s <= 0.0 {
                    return Err(ParameterError::invalid("sagitta_mm", format!("must be > 0, got {s}")));
                }
                Ok((c * c / 4.0 + s * s) / (2.0 * s))
            }
            _ => Err(ParameterError::invalid(
                "radius_mm",
                "either radius_mm or chord_mm with sagitta_mm is required",
            )),
        }
    }
}

/// An arbitrary straight bar, clipped to the usable area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeformBar {
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub continuous: bool,
}

/// One angular layout element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    Diagonal(DiagonalLine),
    Spider(SpiderPattern),
    Arch(ArchPattern),
    Freeform(FreeformBar),
}

/// A clipped segment before intersection resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    pub line: Line,
    /// Marked continuous by its pattern
    pub continuous: bool,
    /// Direction used for the near-vertical rule, degrees
    pub angle_deg: f64,
    pub description: String,
}

impl Pattern {
    /// Check the pattern's parameters before generation
    pub fn validate(&self, index: usize) -> Result<(), CamToolError> {
        match self {
            Pattern::Diagonal(d) => {
                if !d.angle_deg.is_finite() || !d.offset_mm.is_finite() {
                    return Err(ParameterError::invalid(
                        "diagonal",
                        "angle and offset must be finite",
                    )
                    .into());
                }
            }
            Pattern::Spider(s) => {
                if s.arm_count == 0 || s.arm_count > MAX_ARM_COUNT {
                    return Err(ParameterError::out_of_range(
                        "arm_count",
                        s.arm_count as f64,
                        1.0,
                        MAX_ARM_COUNT as f64,
                    )
                    .into());
                }
                if s.ring_count > 0 && !(s.ring_spacing_mm.is_finite() && s.ring_spacing_mm > 0.0) {
                    return Err(ParameterError::invalid(
                        "ring_spacing_mm",
                        format!("must be > 0 when rings are requested, got {}", s.ring_spacing_mm),
                    )
                    .into());
                }
            }
            Pattern::Arch(a) => {
                a.radius()?;
                if a.division_count == 0 {
                    return Err(ParameterError::out_of_range("division_count", 0.0, 1.0, f64::INFINITY).into());
                }
            }
            Pattern::Freeform(f) => {
                if f.start.distance_to(&f.end) < muntinkit_core::geometry::DEGENERATE_EPSILON {
                    return Err(InputError::ZeroLengthBar { id: index + 1 }.into());
                }
            }
        }
        Ok(())
    }

    /// Expand into raw segments clipped to `rect`.
    ///
    /// Anything clipped away entirely is dropped, never an error.
    pub fn generate(&self, index: usize, rect: &Rect) -> Result<Vec<RawSegment>, CamToolError> {
        let n = index + 1;
        let mut out = Vec::new();

        match self {
            Pattern::Diagonal(d) => {
                let rad = d.angle_deg.to_radians();
                let dir = Point::new(rad.cos(), rad.sin());
                let anchor = if rad.tan().abs() > 1.0 {
                    Point::new(rect.min_x + d.offset_mm, rect.min_y)
                } else {
                    Point::new(rect.min_x, rect.min_y + d.offset_mm)
                };
                push_clipped(
                    &mut out,
                    clip_line(anchor, dir, rect),
                    d.continuous,
                    d.angle_deg,
                    format!("Diagonal {n}"),
                );
            }
            Pattern::Spider(s) => {
                let center = s.center.unwrap_or_else(|| rect.center());
                let step = 360.0 / s.arm_count as f64;
                let arm_angle = |i: usize| s.start_angle_deg + i as f64 * step;

                for i in 0..s.arm_count {
                    let rad = arm_angle(i).to_radians();
                    push_clipped(
                        &mut out,
                        clip_ray(center, Point::new(rad.cos(), rad.sin()), rect),
                        false,
                        arm_angle(i),
                        format!("Spider {n} arm {}", i + 1),
                    );
                }

                for r in 1..=s.ring_count {
                    let radius = r as f64 * s.ring_spacing_mm;
                    let on_ring = |angle: f64| {
                        let rad = angle.to_radians();
                        Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
                    };
                    for i in 0..s.arm_count {
                        let p1 = on_ring(arm_angle(i));
                        let p2 = on_ring(arm_angle((i + 1) % s.arm_count));
                        push_clipped(
                            &mut out,
                            clip_segment(p1, p2, rect),
                            false,
                            Line::new(p1, p2).direction_degrees(),
                            format!("Spider {n} ring {r}"),
                        );
                    }
                }
            }
            Pattern::Arch(a) => {
                let radius = a.radius()?;
                let center = a
                    .center
                    .unwrap_or_else(|| Point::new(rect.center().x, rect.min_y + radius));
                let step = (a.arc_end_deg - a.arc_start_deg) / a.division_count as f64;
                let on_arc = |angle: f64| {
                    let rad = angle.to_radians();
                    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
                };

                for i in 0..a.division_count {
                    let p1 = on_arc(a.arc_start_deg + i as f64 * step);
                    let p2 = on_arc(a.arc_start_deg + (i + 1) as f64 * step);
                    push_clipped(
                        &mut out,
                        clip_segment(p1, p2, rect),
                        false,
                        Line::new(p1, p2).direction_degrees(),
                        format!("Arch {n} chord {}", i + 1),
                    );
                }
            }
            Pattern::Freeform(f) => {
                push_clipped(
                    &mut out,
                    clip_segment(f.start, f.end, rect),
                    f.continuous,
                    Line::new(f.start, f.end).direction_degrees(),
                    format!("Bar {n}"),
                );
            }
        }

        Ok(out)
    }
}

fn push_clipped(
    out: &mut Vec<RawSegment>,
    clipped: Option<Line>,
    continuous: bool,
    angle_deg: f64,
    description: String,
) {
    match clipped {
        Some(line) => out.push(RawSegment {
            line,
            continuous,
            angle_deg,
            description,
        }),
        None => debug!("{description} lies outside the usable area, skipped"),
    }
}
