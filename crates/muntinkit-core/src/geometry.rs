//! # Geometry Kernel
//!
//! Line and segment primitives shared by every calculation stage:
//! distance, infinite-line and bounded-segment intersection, perpendicular
//! offsets, acute angle between two directed lines and parametric clipping
//! against an axis-aligned rectangle.
//!
//! Coordinates are millimetres with a top-left origin (Y grows downwards),
//! matching the way glass openings are measured on the shop floor.
//!
//! Degenerate inputs never panic or error: parallel lines yield `None`,
//! zero-length offsets yield the zero vector.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Determinant / length threshold below which geometry is treated as degenerate
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// A 2-D coordinate in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 2-D cross product
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction, or zero for a zero-length vector
    pub fn normalized(&self) -> Point {
        let len = self.length();
        if len < DEGENERATE_EPSILON {
            Point::ZERO
        } else {
            Point::new(self.x / len, self.y / len)
        }
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// An infinite reference line through two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Direction vector `p2 - p1`
    pub fn vector(&self) -> Point {
        self.p2 - self.p1
    }

    pub fn length(&self) -> f64 {
        distance(self.p1, self.p2)
    }

    /// Direction angle in degrees, `atan2` convention (-180, 180]
    pub fn direction_degrees(&self) -> f64 {
        let v = self.vector();
        v.y.atan2(v.x).to_degrees()
    }

    /// Line through `point`, perpendicular to this one
    pub fn perpendicular_through(&self, point: Point) -> Line {
        let v = self.vector();
        Line::new(
            Point::new(point.x - v.y, point.y + v.x),
            Point::new(point.x + v.y, point.y - v.x),
        )
    }

    pub fn intersection(&self, other: &Line) -> Option<Point> {
        line_intersection(self.p1, self.p2, other.p1, other.p2)
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Intersection of the infinite lines through (p1, p2) and (p3, p4).
///
/// Returns `None` when the determinant is below [`DEGENERATE_EPSILON`]
/// (parallel or degenerate lines).
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if det.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / det;
    Some(Point::new(
        p1.x + t * (p2.x - p1.x),
        p1.y + t * (p2.y - p1.y),
    ))
}

/// Intersection of the bounded segments (p1, p2) and (p3, p4).
///
/// A hit is reported only when both parameters lie in `[0, 1]`.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if det.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / det;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / det;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(
            p1.x + t * (p2.x - p1.x),
            p1.y + t * (p2.y - p1.y),
        ))
    } else {
        None
    }
}

/// Unit perpendicular `(-dy, dx)` of p1→p2 scaled by `offset`.
///
/// Returns the zero vector for a segment shorter than [`DEGENERATE_EPSILON`].
pub fn offset_vector(p1: Point, p2: Point, offset: f64) -> Point {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let len = dx.hypot(dy);
    if len < DEGENERATE_EPSILON {
        return Point::ZERO;
    }
    Point::new((-dy / len) * offset, (dx / len) * offset)
}

/// Acute angle in degrees `[0, 90]` between two directed lines.
///
/// 100° and 80° produce the same value, matching the symmetry of a miter.
pub fn angle_between(axis1: &Line, axis2: &Line) -> f64 {
    let v1 = axis1.vector();
    let v2 = axis2.vector();
    let a1 = v1.y.atan2(v1.x);
    let a2 = v2.y.atan2(v2.x);

    let mut diff = (a1 - a2).abs().to_degrees();
    if diff > 180.0 {
        diff = 360.0 - diff;
    }
    if diff > 90.0 {
        diff = 180.0 - diff;
    }
    diff
}

/// Normalise an angle in degrees into `[0, 360)`
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Round to one decimal place (0.1 mm / 0.1°), the shop-floor display precision
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Axis-aligned rectangle, typically the usable glass area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Edges in resolution order: top, bottom, left, right
    pub fn edges(&self) -> [Line; 4] {
        [
            Line::new(
                Point::new(self.min_x, self.min_y),
                Point::new(self.max_x, self.min_y),
            ),
            Line::new(
                Point::new(self.min_x, self.max_y),
                Point::new(self.max_x, self.max_y),
            ),
            Line::new(
                Point::new(self.min_x, self.min_y),
                Point::new(self.min_x, self.max_y),
            ),
            Line::new(
                Point::new(self.max_x, self.min_y),
                Point::new(self.max_x, self.max_y),
            ),
        ]
    }

    /// First edge (top, bottom, left, right) lying within `epsilon` of `p`
    pub fn edge_at(&self, p: Point, epsilon: f64) -> Option<Line> {
        let [top, bottom, left, right] = self.edges();
        if (p.y - self.min_y).abs() < epsilon {
            Some(top)
        } else if (p.y - self.max_y).abs() < epsilon {
            Some(bottom)
        } else if (p.x - self.min_x).abs() < epsilon {
            Some(left)
        } else if (p.x - self.max_x).abs() < epsilon {
            Some(right)
        } else {
            None
        }
    }
}

/// Slab clip of `start + t * dir` for `t` in `[t_min, t_max]` against `rect`.
///
/// Returns `None` when the clipped interval is empty, inverted or shorter
/// than [`DEGENERATE_EPSILON`].
pub fn clip_parametric(
    start: Point,
    dir: Point,
    t_min: f64,
    t_max: f64,
    rect: &Rect,
) -> Option<Line> {
    let dir_len = dir.length();
    if dir_len < DEGENERATE_EPSILON {
        return None;
    }

    let mut t0 = t_min;
    let mut t1 = t_max;

    for (s, d, lo, hi) in [
        (start.x, dir.x, rect.min_x, rect.max_x),
        (start.y, dir.y, rect.min_y, rect.max_y),
    ] {
        if d.abs() < DEGENERATE_EPSILON {
            if s < lo || s > hi {
                return None;
            }
        } else {
            let ta = (lo - s) / d;
            let tb = (hi - s) / d;
            t0 = t0.max(ta.min(tb));
            t1 = t1.min(ta.max(tb));
        }
    }

    if t1 < t0 || (t1 - t0) * dir_len < DEGENERATE_EPSILON {
        return None;
    }

    Some(Line::new(start + dir * t0, start + dir * t1))
}

/// Clip the infinite line through `start` with direction `dir`
pub fn clip_line(start: Point, dir: Point, rect: &Rect) -> Option<Line> {
    clip_parametric(start, dir, f64::NEG_INFINITY, f64::INFINITY, rect)
}

/// Clip the ray leaving `start` in direction `dir`
pub fn clip_ray(start: Point, dir: Point, rect: &Rect) -> Option<Line> {
    clip_parametric(start, dir, 0.0, f64::INFINITY, rect)
}

/// Clip the bounded segment p1→p2
pub fn clip_segment(p1: Point, p2: Point, rect: &Rect) -> Option<Line> {
    clip_parametric(p1, p2 - p1, 0.0, 1.0, rect)
}
