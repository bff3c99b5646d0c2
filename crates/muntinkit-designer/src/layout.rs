//! # Layout Generators
//!
//! Produces ready-to-cut [`Bar`] lists for the standard glazing layouts.
//!
//! Supports:
//! - Rectangular grids with vertical or horizontal masters
//! - Saint Andrew's cross and edge-midpoint diamond
//! - Sunburst (rays from the bottom centre) and web (rays from the centre)
//! - Gothic pointed arch and converging trapezoid verticals
//!
//! All coordinates are top-origin millimetres inside the glass opening. Bar
//! ids are assigned sequentially from 1 in generation order.

use muntinkit_core::error::ensure_finite;
use muntinkit_core::{clip_ray, Bar, InputError, Opening, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a layout generator
pub type LayoutResult = Result<Vec<Bar>, InputError>;

/// Default number of sunburst rays
pub const DEFAULT_SUNBURST_RAYS: usize = 3;
/// Default number of web rays
pub const DEFAULT_WEB_RAYS: usize = 8;
/// Default number of trapezoid verticals
pub const DEFAULT_TRAPEZOID_VERTICALS: usize = 3;
/// Default top width of a trapezoid relative to the bottom
pub const DEFAULT_TRAPEZOID_TOP_SCALE: f64 = 0.6;

/// A named layout with its parameters, as stored in job files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Layout {
    Grid {
        rows: usize,
        cols: usize,
        #[serde(default)]
        horizontal_master: bool,
    },
    Cross,
    Diamond,
    Sunburst {
        #[serde(default = "default_sunburst_rays")]
        rays: usize,
    },
    Web {
        #[serde(default = "default_web_rays")]
        rays: usize,
    },
    Gothic,
    Trapezoid {
        #[serde(default = "default_trapezoid_verticals")]
        verticals: usize,
        #[serde(default = "default_trapezoid_top_scale")]
        top_scale: f64,
    },
}

fn default_sunburst_rays() -> usize {
    DEFAULT_SUNBURST_RAYS
}

fn default_web_rays() -> usize {
    DEFAULT_WEB_RAYS
}

fn default_trapezoid_verticals() -> usize {
    DEFAULT_TRAPEZOID_VERTICALS
}

fn default_trapezoid_top_scale() -> f64 {
    DEFAULT_TRAPEZOID_TOP_SCALE
}

impl Layout {
    /// Generate the bars of this layout for a `width` x `height` opening
    pub fn generate(&self, width: f64, height: f64, face_width: f64) -> LayoutResult {
        match *self {
            Layout::Grid {
                rows,
                cols,
                horizontal_master: false,
            } => grid(width, height, rows, cols, face_width),
            Layout::Grid {
                rows,
                cols,
                horizontal_master: true,
            } => grid_horizontal_master(width, height, rows, cols, face_width),
            Layout::Cross => cross(width, height, face_width),
            Layout::Diamond => diamond(width, height, face_width),
            Layout::Sunburst { rays } => sunburst(width, height, face_width, rays),
            Layout::Web { rays } => web(width, height, face_width, rays),
            Layout::Gothic => gothic(width, height, face_width),
            Layout::Trapezoid {
                verticals,
                top_scale,
            } => trapezoid(width, height, face_width, verticals, top_scale),
        }
    }

    /// Assembly preset hint matching this layout, if it has a fixed order
    pub fn assembly_preset(&self) -> Option<&'static str> {
        match self {
            Layout::Diamond => Some("diamond"),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Grid { .. } => "grid",
            Layout::Cross => "cross",
            Layout::Diamond => "diamond",
            Layout::Sunburst { .. } => "sunburst",
            Layout::Web { .. } => "web",
            Layout::Gothic => "gothic",
            Layout::Trapezoid { .. } => "trapezoid",
        }
    }
}

/// Collects bars and hands out sequential ids
struct BarList {
    face_width: f64,
    bars: Vec<Bar>,
}

impl BarList {
    fn new(width: f64, height: f64, face_width: f64) -> Result<Self, InputError> {
        Opening::new(width, height).validate()?;
        ensure_finite("face_width", face_width)?;
        if face_width <= 0.0 {
            return Err(InputError::parameter(
                "face_width",
                format!("must be > 0, got {face_width}"),
            ));
        }
        Ok(Self {
            face_width,
            bars: Vec::new(),
        })
    }

    fn push(&mut self, start: Point, end: Point) -> &mut Bar {
        let id = self.bars.len() + 1;
        self.bars.push(Bar::new(id, start, end, self.face_width));
        let last = self.bars.len() - 1;
        &mut self.bars[last]
    }

    fn push_with_angle(&mut self, start: Point, end: Point, angle: f64) {
        let bar = self.push(start, end);
        bar.start_angle_hint = Some(angle);
        bar.end_angle_hint = Some(angle);
    }

    fn finish(self, layout: &str) -> Vec<Bar> {
        debug!("{layout} layout: {} bars", self.bars.len());
        self.bars
    }
}

fn require_count(name: &str, value: usize) -> Result<(), InputError> {
    if value == 0 {
        return Err(InputError::parameter(name, "must be at least 1"));
    }
    Ok(())
}

/// Grid with continuous vertical masters.
///
/// `rows` and `cols` count the glass panes, so a 3 x 3 grid has two bars in
/// each direction. Horizontals are split at every vertical.
pub fn grid(width: f64, height: f64, rows: usize, cols: usize, face_width: f64) -> LayoutResult {
    let mut list = BarList::new(width, height, face_width)?;
    require_count("rows", rows)?;
    require_count("cols", cols)?;

    let step_x = width / cols as f64;
    let step_y = height / rows as f64;
    let verticals: Vec<f64> = (1..cols).map(|i| step_x * i as f64).collect();

    for &x in &verticals {
        list.push_with_angle(Point::new(x, 0.0), Point::new(x, height), 90.0);
    }

    for j in 1..rows {
        let y = step_y * j as f64;
        let mut from = 0.0;
        for &x in verticals.iter().chain(std::iter::once(&width)) {
            list.push_with_angle(Point::new(from, y), Point::new(x, y), 0.0);
            from = x;
        }
    }

    Ok(list.finish("grid"))
}

/// Grid with continuous horizontal masters; verticals are split at every
/// horizontal.
pub fn grid_horizontal_master(
    width: f64,
    height: f64,
    rows: usize,
    cols: usize,
    face_width: f64,
) -> LayoutResult {
    let mut list = BarList::new(width, height, face_width)?;
    require_count("rows", rows)?;
    require_count("cols", cols)?;

    let step_x = width / cols as f64;
    let step_y = height / rows as f64;
    let horizontals: Vec<f64> = (1..rows).map(|j| step_y * j as f64).collect();

    for &y in &horizontals {
        list.push_with_angle(Point::new(0.0, y), Point::new(width, y), 0.0);
    }

    for i in 1..cols {
        let x = step_x * i as f64;
        let mut from = 0.0;
        for &y in horizontals.iter().chain(std::iter::once(&height)) {
            list.push_with_angle(Point::new(x, from), Point::new(x, y), 90.0);
            from = y;
        }
    }

    Ok(list.finish("grid (horizontal master)"))
}

/// Saint Andrew's cross: the top-left to bottom-right diagonal is continuous,
/// the other one is split at the centre.
pub fn cross(width: f64, height: f64, face_width: f64) -> LayoutResult {
    let mut list = BarList::new(width, height, face_width)?;
    let center = Point::new(width / 2.0, height / 2.0);

    list.push(Point::new(0.0, 0.0), Point::new(width, height));
    list.push(Point::new(0.0, height), center);
    list.push(center, Point::new(width, 0.0));

    Ok(list.finish("cross"))
}

/// Diamond joining the four edge midpoints
pub fn diamond(width: f64, height: f64, face_width: f64) -> LayoutResult {
    let mut list = BarList::new(width, height, face_width)?;
    let top = Point::new(width / 2.0, 0.0);
    let right = Point::new(width, height / 2.0);
    let bottom = Point::new(width / 2.0, height);
    let left = Point::new(0.0, height / 2.0);

    list.push(top, right);
    list.push(right, bottom);
    list.push(bottom, left);
    list.push(left, top);

    Ok(list.finish("diamond"))
}

/// Direction of a ray at `angle_deg`, counter-clockwise from +X with Y down
fn ray_direction(angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(rad.cos(), -rad.sin())
}

/// Push the ray from `origin` at `angle_deg`, clipped to the opening
fn push_ray(list: &mut BarList, width: f64, height: f64, origin: Point, angle_deg: f64) {
    let rect = Opening::new(width, height).rect();
    match clip_ray(origin, ray_direction(angle_deg), &rect) {
        Some(line) => list.push_with_angle(line.p1, line.p2, angle_deg),
        None => debug!("ray at {angle_deg:.1}° leaves the opening immediately"),
    }
}

/// Sunburst: `rays` rays fanning upward from the bottom centre, evenly
/// spaced over the half circle and excluding the horizontal.
pub fn sunburst(width: f64, height: f64, face_width: f64, rays: usize) -> LayoutResult {
    let mut list = BarList::new(width, height, face_width)?;
    require_count("rays", rays)?;

    let origin = Point::new(width / 2.0, height);
    let step = 180.0 / (rays + 1) as f64;
    for i in 1..=rays {
        push_ray(&mut list, width, height, origin, step * i as f64);
    }

    Ok(list.finish("sunburst"))
}

/// Web: `rays` rays from the centre, the first pointing right
pub fn web(width: f64, height: f64, face_width: f64, rays: usize) -> LayoutResult {
    let mut list = BarList::new(width, height, face_width)?;
    require_count("rays", rays)?;

    let origin = Point::new(width / 2.0, height / 2.0);
    let step = 360.0 / rays as f64;
    for i in 0..rays {
        push_ray(&mut list, width, height, origin, step * i as f64);
    }

    Ok(list.finish("web"))
}

/// Gothic pointed arch over a spring line at half height.
///
/// Each side of the arch is a polyline of three chords rising from the
/// spring line to the apex at the top centre. A horizontal runs along the
/// spring line and a vertical drops from its centre to the bottom edge.
pub fn gothic(width: f64, height: f64, face_width: f64) -> LayoutResult {
    let mut list = BarList::new(width, height, face_width)?;
    let spring_y = height / 2.0;
    let cx = width / 2.0;

    let left = [
        Point::new(0.0, spring_y),
        Point::new(cx * 0.2, spring_y * 0.6),
        Point::new(cx * 0.6, spring_y * 0.2),
        Point::new(cx, 0.0),
    ];
    let right = left.map(|p| Point::new(width - p.x, p.y));

    for side in [left, right] {
        for pair in side.windows(2) {
            list.push(pair[0], pair[1]);
        }
    }

    list.push(Point::new(0.0, spring_y), Point::new(width, spring_y));
    list.push(Point::new(cx, spring_y), Point::new(cx, height));

    Ok(list.finish("gothic"))
}

/// Converging verticals: evenly spaced along the bottom edge and along a
/// centred top span of `width * top_scale`, plus a mid-height horizontal.
pub fn trapezoid(
    width: f64,
    height: f64,
    face_width: f64,
    verticals: usize,
    top_scale: f64,
) -> LayoutResult {
    let mut list = BarList::new(width, height, face_width)?;
    require_count("verticals", verticals)?;
    if !(top_scale.is_finite() && top_scale > 0.0 && top_scale <= 1.0) {
        return Err(InputError::parameter(
            "top_scale",
            format!("must be in (0, 1], got {top_scale}"),
        ));
    }

    let divisions = (verticals + 1) as f64;
    let bottom_step = width / divisions;
    let top_width = width * top_scale;
    let top_start = (width - top_width) / 2.0;
    let top_step = top_width / divisions;

    for i in 1..=verticals {
        let i = i as f64;
        list.push(
            Point::new(top_start + top_step * i, 0.0),
            Point::new(bottom_step * i, height),
        );
    }
    list.push(
        Point::new(0.0, height / 2.0),
        Point::new(width, height / 2.0),
    );

    Ok(list.finish("trapezoid"))
}
