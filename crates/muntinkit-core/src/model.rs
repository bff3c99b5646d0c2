//! Bar and opening model
//!
//! A [`Bar`] is a glazing bar represented by its centreline. An [`Opening`]
//! is the usable glass rectangle the bars are laid inside.

use crate::error::InputError;
use crate::geometry::{Line, Point, Rect};
use serde::{Deserialize, Serialize};

/// Default visible profile width in mm
pub const DEFAULT_FACE_WIDTH: f64 = 26.0;

/// Axis tolerance used to classify a bar as vertical or horizontal
pub const AXIS_TOLERANCE: f64 = 0.1;

/// A structural glazing bar, modelled as its centreline axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub id: usize,
    pub start: Point,
    pub end: Point,
    /// Visible profile width used for miter and gap math
    #[serde(default = "default_face_width")]
    pub face_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_angle_hint: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_angle_hint: Option<f64>,
}

fn default_face_width() -> f64 {
    DEFAULT_FACE_WIDTH
}

impl Bar {
    pub fn new(id: usize, start: Point, end: Point, face_width: f64) -> Self {
        Self {
            id,
            start,
            end,
            face_width,
            start_angle_hint: None,
            end_angle_hint: None,
        }
    }

    pub fn axis(&self) -> Line {
        Line::new(self.start, self.end)
    }

    /// Geometric (untrimmed) axis length
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    pub fn is_vertical(&self) -> bool {
        (self.start.x - self.end.x).abs() < AXIS_TOLERANCE
    }

    pub fn is_horizontal(&self) -> bool {
        (self.start.y - self.end.y).abs() < AXIS_TOLERANCE
    }

    /// Reject bars whose axis has no length or whose coordinates are not finite
    pub fn validate(&self) -> Result<(), InputError> {
        let coords = [self.start.x, self.start.y, self.end.x, self.end.y];
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(InputError::parameter(
                format!("bar {}", self.id),
                "coordinates must be finite",
            ));
        }
        if self.length() < crate::geometry::DEGENERATE_EPSILON {
            return Err(InputError::ZeroLengthBar { id: self.id });
        }
        if !self.face_width.is_finite() || self.face_width < 0.0 {
            return Err(InputError::parameter(
                format!("bar {} face width", self.id),
                format!("must be >= 0, got {}", self.face_width),
            ));
        }
        Ok(())
    }
}

/// The usable glass opening, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub width: f64,
    pub height: f64,
}

impl Opening {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions must be finite and strictly positive
    pub fn validate(&self) -> Result<(), InputError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(InputError::InvalidOpening {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// Validate every bar in input order, failing on the first bad one
pub fn validate_bars(bars: &[Bar]) -> Result<(), InputError> {
    bars.iter().try_for_each(Bar::validate)
}
