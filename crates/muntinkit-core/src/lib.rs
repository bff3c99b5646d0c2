//! # MuntinKit Core
//!
//! Geometry kernel, bar model and the unified error type shared by every
//! MuntinKit crate. All coordinates are millimetres with a top-left origin.

pub mod error;
pub mod geometry;
pub mod model;

pub use error::{Error, InputError, Result};

pub use geometry::{
    angle_between, clip_line, clip_ray, clip_segment, distance, line_intersection,
    offset_vector, round_tenth, segment_intersection, Line, Point, Rect,
};

pub use model::{validate_bars, Bar, Opening, DEFAULT_FACE_WIDTH};
