//! # MuntinKit Designer
//!
//! Layout generators for the common glazing-bar patterns and glass opening
//! dimensioning. Generated bars feed straight into the cutting tools.

pub mod glass;
pub mod layout;

pub use glass::GlassDimensions;
pub use layout::{
    cross, diamond, gothic, grid, grid_horizontal_master, sunburst, trapezoid, web, Layout,
    LayoutResult,
};
