//! # MuntinKit Cutting Tools
//!
//! Turns glazing-bar layouts into production data for the saw and the
//! assembly bench.
//!
//! ## Pipeline
//!
//! - **Boundary Resolver**: frame edge, crossing bar or free end at each bar end
//! - **Segment Calculator**: trimmed length and miter angles with angle correction
//! - **Cut List**: quantised grouping into counted cut items
//! - **Topology Resolver**: crossings and splitting for angular/freeform layouts
//! - **Stock Optimizer**: best-fit-decreasing packing onto stock bars with kerf
//! - **Assembly**: glue-up order and position labels
//!
//! ## Entry Operations
//!
//! [`compute_cut_list`], [`compute_angular_cut_list`], [`pack_stock`] and
//! [`sequence_assembly`]. Each is a pure function of its inputs.

pub mod assembly;
pub mod boundary;
pub mod cut_list;
pub mod error;
pub mod optimizer;
pub mod segment;
pub mod topology;

// Re-export commonly used items
pub use assembly::{sequence_assembly, AssemblyPreset, AssemblyStep};
pub use boundary::{BarEnd, Boundary, BoundaryKind, BoundaryResolver};
pub use cut_list::{
    aggregate_cuts, compute_cut_list, compute_cut_results, CutItem, CutListAggregator,
    CutListParams,
};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use optimizer::{pack_stock, Cut, OptimizationResult, PackingParams, StockBar};
pub use segment::{calculate_segment, CutResult};
pub use topology::{
    compute_angular_cut_list, resolve_continuity, AngularParams, AngularResult, ArchPattern,
    DiagonalLine, FreeformBar, Joint, MountMark, Pattern, ResolvedSegment, SpiderPattern,
    TopologyResolver,
};
