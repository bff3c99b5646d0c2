//! # MuntinKit
//!
//! Production calculator for window glazing bars (muntins):
//! - Trimmed cut lengths and miter angles for straight and angular layouts
//! - Quantised cut lists grouped into counted line items
//! - Best-fit-decreasing packing onto stock bars with saw kerf
//! - Glue-up order with position labels for the assembly bench
//!
//! ## Architecture
//!
//! MuntinKit is organized as a workspace with multiple crates:
//!
//! 1. **muntinkit-core** - Geometry kernel, bar model, input errors
//! 2. **muntinkit-camtools** - Cut geometry, cut list, packing, assembly
//! 3. **muntinkit-designer** - Layout generators, glass dimensioning
//! 4. **muntinkit-settings** - Production configuration and persistence
//! 5. **muntinkit** - CLI binary and job pipeline that integrates all crates

pub mod job;
pub mod report;

pub use job::{run_job, Job, JobError, JobResult};
pub use report::{JobReport, LayoutSource};

pub use muntinkit_core::{Bar, Error, InputError, Line, Opening, Point, Rect, Result};

pub use muntinkit_camtools::{
    compute_angular_cut_list, compute_cut_list, pack_stock, sequence_assembly, AngularParams,
    AngularResult, AssemblyStep, CamToolError, CutItem, CutListParams, DiagonalLine, MountMark,
    OptimizationResult, PackingParams, Pattern,
};

pub use muntinkit_designer::{GlassDimensions, Layout};

pub use muntinkit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Human-readable output on stderr, keeping stdout free for reports
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging as one JSON object per line on stderr
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}
