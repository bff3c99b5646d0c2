//! Job files and the full production pipeline
//!
//! A job names the glass opening and where its bars come from: an explicit
//! list of straight bars, a generated layout, or angular patterns. Running a
//! job produces the cut list, the stock packing and the assembly order.

use crate::report::{JobReport, LayoutSource};
use chrono::Utc;
use muntinkit_camtools::{
    compute_angular_cut_list, compute_cut_list, pack_stock, sequence_assembly, CamToolError,
    Pattern,
};
use muntinkit_core::{Bar, InputError, Opening};
use muntinkit_designer::Layout;
use muntinkit_settings::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while loading or running a job
#[derive(Error, Debug)]
pub enum JobError {
    /// A job may name only one source of bars
    #[error("Job '{name}' mixes {first} and {second}; use exactly one bar source")]
    ConflictingSources {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    CamTools(#[from] CamToolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type JobResult<T> = Result<T, JobError>;

/// A production job as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub name: String,
    pub opening: Opening,
    /// Explicit straight bars
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bars: Vec<Bar>,
    /// Generated straight layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    /// Angular layout elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<Pattern>,
    /// Assembly preset hint, e.g. `"diamond"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Overrides the configured sash count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sash_count: Option<usize>,
}

impl Job {
    pub fn new(name: impl Into<String>, opening: Opening) -> Self {
        Self {
            name: name.into(),
            opening,
            bars: Vec::new(),
            layout: None,
            patterns: Vec::new(),
            preset: None,
            sash_count: None,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn load(path: &Path) -> JobResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let job: Job = serde_json::from_str(&content)?;
        debug!("loaded job '{}' from {}", job.name, path.display());
        Ok(job)
    }

    pub fn save(&self, path: &Path) -> JobResult<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn source(&self) -> JobResult<LayoutSource> {
        let mut sources = Vec::new();
        if !self.bars.is_empty() {
            sources.push("bars");
        }
        if self.layout.is_some() {
            sources.push("layout");
        }
        if !self.patterns.is_empty() {
            sources.push("patterns");
        }
        if let [first, second, ..] = sources.as_slice() {
            return Err(JobError::ConflictingSources {
                name: self.name.clone(),
                first: *first,
                second: *second,
            });
        }

        Ok(match (&self.layout, self.patterns.is_empty()) {
            (Some(layout), _) => LayoutSource::Generated(layout.name().to_string()),
            (None, false) => LayoutSource::Angular,
            (None, true) => LayoutSource::Bars,
        })
    }
}

/// Run the whole pipeline: cut list, stock packing, assembly order.
pub fn run_job(job: &Job, config: &Config) -> JobResult<JobReport> {
    let source = job.source()?;
    let Opening { width, height } = job.opening;
    info!("running job '{}' ({}) on {width} x {height} mm", job.name, source);

    let mut mount_marks = Vec::new();
    let (bars, cut_list, preset) = if let Some(layout) = &job.layout {
        let bars = layout.generate(width, height, config.cutting.face_width_mm)?;
        let cut_list = compute_cut_list(&bars, width, height, &config.cut_list_params())?;
        let preset = job
            .preset
            .clone()
            .or_else(|| layout.assembly_preset().map(str::to_string));
        (bars, cut_list, preset)
    } else if !job.patterns.is_empty() {
        let result =
            compute_angular_cut_list(&job.patterns, job.opening.rect(), &config.angular_params())?;
        // Resolved pieces become bars so they can be sequenced like any other
        let bars: Vec<Bar> = result
            .segments
            .iter()
            .enumerate()
            .map(|(i, seg)| Bar::new(i + 1, seg.line.p1, seg.line.p2, config.cutting.face_width_mm))
            .collect();
        mount_marks = result.mount_marks;
        (bars, result.cut_items, job.preset.clone())
    } else {
        let cut_list = compute_cut_list(&job.bars, width, height, &config.cut_list_params())?;
        (job.bars.clone(), cut_list, job.preset.clone())
    };

    let mut packing_params = config.packing_params();
    if let Some(sash_count) = job.sash_count {
        packing_params.repetition = sash_count;
    }
    let packing = pack_stock(&cut_list, &packing_params)?;
    let assembly = sequence_assembly(&bars, width, height, preset.as_deref())?;

    let warnings = packing.warnings();
    for warning in &warnings {
        warn!("{warning}");
    }

    info!(
        "job '{}': {} cut items, {} stock bars, {:.2}% waste",
        job.name,
        cut_list.len(),
        packing.bars_used,
        packing.waste_percentage
    );

    Ok(JobReport {
        name: job.name.clone(),
        generated_at: Utc::now(),
        version: crate::VERSION.to_string(),
        opening: job.opening,
        source,
        bars,
        cut_list,
        mount_marks,
        packing,
        assembly,
        warnings,
    })
}
