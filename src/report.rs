//! Job report: everything the saw operator and the bench need

use chrono::{DateTime, Utc};
use muntinkit_camtools::{AssemblyStep, CutItem, MountMark, OptimizationResult};
use muntinkit_core::{Bar, Opening};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Where the bars of a job came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "layout", rename_all = "snake_case")]
pub enum LayoutSource {
    Bars,
    Generated(String),
    Angular,
}

impl fmt::Display for LayoutSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutSource::Bars => write!(f, "explicit bars"),
            LayoutSource::Generated(name) => write!(f, "{name} layout"),
            LayoutSource::Angular => write!(f, "angular patterns"),
        }
    }
}

/// Output of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub opening: Opening,
    pub source: LayoutSource,
    pub bars: Vec<Bar>,
    pub cut_list: Vec<CutItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mount_marks: Vec<MountMark>,
    pub packing: OptimizationResult,
    pub assembly: Vec<AssemblyStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl JobReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text shop sheet
    pub fn summary(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_summary(&mut out);
        out
    }

    fn write_summary(&self, out: &mut String) -> fmt::Result {
        let title = if self.name.is_empty() {
            "Muntin job"
        } else {
            self.name.as_str()
        };
        writeln!(out, "{title}")?;
        writeln!(out, "{:=<60}", "")?;
        writeln!(
            out,
            "Opening: {:.1} x {:.1} mm, {} ({} bars)",
            self.opening.width,
            self.opening.height,
            self.source,
            self.bars.len()
        )?;
        writeln!(
            out,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        writeln!(out, "\nCut list:")?;
        writeln!(out, "  {:>10}  {:>7}  {:>7}  {:>5}", "Length", "Angle 1", "Angle 2", "Qty")?;
        for item in &self.cut_list {
            writeln!(
                out,
                "  {:>10.1}  {:>7.1}  {:>7.1}  {:>5}",
                item.length, item.angle_start, item.angle_end, item.count
            )?;
        }

        if !self.mount_marks.is_empty() {
            writeln!(out, "\nMount marks:")?;
            for mark in &self.mount_marks {
                writeln!(out, "  #{:<3} {:<24} {}", mark.item_index, mark.description, mark.label)?;
            }
        }

        writeln!(
            out,
            "\nStock: {} bar(s), waste {:.1} mm ({:.2}%)",
            self.packing.bars_used, self.packing.total_waste, self.packing.waste_percentage
        )?;
        for bar in &self.packing.bars {
            let cuts: Vec<&str> = bar.cuts.iter().map(|c| c.description.as_str()).collect();
            writeln!(
                out,
                "  Bar {:>2}: {}  | waste {:.1} mm",
                bar.id,
                cuts.join(", "),
                bar.waste
            )?;
        }

        writeln!(out, "\nAssembly order:")?;
        for step in &self.assembly {
            writeln!(
                out,
                "  {:>2}. bar {:<3} {:>8.1} mm  {:<14} {}",
                step.order_index, step.bar_id, step.length, step.description, step.position_label
            )?;
        }

        if !self.warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for warning in &self.warnings {
                writeln!(out, "  ! {warning}")?;
            }
        }
        Ok(())
    }
}
