//! Assembly sequencing
//!
//! Orders the final bars into a glue-up sequence. The default rule puts the
//! longest bars first; the diamond preset walks the quadrants clockwise from
//! top-right, starting at the centre of the opening.
//!
//! Position labels are measured from the left edge and, because the model is
//! top-origin, from the *bottom* edge via `height - y`.

use crate::error::CamToolResult;
use muntinkit_core::{round_tenth, validate_bars, Bar, Opening};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Named layouts with a fixed assembly order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblyPreset {
    Diamond,
}

impl FromStr for AssemblyPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diamond" | "rhombus" => Ok(AssemblyPreset::Diamond),
            other => Err(format!("unknown assembly preset: {other}")),
        }
    }
}

/// One instruction in the build sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStep {
    /// 1-based, strictly increasing
    pub order_index: usize,
    pub bar_id: usize,
    /// Geometric length rounded to 0.1 mm
    pub length: f64,
    pub description: String,
    pub position_label: String,
}

const QUADRANT_NAMES: [&str; 4] = ["Top-Right", "Bottom-Right", "Bottom-Left", "Top-Left"];

/// Build sequence for `bars` inside the opening.
///
/// `preset_hint` selects a fixed order (`"diamond"`, `"rhombus"`); unknown or
/// missing hints use the longest-first rule.
pub fn sequence_assembly(
    bars: &[Bar],
    opening_width: f64,
    opening_height: f64,
    preset_hint: Option<&str>,
) -> CamToolResult<Vec<AssemblyStep>> {
    let opening = Opening::new(opening_width, opening_height);
    opening.validate()?;
    validate_bars(bars)?;

    let preset = preset_hint.and_then(|hint| match hint.parse::<AssemblyPreset>() {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("{e}, using longest-first order");
            None
        }
    });

    let steps = match preset {
        Some(AssemblyPreset::Diamond) => diamond_sequence(bars, opening),
        None => longest_first_sequence(bars, opening),
    };
    debug!("assembly sequence: {} steps ({:?})", steps.len(), preset);
    Ok(steps)
}

fn longest_first_sequence(bars: &[Bar], opening: Opening) -> Vec<AssemblyStep> {
    let mut ordered: Vec<&Bar> = bars.iter().collect();
    ordered.sort_by(|a, b| b.length().total_cmp(&a.length()));

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, bar)| AssemblyStep {
            order_index: i + 1,
            bar_id: bar.id,
            length: round_tenth(bar.length()),
            description: orientation(bar).to_string(),
            position_label: position_label(bar, opening.height),
        })
        .collect()
}

fn diamond_sequence(bars: &[Bar], opening: Opening) -> Vec<AssemblyStep> {
    let mid_x = opening.width / 2.0;
    let mid_y = opening.height / 2.0;

    let quadrant = |bar: &Bar| {
        let c = bar.midpoint();
        match (c.x >= mid_x, c.y < mid_y) {
            (true, true) => 0,
            (true, false) => 1,
            (false, false) => 2,
            (false, true) => 3,
        }
    };

    let mut ordered: Vec<&Bar> = bars.iter().collect();
    ordered.sort_by_key(|bar| quadrant(*bar));

    let label = format!(
        "Start from center: X={:.1}, Y={:.1} (from top)",
        round_tenth(mid_x),
        round_tenth(mid_y)
    );

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, bar)| AssemblyStep {
            order_index: i + 1,
            bar_id: bar.id,
            length: round_tenth(bar.length()),
            description: QUADRANT_NAMES
                .get(i)
                .copied()
                .unwrap_or("Additional segment")
                .to_string(),
            position_label: label.clone(),
        })
        .collect()
}

fn orientation(bar: &Bar) -> &'static str {
    if bar.is_vertical() {
        "Vertical"
    } else if bar.is_horizontal() {
        "Horizontal"
    } else {
        "Angled"
    }
}

fn position_label(bar: &Bar, height: f64) -> String {
    if bar.is_vertical() {
        format!("X: {:.1} mm from left", round_tenth(bar.start.x))
    } else if bar.is_horizontal() {
        format!("Y: {:.1} mm from bottom", round_tenth(height - bar.start.y))
    } else {
        format!(
            "Start: ({:.1}, {:.1}) from left/bottom",
            round_tenth(bar.start.x),
            round_tenth(height - bar.start.y)
        )
    }
}
