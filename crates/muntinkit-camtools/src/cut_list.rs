//! Cut list for straight layouts
//!
//! Drives [`BoundaryResolver`] and [`calculate_with_boundaries`] over every
//! bar, then groups the results into counted [`CutItem`]s.

use crate::boundary::{BarEnd, BoundaryResolver};
use crate::error::CamToolResult;
use crate::segment::{calculate_with_boundaries, CutResult};
use muntinkit_core::error::ensure_non_negative;
use muntinkit_core::{validate_bars, Bar, InputError, Opening};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Parameters for straight-layout cut calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutListParams {
    /// Gap between a bar end and the frame/bead (mm)
    pub frame_clearance: f64,
    /// Gap added to half the crossing bar's face width at a butt joint (mm)
    pub joint_clearance: f64,
    /// Distance within which an endpoint counts as touching a boundary (mm)
    pub boundary_epsilon: f64,
}

impl Default for CutListParams {
    fn default() -> Self {
        Self {
            frame_clearance: 1.0,
            joint_clearance: 1.0,
            boundary_epsilon: 0.001,
        }
    }
}

impl CutListParams {
    pub fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("frame_clearance", self.frame_clearance)?;
        ensure_non_negative("joint_clearance", self.joint_clearance)?;
        ensure_non_negative("boundary_epsilon", self.boundary_epsilon)
    }
}

/// An aggregated manufacturing line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutItem {
    /// Cut length rounded to 0.1 mm
    pub length: f64,
    /// Smaller miter angle, rounded to 0.1°
    pub angle_start: f64,
    /// Larger miter angle, rounded to 0.1°
    pub angle_end: f64,
    pub count: usize,
}

impl CutItem {
    pub fn new(length: f64, angle_start: f64, angle_end: f64, count: usize) -> Self {
        Self {
            length,
            angle_start,
            angle_end,
            count,
        }
    }
}

/// Grouping key in integer tenths so equality is exact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CutKey {
    length: i64,
    min_angle: i64,
    max_angle: i64,
}

impl CutKey {
    fn new(length: f64, angle_a: f64, angle_b: f64) -> Self {
        let tenths = |v: f64| (v * 10.0).round() as i64;
        let (a, b) = (tenths(angle_a), tenths(angle_b));
        Self {
            length: tenths(length),
            min_angle: a.min(b),
            max_angle: a.max(b),
        }
    }
}

/// Groups `(length, angle, angle)` cuts into counted items.
///
/// Mirror-image cuts (30°/60° and 60°/30°) share one item. Output is sorted
/// by descending length; equal lengths keep first-seen order.
#[derive(Debug, Default)]
pub struct CutListAggregator {
    index: HashMap<CutKey, usize>,
    items: Vec<CutItem>,
}

impl CutListAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, length: f64, angle_a: f64, angle_b: f64) {
        let key = CutKey::new(length, angle_a, angle_b);
        match self.index.get(&key) {
            Some(&i) => self.items[i].count += 1,
            None => {
                self.index.insert(key, self.items.len());
                self.items.push(CutItem::new(
                    key.length as f64 / 10.0,
                    key.min_angle as f64 / 10.0,
                    key.max_angle as f64 / 10.0,
                    1,
                ));
            }
        }
    }

    pub fn add_result(&mut self, result: &CutResult) {
        self.add(result.final_length, result.start_angle, result.end_angle);
    }

    pub fn finish(self) -> Vec<CutItem> {
        let mut items = self.items;
        items.sort_by(|a, b| b.length.total_cmp(&a.length));
        items
    }
}

/// Aggregate a slice of cut results
pub fn aggregate_cuts(results: &[CutResult]) -> Vec<CutItem> {
    let mut aggregator = CutListAggregator::new();
    for r in results {
        aggregator.add_result(r);
    }
    aggregator.finish()
}

/// Per-bar cut geometry, in input order
pub fn compute_cut_results(
    bars: &[Bar],
    opening: Opening,
    params: &CutListParams,
) -> CamToolResult<Vec<CutResult>> {
    params.validate()?;
    opening.validate()?;
    validate_bars(bars)?;

    let resolver = BoundaryResolver::new(bars, opening.rect(), params);
    let results: Vec<CutResult> = (0..bars.len())
        .map(|i| {
            let start = resolver.resolve(i, BarEnd::Start);
            let end = resolver.resolve(i, BarEnd::End);
            let r = calculate_with_boundaries(&bars[i], &start, &end);
            debug!(
                "bar {}: {:?}/{:?} -> {:.1} mm ({:.1}°/{:.1}°)",
                bars[i].id,
                start.kind,
                end.kind,
                r.final_length,
                r.start_angle,
                r.end_angle
            );
            r
        })
        .collect();

    Ok(results)
}

/// Cut list for a straight or orthogonal layout inside `opening_width` x
/// `opening_height`.
///
/// Fails on a non-positive opening or a zero-length bar.
pub fn compute_cut_list(
    bars: &[Bar],
    opening_width: f64,
    opening_height: f64,
    params: &CutListParams,
) -> CamToolResult<Vec<CutItem>> {
    let results = compute_cut_results(bars, Opening::new(opening_width, opening_height), params)?;
    let items = aggregate_cuts(&results);
    debug!(
        "cut list: {} bars -> {} items in {:.0}x{:.0} opening",
        bars.len(),
        items.len(),
        opening_width,
        opening_height
    );
    Ok(items)
}
