//! Stock Optimizer
//!
//! Best-fit-decreasing packing of cut pieces onto fixed-length stock bars.
//!
//! Every [`CutItem`] is expanded into `count × repetition` unit cuts, sorted
//! longest first (stable), and each cut goes to the open bar whose remaining
//! length is the tightest fit for `length + kerf`. Ties go to the bar opened
//! first. When nothing fits a new bar is opened, even for a piece longer than
//! the stock; such bars report zero waste and are flagged as oversized.
//!
//! This is a deterministic heuristic, not an exact solver.

use crate::cut_list::CutItem;
use crate::error::CamToolResult;
use muntinkit_core::InputError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Parameters for stock packing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingParams {
    /// Length of one raw stock bar (mm)
    pub stock_length: f64,
    /// Material lost per saw cut (mm)
    pub kerf: f64,
    /// Number of identical sashes; every item count is multiplied by this
    pub repetition: usize,
}

impl Default for PackingParams {
    fn default() -> Self {
        Self {
            stock_length: 6000.0,
            kerf: 4.0,
            repetition: 1,
        }
    }
}

impl PackingParams {
    pub fn new(stock_length: f64, kerf: f64, repetition: usize) -> Self {
        Self {
            stock_length,
            kerf,
            repetition,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !self.stock_length.is_finite() || self.stock_length <= 0.0 {
            return Err(InputError::InvalidStockLength {
                length: self.stock_length,
            });
        }
        if !self.kerf.is_finite() || self.kerf < 0.0 {
            return Err(InputError::InvalidKerf { kerf: self.kerf });
        }
        if self.repetition == 0 {
            return Err(InputError::ZeroRepetition);
        }
        Ok(())
    }
}

/// One piece placed on a stock bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub length: f64,
    pub angle_start: f64,
    pub angle_end: f64,
    /// Saw label, e.g. `L:2000.0mm (90.0°/90.0°)`
    pub description: String,
}

impl Cut {
    fn from_item(item: &CutItem) -> Self {
        Self {
            length: item.length,
            angle_start: item.angle_start,
            angle_end: item.angle_end,
            description: format!(
                "L:{:.1}mm ({:.1}°/{:.1}°)",
                item.length, item.angle_start, item.angle_end
            ),
        }
    }
}

/// One physical length of stock and the cuts assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBar {
    /// 1-based, in opening order
    pub id: usize,
    pub total_length: f64,
    pub cuts: Vec<Cut>,
    /// Sum of `length + kerf` over the cuts
    pub used_length: f64,
    /// Leftover length, clamped at 0 for oversized bars
    pub waste: f64,
}

impl StockBar {
    fn open(id: usize, total_length: f64) -> Self {
        Self {
            id,
            total_length,
            cuts: Vec::new(),
            used_length: 0.0,
            waste: 0.0,
        }
    }

    /// Unclamped remaining length; negative for an oversized bar
    pub fn remaining(&self) -> f64 {
        self.total_length - self.used_length
    }

    /// A piece on this bar is longer than the stock itself
    pub fn is_oversized(&self) -> bool {
        self.used_length > self.total_length
    }
}

/// Outcome of a packing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub bars: Vec<StockBar>,
    pub total_waste: f64,
    pub waste_percentage: f64,
    pub bars_used: usize,
}

impl OptimizationResult {
    pub fn oversized_bars(&self) -> impl Iterator<Item = &StockBar> {
        self.bars.iter().filter(|b| b.is_oversized())
    }

    /// Production warnings for pieces that do not fit the stock
    pub fn warnings(&self) -> Vec<String> {
        self.oversized_bars()
            .map(|bar| {
                let longest = bar.cuts.iter().map(|c| c.length).fold(0.0, f64::max);
                format!(
                    "Bar {}: piece of {:.1} mm does not fit on any {:.0} mm stock length",
                    bar.id, longest, bar.total_length
                )
            })
            .collect()
    }

    /// Total number of pieces placed
    pub fn cut_count(&self) -> usize {
        self.bars.iter().map(|b| b.cuts.len()).sum()
    }
}

/// Pack `items` onto stock bars using best-fit-decreasing.
///
/// Fails on stock length ≤ 0, negative kerf, a zero repetition factor or a
/// repetition so large the piece count overflows.
pub fn pack_stock(items: &[CutItem], params: &PackingParams) -> CamToolResult<OptimizationResult> {
    params.validate()?;

    let total = items.iter().try_fold(0usize, |total, item| {
        item.count
            .checked_mul(params.repetition)
            .and_then(|n| total.checked_add(n))
    });
    let Some(total) = total else {
        return Err(InputError::parameter(
            "repetition",
            format!("{} sashes overflow the piece count", params.repetition),
        )
        .into());
    };

    let mut pieces: Vec<&CutItem> = Vec::with_capacity(total);
    for item in items {
        pieces.extend(std::iter::repeat(item).take(item.count * params.repetition));
    }
    pieces.sort_by(|a, b| b.length.total_cmp(&a.length));

    let mut bars: Vec<StockBar> = Vec::new();

    for item in pieces {
        let required = item.length + params.kerf;

        let mut best: Option<(usize, f64)> = None;
        for (i, bar) in bars.iter().enumerate() {
            let remaining = bar.remaining();
            if remaining >= required {
                let slack = remaining - required;
                if best.map_or(true, |(_, s)| slack < s) {
                    best = Some((i, slack));
                }
            }
        }

        let index = match best {
            Some((i, _)) => i,
            None => {
                if required > params.stock_length {
                    warn!(
                        "Piece {:.1} mm (+{:.1} kerf) exceeds stock length {:.0} mm; placing on its own bar",
                        item.length, params.kerf, params.stock_length
                    );
                }
                bars.push(StockBar::open(bars.len() + 1, params.stock_length));
                bars.len() - 1
            }
        };

        let bar = &mut bars[index];
        bar.cuts.push(Cut::from_item(item));
        bar.used_length += required;
    }

    for bar in &mut bars {
        bar.waste = bar.remaining().max(0.0);
    }

    let total_waste: f64 = bars.iter().map(|b| b.waste).sum();
    let bars_used = bars.len();
    let waste_percentage = if bars_used == 0 {
        0.0
    } else {
        100.0 * total_waste / (bars_used as f64 * params.stock_length)
    };

    debug!(
        "packed {} pieces onto {} bars of {:.0} mm, waste {:.1} mm ({:.2}%)",
        bars.iter().map(|b| b.cuts.len()).sum::<usize>(),
        bars_used,
        params.stock_length,
        total_waste,
        waste_percentage
    );

    Ok(OptimizationResult {
        bars,
        total_waste,
        waste_percentage,
        bars_used,
    })
}
