// Unit-width bins centred on integers: edges sit at half-integers, so no
// sample lands on a boundary.

use crate::constants::{BIN_HEADROOM_PCT, MAX_BINS};
use crate::error::{PlotError, PlotResult};
use crate::store::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    upper: u64,
    edges: Vec<f64>,
}

impl BinEdges {
    /// Edges `-0.5, 0.5, ..., upper - 0.5`.
    pub fn with_upper(upper: u64) -> Self {
        let edges = (0..=upper).map(|e| e as f64 - 0.5).collect();
        Self { upper, edges }
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn upper(&self) -> u64 {
        self.upper
    }

    pub fn first(&self) -> f64 {
        self.edges.first().copied().unwrap_or(-0.5)
    }

    pub fn last(&self) -> f64 {
        self.edges.last().copied().unwrap_or(-0.5)
    }

    /// Index of the bin holding `value`, if it is in range.
    pub fn bin_of(&self, value: u64) -> Option<usize> {
        (value < self.upper).then_some(value as usize)
    }

    pub fn counts(&self, samples: &[u64]) -> Vec<u64> {
        let mut counts = vec![0u64; self.bin_count()];
        for &v in samples {
            if let Some(bin) = self.bin_of(v) {
                counts[bin] += 1;
            }
        }
        counts
    }
}

/// `floor(max * 1.05) + 1`, in integers so the result does not depend on
/// float rounding. Saturates at `u64::MAX`.
pub fn upper_bound(max: u64) -> u64 {
    let exact = u128::from(max) * u128::from(BIN_HEADROOM_PCT) / 100 + 1;
    u64::try_from(exact).unwrap_or(u64::MAX)
}

/// Plans a shared edge sequence for every series that goes on one chart.
pub fn plan(group: &[Series<'_>]) -> PlotResult<BinEdges> {
    let mut max = None;
    for series in group {
        let series_max = series
            .max()
            .ok_or(PlotError::EmptySeries { series: series.id })?;
        max = Some(max.map_or(series_max, |m: u64| m.max(series_max)));
    }
    let max = max.ok_or(PlotError::EmptyGroup)?;
    let upper = upper_bound(max);
    // one edge and one count per millisecond, so cap before allocating
    if upper > MAX_BINS {
        return Err(PlotError::RangeTooWide { max, limit: MAX_BINS });
    }
    Ok(BinEdges::with_upper(upper))
}
