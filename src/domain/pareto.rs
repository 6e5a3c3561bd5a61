// Pareto series derivation
use super::tally::Tally;
use serde::Serialize;

/// Cumulative share drawn as the reference line on every chart
pub const REFERENCE_PERCENT: f64 = 80.0;

/// Parallel sequences behind one Pareto chart.
///
/// `cumulative_percent` is non-decreasing and its last value is exactly 100.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub cumulative: Vec<u64>,
    pub cumulative_percent: Vec<f64>,
}

impl ParetoSeries {
    /// Returns `None` for an empty tally, which callers render as "no data"
    pub fn from_tally(tally: &Tally) -> Option<Self> {
        let labels: Vec<String> = tally.entries().iter().map(|e| e.label.clone()).collect();
        let counts: Vec<u64> = tally.entries().iter().map(|e| e.count).collect();
        let cumulative = running_totals(&counts);
        let cumulative_percent = cumulative_percentages(&counts)?;

        Some(Self {
            labels,
            counts,
            cumulative,
            cumulative_percent,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of leading categories needed to reach the reference share
    pub fn vital_few(&self) -> usize {
        self.cumulative_percent
            .iter()
            .position(|p| *p >= REFERENCE_PERCENT)
            .map(|idx| idx + 1)
            .unwrap_or(self.len())
    }
}

pub fn running_totals(counts: &[u64]) -> Vec<u64> {
    counts
        .iter()
        .scan(0u64, |acc, c| {
            *acc += c;
            Some(*acc)
        })
        .collect()
}

/// Running share of the total, in percent. `None` when the total is zero.
pub fn cumulative_percentages(counts: &[u64]) -> Option<Vec<f64>> {
    let totals = running_totals(counts);
    let total = *totals.last()?;
    if total == 0 {
        return None;
    }

    Some(
        totals
            .into_iter()
            .map(|running| 100.0 * running as f64 / total as f64)
            .collect(),
    )
}
