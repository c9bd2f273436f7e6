//! Cost-distribution statistics and representative-path selection
//!
//! All summary statistics use nearest-rank conventions: the median of a
//! sorted array is the element at `floor(n / 2)` (even-length arrays take
//! the lower of the two middles, they are not averaged) and percentile `p`
//! is the element at `floor(n * p)`. Non-standard, but reproduced exactly
//! for parity with the reference outputs.

use serde::{Deserialize, Serialize};

/// Summary of one strategy's per-path total cost distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSummary {
    /// Per-path total costs, sorted ascending
    pub sorted_costs: Vec<f64>,
    pub mean_cost: f64,
    pub median_cost: f64,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    pub percentile_90: f64,
    /// Index (into the original, unsorted cost array) of the path whose
    /// total cost is closest to the median
    pub representative_index: usize,
}

/// Summarize a strategy's unsorted per-path total costs
///
/// The input order is the path order; it is preserved for representative
/// selection while a sorted copy drives the quantile statistics.
pub fn summarize(costs: &[f64]) -> CostSummary {
    assert!(!costs.is_empty(), "cost array must hold at least one path");

    let mut sorted_costs = costs.to_vec();
    sorted_costs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean_cost = sorted_costs.iter().sum::<f64>() / sorted_costs.len() as f64;
    let median_cost = median_sorted(&sorted_costs);

    CostSummary {
        mean_cost,
        median_cost,
        percentile_10: percentile_sorted(&sorted_costs, 0.10),
        percentile_25: percentile_sorted(&sorted_costs, 0.25),
        percentile_75: percentile_sorted(&sorted_costs, 0.75),
        percentile_90: percentile_sorted(&sorted_costs, 0.90),
        representative_index: representative_index(costs, median_cost),
        sorted_costs,
    }
}

/// Nearest-rank median of a sorted slice
pub fn median_sorted(sorted: &[f64]) -> f64 {
    sorted[sorted.len() / 2]
}

/// Nearest-rank percentile of a sorted slice, index clamped to valid range
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let index = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Index of the path whose cost has minimum absolute distance to `median`,
/// ties broken by lowest index
pub fn representative_index(costs: &[f64], median: f64) -> usize {
    let mut closest = 0;
    let mut smallest_difference = (costs[0] - median).abs();

    for (i, &cost) in costs.iter().enumerate().skip(1) {
        let difference = (cost - median).abs();
        if difference < smallest_difference {
            smallest_difference = difference;
            closest = i;
        }
    }

    closest
}
