//! Pairwise strategy comparison
//!
//! Win probabilities are *rank-paired*: each strategy's sorted cost array is
//! indexed positionally, so index `i` pairs the i-th cheapest outcome of one
//! strategy with the i-th cheapest of the other. This compares the two cost
//! distributions rank by rank rather than re-running both strategies on the
//! same underlying rate path; it has lower statistical fidelity than
//! trajectory pairing but is preserved deliberately for output parity with
//! the reference implementation.
//!
//! Tie policy: comparison is strict `<`, so a tied pair is a win for neither
//! side and `win_probability(A, B) + win_probability(B, A) = 1 - tie_fraction`.
//! With continuous random rates ties are negligible; they appear only in
//! degenerate deterministic setups (zero volatility, floored rates).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::simulation::StrategyResult;

/// Outcome of comparing an ordered strategy pair (A, B)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Fraction of rank-paired outcomes where A costs strictly less than B
    pub win_probability: f64,
    /// `median(B) - median(A)`: positive when A is the cheaper choice
    pub expected_savings: f64,
}

/// Comparison entries for every ordered pair of distinct strategies,
/// keyed `[A][B]`
pub type ComparisonMap = BTreeMap<String, BTreeMap<String, ComparisonEntry>>;

/// Compare every ordered pair of strategies
///
/// Entries for (A, B) and (B, A) are computed independently; no symmetry is
/// assumed or enforced.
pub fn compare(results: &[StrategyResult]) -> ComparisonMap {
    let mut comparisons = ComparisonMap::new();

    for a in results {
        let mut row = BTreeMap::new();
        for b in results {
            if a.name == b.name {
                continue;
            }
            row.insert(b.name.clone(), compare_pair(a, b));
        }
        comparisons.insert(a.name.clone(), row);
    }

    comparisons
}

fn compare_pair(a: &StrategyResult, b: &StrategyResult) -> ComparisonEntry {
    debug_assert_eq!(a.costs.len(), b.costs.len());

    let wins = a
        .costs
        .iter()
        .zip(&b.costs)
        .filter(|(cost_a, cost_b)| cost_a < cost_b)
        .count();

    ComparisonEntry {
        win_probability: wins as f64 / a.costs.len() as f64,
        expected_savings: b.median_cost - a.median_cost,
    }
}
