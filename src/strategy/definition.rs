//! Strategy variants offered to the borrower

use serde::{Deserialize, Serialize};

use crate::params::SimulationParameters;

/// Variable-strategy monthly rates never fall below 0.1%
pub const VARIABLE_RATE_FLOOR: f64 = 0.001;

/// Renewed fixed-rate contracts never price below 0.5%
pub const FIXED_RENEWAL_RATE_FLOOR: f64 = 0.005;

/// A mortgage pricing strategy
///
/// A closed set of variants rather than a trait hierarchy: new strategy types
/// are rare and each needs bespoke renewal logic in the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    /// Floating rate pegged to SARON plus a lender margin, repriced monthly
    Variable {
        /// Lender margin on top of the reference rate
        margin: f64,
    },
    /// Fixed rate for a contract period, re-priced at market terms on expiry
    Fixed {
        /// Rate locked in for the first contract period
        initial_rate: f64,
        /// Nominal contract duration in months
        duration_months: usize,
    },
}

impl Strategy {
    /// Spread added to the reference rate when a fixed contract renews,
    /// keyed by the *nominal* duration. A fixed historical spread serves as
    /// a proxy for future fixed-rate pricing.
    pub fn renewal_spread(duration_months: usize) -> f64 {
        if duration_months <= 24 {
            0.006
        } else if duration_months <= 60 {
            0.008
        } else {
            0.012
        }
    }
}

/// A named strategy as it appears in results and comparisons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub name: String,
    pub strategy: Strategy,
}

impl StrategyDefinition {
    pub fn new(name: &str, strategy: Strategy) -> Self {
        Self {
            name: name.to_string(),
            strategy,
        }
    }
}

/// The four strategies every simulation compares: SARON floating plus the
/// three fixed-duration products offered in the Swiss market
pub fn standard_strategy_set(params: &SimulationParameters) -> Vec<StrategyDefinition> {
    vec![
        StrategyDefinition::new(
            "SARON Variable",
            Strategy::Variable {
                margin: params.margin,
            },
        ),
        StrategyDefinition::new(
            "2-Year Fixed",
            Strategy::Fixed {
                initial_rate: params.fixed_rate_2y,
                duration_months: 24,
            },
        ),
        StrategyDefinition::new(
            "5-Year Fixed",
            Strategy::Fixed {
                initial_rate: params.fixed_rate_5y,
                duration_months: 60,
            },
        ),
        StrategyDefinition::new(
            "10-Year Fixed",
            Strategy::Fixed {
                initial_rate: params.fixed_rate_10y,
                duration_months: 120,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renewal_spread_by_duration() {
        assert_eq!(Strategy::renewal_spread(12), 0.006);
        assert_eq!(Strategy::renewal_spread(24), 0.006);
        assert_eq!(Strategy::renewal_spread(25), 0.008);
        assert_eq!(Strategy::renewal_spread(60), 0.008);
        assert_eq!(Strategy::renewal_spread(61), 0.012);
        assert_eq!(Strategy::renewal_spread(120), 0.012);
    }

    #[test]
    fn test_standard_set_names_and_durations() {
        let set = standard_strategy_set(&SimulationParameters::default());
        assert_eq!(set.len(), 4);
        assert_eq!(set[0].name, "SARON Variable");
        assert_eq!(set[1].name, "2-Year Fixed");
        assert_eq!(set[2].name, "5-Year Fixed");
        assert_eq!(set[3].name, "10-Year Fixed");

        match set[3].strategy {
            Strategy::Fixed { duration_months, .. } => assert_eq!(duration_months, 120),
            _ => panic!("10-Year Fixed must be a fixed strategy"),
        }
    }
}
