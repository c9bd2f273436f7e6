//! Simulation orchestrator: composes path generation, strategy evaluation,
//! aggregation, and pairwise comparison into a single result object

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compare::{compare, ComparisonEntry, ComparisonMap};
use crate::params::{ParameterError, SimulationParameters};
use crate::rates::RatePathGenerator;
use crate::stats::{median_sorted, summarize};
use crate::strategy::{
    cumulative_interest, evaluate, evaluate_total, standard_strategy_set, Strategy,
};

/// At most this many raw rate paths are kept in the result for display
pub const MAX_SAMPLE_PATHS: usize = 10;

/// Aggregated outcome of one strategy across all simulated paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResult {
    pub name: String,
    pub strategy: Strategy,

    /// Per-path total interest costs, sorted ascending
    pub costs: Vec<f64>,

    pub mean_cost: f64,
    pub median_cost: f64,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
    pub percentile_90: f64,

    /// Monthly interest of the representative path (the path whose total
    /// cost is closest to the median); only this one path's series is kept
    pub monthly_interest: Vec<f64>,
    /// Running cumulative interest of the representative path
    pub cumulative_interest: Vec<f64>,
}

impl StrategyResult {
    /// Spread of the cost distribution relative to its median,
    /// `(p90 - p10) / median`
    pub fn relative_risk_range(&self) -> f64 {
        (self.percentile_90 - self.percentile_10) / self.median_cost
    }
}

/// Qualitative payment-uncertainty classification of the variable strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Relative risk range up to 0.3
    Low,
    /// Relative risk range above 0.3
    Moderate,
    /// Relative risk range above 0.5
    High,
}

impl RiskLevel {
    /// Classify a relative risk range
    pub fn from_relative_range(range: f64) -> Self {
        if range > 0.5 {
            RiskLevel::High
        } else if range > 0.3 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

/// Complete output of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One aggregated result per strategy, in strategy-set order
    pub strategies: Vec<StrategyResult>,

    /// Win probability and expected savings for every ordered strategy pair
    pub comparisons: ComparisonMap,

    /// Up to [`MAX_SAMPLE_PATHS`] raw rate paths for display
    pub sample_rate_paths: Vec<Vec<f64>>,

    /// Element-wise median rate across all simulated paths, month by month.
    /// A display trajectory distinct from any individual path.
    pub median_rate_path: Vec<f64>,

    pub projection_years: u32,
}

impl SimulationResult {
    /// The recommended strategy: lowest median total cost
    pub fn best_strategy(&self) -> &StrategyResult {
        self.strategies
            .iter()
            .min_by(|a, b| a.median_cost.total_cmp(&b.median_cost))
            .expect("simulation always evaluates at least one strategy")
    }

    /// Comparison entry for the ordered pair (a, b), if both exist
    pub fn comparison(&self, a: &str, b: &str) -> Option<&ComparisonEntry> {
        self.comparisons.get(a)?.get(b)
    }

    /// Median-cost premium of `name` over the best strategy
    pub fn median_cost_vs_best(&self, name: &str) -> Option<f64> {
        let strategy = self.strategies.iter().find(|s| s.name == name)?;
        Some(strategy.median_cost - self.best_strategy().median_cost)
    }

    /// Payment-uncertainty classification of the variable strategy
    pub fn variable_risk_level(&self) -> Option<RiskLevel> {
        self.strategies
            .iter()
            .find(|s| matches!(s.strategy, Strategy::Variable { .. }))
            .map(|s| RiskLevel::from_relative_range(s.relative_risk_range()))
    }
}

/// Validated runner for mortgage strategy simulations
///
/// Construction rejects malformed parameters, so a held runner can only
/// produce well-defined runs. Each run is a pure function of the parameters
/// and the seed; repeated runs share no state.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    params: SimulationParameters,
}

impl SimulationRunner {
    /// Create a runner, rejecting invalid parameters before any simulation
    pub fn new(params: SimulationParameters) -> Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Run the full simulation with a seeded random source
    pub fn run(&self, seed: u64) -> SimulationResult {
        let params = &self.params;
        let months = params.horizon_months();

        info!(
            "simulating {} paths over {} months (seed {})",
            params.num_simulations, months, seed
        );

        let generator = RatePathGenerator::new(
            params.current_rate,
            params.mean_reversion,
            params.volatility,
            params.long_term_mean,
        );
        let paths = generator.generate(months, params.num_simulations, seed);

        let strategies: Vec<StrategyResult> = standard_strategy_set(params)
            .into_iter()
            .map(|definition| {
                // Bulk evaluation keeps one f64 per path; only the
                // representative path is re-evaluated for its full series
                let costs: Vec<f64> = paths
                    .par_iter()
                    .map(|path| evaluate_total(&definition.strategy, path, params.loan_amount))
                    .collect();

                let summary = summarize(&costs);
                let representative = evaluate(
                    &definition.strategy,
                    &paths[summary.representative_index],
                    params.loan_amount,
                );

                debug!(
                    "{}: median {:.0}, p10 {:.0}, p90 {:.0}",
                    definition.name,
                    summary.median_cost,
                    summary.percentile_10,
                    summary.percentile_90
                );

                StrategyResult {
                    name: definition.name,
                    strategy: definition.strategy,
                    costs: summary.sorted_costs,
                    mean_cost: summary.mean_cost,
                    median_cost: summary.median_cost,
                    percentile_10: summary.percentile_10,
                    percentile_25: summary.percentile_25,
                    percentile_75: summary.percentile_75,
                    percentile_90: summary.percentile_90,
                    cumulative_interest: cumulative_interest(&representative.monthly_interest),
                    monthly_interest: representative.monthly_interest,
                }
            })
            .collect();

        let comparisons = compare(&strategies);
        let median_rate_path = median_rate_path(&paths, months);
        let sample_rate_paths = paths.iter().take(MAX_SAMPLE_PATHS).cloned().collect();

        if let Some(best) = strategies
            .iter()
            .min_by(|a, b| a.median_cost.total_cmp(&b.median_cost))
        {
            info!("recommended strategy: {}", best.name);
        }

        SimulationResult {
            strategies,
            comparisons,
            sample_rate_paths,
            median_rate_path,
            projection_years: params.projection_years,
        }
    }
}

/// Element-wise nearest-rank median across all paths, month by month
fn median_rate_path(paths: &[Vec<f64>], months: usize) -> Vec<f64> {
    (0..months)
        .map(|month| {
            let mut column: Vec<f64> = paths.iter().map(|path| path[month]).collect();
            column.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            median_sorted(&column)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SEED: u64 = 42;

    /// Flat 1% rates, fully deterministic; totals are checkable by hand
    fn deterministic_params() -> SimulationParameters {
        SimulationParameters {
            loan_amount: 500_000.0,
            projection_years: 10,
            current_rate: 0.01,
            margin: 0.008,
            fixed_rate_2y: 0.012,
            fixed_rate_5y: 0.014,
            fixed_rate_10y: 0.015,
            num_simulations: 5,
            mean_reversion: 0.0,
            volatility: 0.0,
            long_term_mean: 0.01,
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let params = SimulationParameters {
            loan_amount: -1.0,
            ..Default::default()
        };
        assert!(SimulationRunner::new(params).is_err());
    }

    #[test]
    fn test_result_cardinalities() {
        let params = SimulationParameters {
            num_simulations: 37,
            projection_years: 7,
            ..Default::default()
        };
        let result = SimulationRunner::new(params).unwrap().run(SEED);

        assert_eq!(result.strategies.len(), 4);
        for strategy in &result.strategies {
            assert_eq!(strategy.costs.len(), 37);
            assert_eq!(strategy.monthly_interest.len(), 84);
            assert_eq!(strategy.cumulative_interest.len(), 84);
        }
        assert_eq!(result.median_rate_path.len(), 84);
        assert_eq!(result.sample_rate_paths.len(), 10);
        assert_eq!(result.projection_years, 7);
    }

    #[test]
    fn test_sample_paths_capped() {
        let params = SimulationParameters {
            num_simulations: 3,
            ..Default::default()
        };
        let result = SimulationRunner::new(params).unwrap().run(SEED);
        assert_eq!(result.sample_rate_paths.len(), 3);
    }

    #[test]
    fn test_percentile_monotonicity_per_strategy() {
        let result = SimulationRunner::new(SimulationParameters::default())
            .unwrap()
            .run(SEED);
        for s in &result.strategies {
            assert!(s.percentile_10 <= s.percentile_25, "{}", s.name);
            assert!(s.percentile_25 <= s.median_cost, "{}", s.name);
            assert!(s.median_cost <= s.percentile_75, "{}", s.name);
            assert!(s.percentile_75 <= s.percentile_90, "{}", s.name);
        }
    }

    #[test]
    fn test_representative_cost_closest_to_median() {
        let result = SimulationRunner::new(SimulationParameters::default())
            .unwrap()
            .run(SEED);
        for s in &result.strategies {
            let representative_total: f64 = s.monthly_interest.iter().sum();
            let best_distance = (representative_total - s.median_cost).abs();
            for &cost in &s.costs {
                assert!(
                    best_distance <= (cost - s.median_cost).abs() + 1e-9,
                    "{}: representative not closest to median",
                    s.name
                );
            }
        }
    }

    #[test]
    fn test_deterministic_scenario_totals() {
        let result = SimulationRunner::new(deterministic_params())
            .unwrap()
            .run(SEED);

        let variable = &result.strategies[0];
        assert_eq!(variable.name, "SARON Variable");
        // 500000 * (0.01 + 0.008) / 12 = 750 per month, 120 months
        for &payment in &variable.monthly_interest {
            assert_relative_eq!(payment, 750.0, max_relative = 1e-12);
        }
        for &cost in &variable.costs {
            assert_relative_eq!(cost, 90_000.0, max_relative = 1e-12);
        }

        let fixed_10y = &result.strategies[3];
        assert_eq!(fixed_10y.name, "10-Year Fixed");
        // Single 120-month block at 1.5%, no renewal
        for &cost in &fixed_10y.costs {
            assert_relative_eq!(cost, 75_000.0, max_relative = 1e-12);
        }

        // Fixed 10y wins every paired comparison against variable
        let entry = result.comparison("10-Year Fixed", "SARON Variable").unwrap();
        assert_relative_eq!(entry.win_probability, 1.0);
        assert_relative_eq!(entry.expected_savings, 15_000.0, max_relative = 1e-12);

        let reverse = result.comparison("SARON Variable", "10-Year Fixed").unwrap();
        assert_relative_eq!(reverse.win_probability, 0.0);
    }

    #[test]
    fn test_deterministic_scenario_median_path_flat() {
        let result = SimulationRunner::new(deterministic_params())
            .unwrap()
            .run(SEED);
        for &rate in &result.median_rate_path {
            assert_relative_eq!(rate, 0.01);
        }
    }

    #[test]
    fn test_best_strategy_lowest_median() {
        let result = SimulationRunner::new(deterministic_params())
            .unwrap()
            .run(SEED);
        // Medians: variable 90k, 2y has renewals at 1.6%, 5y at 1.8%, 10y 75k
        assert_eq!(result.best_strategy().name, "10-Year Fixed");
        assert_relative_eq!(
            result.median_cost_vs_best("SARON Variable").unwrap(),
            15_000.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_deterministic_scenario_risk_level_low() {
        let result = SimulationRunner::new(deterministic_params())
            .unwrap()
            .run(SEED);
        // Zero volatility: p10 == p90, relative range 0
        assert_eq!(result.variable_risk_level(), Some(RiskLevel::Low));
    }

    #[test]
    fn test_pairwise_closure_with_continuous_rates() {
        let result = SimulationRunner::new(SimulationParameters::default())
            .unwrap()
            .run(SEED);
        // Continuous random rates: ties are negligible, closure holds exactly
        // for every ordered pair
        for a in &result.strategies {
            for b in &result.strategies {
                if a.name == b.name {
                    continue;
                }
                let forward = result.comparison(&a.name, &b.name).unwrap().win_probability;
                let backward = result.comparison(&b.name, &a.name).unwrap().win_probability;
                let ties = a
                    .costs
                    .iter()
                    .zip(&b.costs)
                    .filter(|(x, y)| x == y)
                    .count() as f64
                    / a.costs.len() as f64;
                assert_relative_eq!(forward + backward, 1.0 - ties, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_seeded_run_reproducible() {
        let runner = SimulationRunner::new(SimulationParameters::default()).unwrap();
        let a = runner.run(SEED);
        let b = runner.run(SEED);

        for (x, y) in a.strategies.iter().zip(&b.strategies) {
            assert_eq!(x.costs, y.costs);
            assert_eq!(x.monthly_interest, y.monthly_interest);
        }
        assert_eq!(a.median_rate_path, b.median_rate_path);
    }

    #[test]
    fn test_generated_rates_respect_floor() {
        let params = SimulationParameters {
            current_rate: -0.005,
            long_term_mean: -0.02,
            volatility: 0.05,
            mean_reversion: 0.3,
            num_simulations: 100,
            ..Default::default()
        };
        let result = SimulationRunner::new(params).unwrap().run(SEED);
        for path in &result.sample_rate_paths {
            for &rate in path {
                assert!(rate >= -0.01);
            }
        }
        for &rate in &result.median_rate_path {
            assert!(rate >= -0.01);
        }
    }

    #[test]
    fn test_single_path_degenerate_run() {
        let params = SimulationParameters {
            num_simulations: 1,
            ..Default::default()
        };
        let result = SimulationRunner::new(params).unwrap().run(SEED);
        for s in &result.strategies {
            assert_eq!(s.costs.len(), 1);
            assert_relative_eq!(s.median_cost, s.costs[0]);
            assert_relative_eq!(s.percentile_10, s.costs[0]);
            assert_relative_eq!(s.percentile_90, s.costs[0]);
        }
    }

    #[test]
    fn test_cumulative_series_ends_at_representative_total() {
        let result = SimulationRunner::new(SimulationParameters::default())
            .unwrap()
            .run(SEED);
        for s in &result.strategies {
            let total: f64 = s.monthly_interest.iter().sum();
            assert_relative_eq!(
                *s.cumulative_interest.last().unwrap(),
                total,
                max_relative = 1e-9
            );
        }
    }
}
