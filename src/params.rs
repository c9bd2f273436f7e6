//! Simulation input parameters and boundary validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard cap on the simulation count, keeping a single run within a sane
/// memory and runtime envelope (paths alone are `sims * months` floats).
pub const MAX_SIMULATIONS: usize = 100_000;

/// Full parameter set for one simulation run
///
/// All rates are plain fractions (0.015 for 1.5%), never percentages.
/// Immutable once validated; every run is a pure function of these values
/// plus the seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Loan principal in CHF
    pub loan_amount: f64,

    /// Projection horizon in years
    pub projection_years: u32,

    /// Current SARON reference rate
    pub current_rate: f64,

    /// Margin the lender charges on top of SARON for the variable product
    pub margin: f64,

    /// Offered nominal rate for the 2-year fixed product
    pub fixed_rate_2y: f64,

    /// Offered nominal rate for the 5-year fixed product
    pub fixed_rate_5y: f64,

    /// Offered nominal rate for the 10-year fixed product
    pub fixed_rate_10y: f64,

    /// Number of simulated rate paths
    pub num_simulations: usize,

    /// Mean-reversion speed of the rate process (per month)
    pub mean_reversion: f64,

    /// Annualized volatility of the rate process
    pub volatility: f64,

    /// Long-term mean the rate process reverts toward
    pub long_term_mean: f64,
}

impl SimulationParameters {
    /// Projection horizon expressed in months
    pub fn horizon_months(&self) -> usize {
        self.projection_years as usize * 12
    }

    /// Reject malformed input before any simulation work starts
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.loan_amount > 0.0) {
            return Err(ParameterError::NonPositiveLoan(self.loan_amount));
        }
        if self.projection_years == 0 {
            return Err(ParameterError::ZeroHorizon);
        }
        if self.num_simulations == 0 {
            return Err(ParameterError::ZeroSimulations);
        }
        if self.num_simulations > MAX_SIMULATIONS {
            return Err(ParameterError::SimulationLimit(self.num_simulations));
        }
        if self.volatility < 0.0 {
            return Err(ParameterError::NegativeVolatility(self.volatility));
        }
        if self.mean_reversion < 0.0 {
            return Err(ParameterError::NegativeMeanReversion(self.mean_reversion));
        }
        Ok(())
    }
}

impl Default for SimulationParameters {
    /// Typical Swiss market conditions, useful for tests and demos
    fn default() -> Self {
        Self {
            loan_amount: 500_000.0,
            projection_years: 10,
            current_rate: 0.01,
            margin: 0.008,
            fixed_rate_2y: 0.012,
            fixed_rate_5y: 0.014,
            fixed_rate_10y: 0.018,
            num_simulations: 1_000,
            mean_reversion: 0.10,
            volatility: 0.01,
            long_term_mean: 0.015,
        }
    }
}

/// Rejection reasons for malformed simulation parameters
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("loan amount must be positive, got {0}")]
    NonPositiveLoan(f64),

    #[error("projection horizon must be at least one year")]
    ZeroHorizon,

    #[error("simulation count must be at least one")]
    ZeroSimulations,

    #[error("simulation count {0} exceeds the resource limit of {MAX_SIMULATIONS}")]
    SimulationLimit(usize),

    #[error("volatility must be non-negative, got {0}")]
    NegativeVolatility(f64),

    #[error("mean-reversion speed must be non-negative, got {0}")]
    NegativeMeanReversion(f64),
}
