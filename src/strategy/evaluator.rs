//! Per-path interest cost evaluation for a strategy

use super::definition::{Strategy, FIXED_RENEWAL_RATE_FLOOR, VARIABLE_RATE_FLOOR};

/// Month-by-month interest for one strategy on one rate path
#[derive(Debug, Clone)]
pub struct EvaluatedPath {
    /// Interest paid each month, length = horizon months
    pub monthly_interest: Vec<f64>,
    /// Sum of the monthly series
    pub total_cost: f64,
}

/// Evaluate a strategy against one rate path, keeping the monthly series
///
/// Only the representative path of each strategy needs the full series;
/// bulk cost collection goes through [`evaluate_total`] instead so memory
/// stays bounded at one `f64` per path.
pub fn evaluate(strategy: &Strategy, path: &[f64], loan_amount: f64) -> EvaluatedPath {
    let mut monthly_interest = Vec::with_capacity(path.len());
    walk_months(strategy, path, loan_amount, |interest| {
        monthly_interest.push(interest)
    });
    let total_cost = monthly_interest.iter().sum();
    EvaluatedPath {
        monthly_interest,
        total_cost,
    }
}

/// Evaluate a strategy against one rate path, returning only the total cost
pub fn evaluate_total(strategy: &Strategy, path: &[f64], loan_amount: f64) -> f64 {
    let mut total = 0.0;
    walk_months(strategy, path, loan_amount, |interest| total += interest);
    total
}

/// Running prefix sum of a monthly interest series
pub fn cumulative_interest(monthly_interest: &[f64]) -> Vec<f64> {
    let mut accumulated = Vec::with_capacity(monthly_interest.len());
    let mut sum = 0.0;
    for &payment in monthly_interest {
        sum += payment;
        accumulated.push(sum);
    }
    accumulated
}

/// Walk the horizon month by month, calling `record` with each month's
/// interest payment
fn walk_months<F: FnMut(f64)>(strategy: &Strategy, path: &[f64], loan_amount: f64, mut record: F) {
    match *strategy {
        Strategy::Variable { margin } => {
            for &reference_rate in path {
                let rate = (reference_rate + margin).max(VARIABLE_RATE_FLOOR);
                record(loan_amount * rate / 12.0);
            }
        }
        Strategy::Fixed {
            initial_rate,
            duration_months,
        } => {
            let total_months = path.len();
            let mut current_month = 0;

            while current_month < total_months {
                let remaining = total_months - current_month;
                // min 1 so a degenerate zero-duration contract cannot stall
                let block_months = duration_months.min(remaining).max(1);

                // First block keeps the contracted rate unconditionally;
                // every renewal re-prices at then-current market terms
                let rate = if current_month == 0 {
                    initial_rate
                } else {
                    let base_rate = path[current_month];
                    (base_rate + Strategy::renewal_spread(duration_months))
                        .max(FIXED_RENEWAL_RATE_FLOOR)
                };

                for _ in 0..block_months {
                    record(loan_amount * rate / 12.0);
                }
                current_month += block_months;
            }
        }
    }
}
