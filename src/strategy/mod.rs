//! Mortgage rate strategies and per-path cost evaluation

mod definition;
mod evaluator;

pub use definition::{
    standard_strategy_set, Strategy, StrategyDefinition, FIXED_RENEWAL_RATE_FLOOR,
    VARIABLE_RATE_FLOOR,
};
pub use evaluator::{cumulative_interest, evaluate, evaluate_total, EvaluatedPath};
