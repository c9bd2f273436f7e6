//! Mortgage Sim - Monte Carlo engine for Swiss mortgage rate strategies
//!
//! This library provides:
//! - Mean-reverting SARON rate path simulation
//! - Interest cost evaluation for floating and fixed-with-renewal strategies
//! - Cost-distribution statistics (percentiles, representative paths)
//! - Pairwise strategy comparison (win probabilities, expected savings)
//! - A simulation runner assembling the full comparison result

pub mod compare;
pub mod params;
pub mod rates;
pub mod simulation;
pub mod stats;
pub mod strategy;

// Re-export commonly used types
pub use compare::{ComparisonEntry, ComparisonMap};
pub use params::{ParameterError, SimulationParameters};
pub use rates::RatePathGenerator;
pub use simulation::{RiskLevel, SimulationResult, SimulationRunner, StrategyResult};
pub use strategy::{Strategy, StrategyDefinition};
