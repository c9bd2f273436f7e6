//! Reference-rate path simulation

mod generator;

pub use generator::{RatePathGenerator, GENERATED_RATE_FLOOR};
