//! Pure domain calculations

pub mod cost_estimator;

pub use cost_estimator::{CostEstimator, DEFAULT_RATE_PER_KM, estimate_cost};
