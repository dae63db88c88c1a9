//! Distance-to-cost conversion
//!
//! A fixed linear tariff: `cost = distance_km * rate_per_km`.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{DEFAULT_CURRENCY_SYMBOL, Distance, Money};

/// Currency units charged per kilometer unless configured otherwise
pub const DEFAULT_RATE_PER_KM: f64 = 10.0;

/// Cost of a distance in kilometers at the default rate
///
/// # Errors
///
/// Returns `DomainError::ValidationError` for negative or non-finite distances.
pub fn estimate_cost(distance_km: f64) -> Result<f64, DomainError> {
    CostEstimator::default()
        .cost_for_kilometers(distance_km)
        .map(|m| m.amount())
}

/// Linear tariff with a configurable rate and currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimator {
    rate_per_km: f64,
    currency_symbol: String,
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self {
            rate_per_km: DEFAULT_RATE_PER_KM,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl CostEstimator {
    /// Create an estimator with a custom tariff
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the rate is not a positive
    /// finite number.
    pub fn new(rate_per_km: f64, currency_symbol: impl Into<String>) -> Result<Self, DomainError> {
        if !rate_per_km.is_finite() || rate_per_km <= 0.0 {
            return Err(DomainError::validation(format!(
                "rate per km must be positive, got {rate_per_km}"
            )));
        }
        Ok(Self {
            rate_per_km,
            currency_symbol: currency_symbol.into(),
        })
    }

    /// Configured rate
    #[must_use]
    pub const fn rate_per_km(&self) -> f64 {
        self.rate_per_km
    }

    /// Cost of a distance given in kilometers
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` for negative or non-finite distances.
    pub fn cost_for_kilometers(&self, distance_km: f64) -> Result<Money, DomainError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(DomainError::validation(format!(
                "distance must be a non-negative number of kilometers, got {distance_km}"
            )));
        }
        Ok(Money::new(
            distance_km * self.rate_per_km,
            self.currency_symbol.clone(),
        ))
    }

    /// Cost of a route distance
    ///
    /// # Errors
    ///
    /// See [`CostEstimator::cost_for_kilometers`].
    pub fn cost_for(&self, distance: Distance) -> Result<Money, DomainError> {
        self.cost_for_kilometers(distance.kilometers())
    }
}
