//! Monetary amount value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency symbol used when none is configured
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// An amount of money in a single currency, identified by its display symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    amount: f64,
    currency_symbol: String,
}

impl Money {
    /// Create an amount in the given currency
    #[must_use]
    pub fn new(amount: f64, currency_symbol: impl Into<String>) -> Self {
        Self {
            amount,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Create an amount in the default currency
    #[must_use]
    pub fn rupees(amount: f64) -> Self {
        Self::new(amount, DEFAULT_CURRENCY_SYMBOL)
    }

    /// Raw amount
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// Currency symbol
    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }
}

/// Renders as `"₹1500.00"`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_symbol, self.amount)
    }
}
