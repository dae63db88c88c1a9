//! Wind speed value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meters per second to kilometers per hour
const MPS_TO_KPH: f64 = 3.6;

/// Wind speed as reported by the weather API (meters per second)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindSpeed(f64);

impl WindSpeed {
    /// Create from meters per second
    #[must_use]
    pub const fn from_meters_per_second(mps: f64) -> Self {
        Self(mps)
    }

    /// Speed in meters per second
    #[must_use]
    pub const fn meters_per_second(self) -> f64 {
        self.0
    }

    /// Speed in kilometers per hour
    #[must_use]
    pub fn kilometers_per_hour(self) -> f64 {
        self.0 * MPS_TO_KPH
    }

    /// km/h with one decimal place, e.g. `"18.0"`
    #[must_use]
    pub fn display_kph(self) -> String {
        format!("{:.1}", self.kilometers_per_hour())
    }
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km/h", self.display_kph())
    }
}
