//! Route distance value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance along a route, stored in meters as reported by the routing engine
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    /// Create a distance from meters
    #[must_use]
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    /// Create a distance from kilometers
    #[must_use]
    pub fn from_kilometers(kilometers: f64) -> Self {
        Self(kilometers * 1000.0)
    }

    /// Distance in meters
    #[must_use]
    pub const fn meters(self) -> f64 {
        self.0
    }

    /// Distance in kilometers
    #[must_use]
    pub fn kilometers(self) -> f64 {
        self.0 / 1000.0
    }
}

/// Renders as `"150.00 km"`
impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} km", self.kilometers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meters_to_kilometers() {
        let d = Distance::from_meters(150_000.0);
        assert!((d.kilometers() - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Distance::from_meters(150_000.0).to_string(), "150.00 km");
        assert_eq!(Distance::from_meters(1234.5).to_string(), "1.23 km");
        assert_eq!(Distance::default().to_string(), "0.00 km");
    }

    #[test]
    fn from_kilometers_roundtrips_meters() {
        assert!((Distance::from_kilometers(2.5).meters() - 2500.0).abs() < f64::EPSILON);
    }
}
