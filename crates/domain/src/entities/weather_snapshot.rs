//! Current weather for one city

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Humidity, WindSpeed};

/// Current conditions for the configured city
///
/// Replaced wholesale on every refresh; snapshots are never diffed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City the observation belongs to
    pub city: String,
    /// Air temperature in Celsius
    pub temperature_c: f64,
    /// Apparent temperature in Celsius
    pub feels_like_c: f64,
    /// Free-text condition, e.g. "scattered clouds"
    pub description: String,
    /// Relative humidity
    pub humidity: Humidity,
    /// Wind speed
    pub wind_speed: WindSpeed,
    /// When the snapshot was taken
    pub observed_at: DateTime<Utc>,
}

/// Nearest whole degree, halves towards positive infinity (-2.5 becomes -2)
fn round_half_up(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

impl WeatherSnapshot {
    /// Temperature rounded to whole degrees
    #[must_use]
    pub fn rounded_temperature(&self) -> i64 {
        round_half_up(self.temperature_c)
    }

    /// Feels-like temperature rounded to whole degrees
    #[must_use]
    pub fn rounded_feels_like(&self) -> i64 {
        round_half_up(self.feels_like_c)
    }
}
