//! OpenWeatherMap API models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for a city, in metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// City name as reported by the service
    pub city: String,
    /// Temperature in °C
    pub temperature: f64,
    /// Apparent temperature in °C
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Short description of the first reported condition (e.g. "haze")
    pub description: String,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Observation time
    pub observed_at: DateTime<Utc>,
}

/// Raw `/weather` response
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub name: String,
    pub main: MainData,
    #[serde(default)]
    pub weather: Vec<ConditionData>,
    pub wind: WindData,
    /// Unix timestamp of the observation
    #[serde(default)]
    pub dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainData {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionData {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindData {
    pub speed: f64,
}

/// Error body returned alongside 4xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ApiResponse {
    /// Convert into [`CurrentConditions`], falling back to `requested_city`
    /// when the service omits the name
    pub fn into_conditions(self, requested_city: &str) -> CurrentConditions {
        let observed_at = self
            .dt
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        let city = if self.name.is_empty() {
            requested_city.to_string()
        } else {
            self.name
        };

        CurrentConditions {
            city,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            description: self
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_default(),
            wind_speed: self.wind.speed,
            observed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "weather": [{"id": 721, "main": "Haze", "description": "haze", "icon": "50d"},
                        {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 28.6, "feels_like": 31.2, "temp_min": 28.0, "temp_max": 29.0, "pressure": 1009, "humidity": 70},
            "wind": {"speed": 3.6, "deg": 270},
            "dt": 1760860800,
            "name": "Mumbai",
            "cod": 200
        }"#;
        let raw: ApiResponse = serde_json::from_str(json).unwrap();
        let conditions = raw.into_conditions("Mumbai");

        assert_eq!(conditions.city, "Mumbai");
        assert!((conditions.temperature - 28.6).abs() < f64::EPSILON);
        assert!((conditions.feels_like - 31.2).abs() < f64::EPSILON);
        assert_eq!(conditions.humidity, 70);
        assert_eq!(conditions.description, "haze");
        assert!((conditions.wind_speed - 3.6).abs() < f64::EPSILON);
        assert_eq!(conditions.observed_at.timestamp(), 1_760_860_800);
    }

    #[test]
    fn test_missing_name_and_conditions() {
        let json = r#"{
            "main": {"temp": 20.0, "feels_like": 19.0, "humidity": 50},
            "wind": {"speed": 1.0}
        }"#;
        let raw: ApiResponse = serde_json::from_str(json).unwrap();
        let conditions = raw.into_conditions("Pune");

        assert_eq!(conditions.city, "Pune");
        assert!(conditions.description.is_empty());
    }

    #[test]
    fn test_missing_main_is_error() {
        let json = r#"{"wind": {"speed": 1.0}, "name": "Mumbai"}"#;
        assert!(serde_json::from_str::<ApiResponse>(json).is_err());
    }
}
