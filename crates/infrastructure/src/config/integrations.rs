//! Integration configurations: Weather.
//!
//! Geocoding and routing reuse the integration crates' own config structs
//! directly; weather wraps its key in `SecretString` and adds the refresh
//! schedule.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Weather Configuration
// ==============================

/// Weather panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// OpenWeatherMap API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    ///
    /// Usually supplied as `WAYFARE_WEATHER__API_KEY`. Without it the
    /// weather panel is disabled.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// City whose conditions are shown
    #[serde(default = "default_weather_city")]
    pub city: String,

    /// Seconds between refreshes
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_city() -> String {
    "Mumbai".to_string()
}

const fn default_refresh_interval_secs() -> u64 {
    600
}

const fn default_weather_timeout() -> u64 {
    15
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            city: default_weather_city(),
            refresh_interval_secs: default_refresh_interval_secs(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl WeatherAppConfig {
    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Refresh period as a `Duration`
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Build the client configuration, or `None` when no key is set
    #[must_use]
    pub fn to_client_config(&self) -> Option<integration_weather::WeatherConfig> {
        if !self.has_api_key() {
            return None;
        }
        let api_key = self.api_key.as_ref()?.expose_secret().trim().to_string();

        Some(integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            api_key,
            timeout_secs: self.timeout_secs,
            ..Default::default()
        })
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("weather base_url must not be empty".to_string());
        }
        if self.city.trim().is_empty() {
            return Err("weather city must not be empty".to_string());
        }
        if self.refresh_interval_secs == 0 {
            return Err("weather refresh_interval_secs must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("weather timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
