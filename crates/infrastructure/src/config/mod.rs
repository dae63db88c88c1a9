//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `integrations`: Weather panel and API key
//! - `map`: Initial map view, tile source and pricing
//!
//! Geocoding and routing sections deserialize straight into the integration
//! crates' config types; logging uses the telemetry module's config.

mod integrations;
mod map;

use std::path::Path;

use integration_nominatim::NominatimConfig;
use integration_routing::OsrmConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use integrations::WeatherAppConfig;
pub use map::{GeoPointConfig, MapAppConfig, PricingConfig};

use crate::telemetry::LoggingConfig;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "WAYFARE";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Nominatim address lookup
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// OSRM routing engine
    #[serde(default)]
    pub routing: OsrmConfig,

    /// Weather panel
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Initial map view
    #[serde(default)]
    pub map: MapAppConfig,

    /// Cost tariff
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from environment and an explicit file
    ///
    /// With `None`, a `config.*` file in the working directory is used if
    /// present. An explicit path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., WAYFARE_WEATHER__API_KEY)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// A missing weather key is not an error; it only disables the panel.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding.validate()?;
        self.routing.validate()?;
        self.weather.validate()?;
        self.map.validate()?;
        self.pricing
            .to_estimator()
            .map_err(|e| format!("pricing: {e}"))?;
        self.logging.validate()?;

        if !self.weather.has_api_key() {
            warn!(
                "No weather API key configured (set {ENV_PREFIX}_WEATHER__API_KEY); weather panel disabled"
            );
        }
        Ok(())
    }
}
