//! Map shell and pricing configuration.

use application::services::{DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL, MapShellConfig};
use domain::{Coordinate, CostEstimator, DEFAULT_CURRENCY_SYMBOL, DomainError};
use domain::services::DEFAULT_RATE_PER_KM;
use serde::{Deserialize, Serialize};

// ==============================
// Map Configuration
// ==============================

/// Geographic point configuration (latitude/longitude pair)
///
/// Configured as inline table: `{ latitude = 19.076, longitude = 72.8777 }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPointConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoPointConfig {
    /// Convert to domain `Coordinate`
    ///
    /// # Errors
    ///
    /// Returns an error if either value is out of range.
    pub fn to_coordinate(self) -> Result<Coordinate, DomainError> {
        Ok(Coordinate::new(self.latitude, self.longitude)?)
    }
}

impl Default for GeoPointConfig {
    fn default() -> Self {
        let mumbai = Coordinate::mumbai();
        Self {
            latitude: mumbai.latitude(),
            longitude: mumbai.longitude(),
        }
    }
}

/// Initial map view and tile source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapAppConfig {
    /// Initial center
    #[serde(default)]
    pub center: GeoPointConfig,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Tile URL template
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Highest zoom level served by the tile server
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,

    /// Tile attribution HTML
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

const fn default_zoom() -> u8 {
    10
}

fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}

const fn default_max_zoom() -> u8 {
    19
}

fn default_attribution() -> String {
    DEFAULT_ATTRIBUTION.to_string()
}

impl Default for MapAppConfig {
    fn default() -> Self {
        Self {
            center: GeoPointConfig::default(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            max_zoom: default_max_zoom(),
            attribution: default_attribution(),
        }
    }
}

impl MapAppConfig {
    /// Build the map shell setup
    ///
    /// # Errors
    ///
    /// Returns an error if the center is out of range.
    pub fn to_shell_config(&self) -> Result<MapShellConfig, DomainError> {
        Ok(MapShellConfig {
            center: self.center.to_coordinate()?,
            zoom: self.zoom,
            tile_url: self.tile_url.clone(),
            max_zoom: self.max_zoom,
            attribution: self.attribution.clone(),
        })
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.center
            .to_coordinate()
            .map_err(|e| format!("map center: {e}"))?;
        if self.tile_url.trim().is_empty() {
            return Err("map tile_url must not be empty".to_string());
        }
        if self.zoom > self.max_zoom {
            return Err(format!(
                "map zoom {} exceeds max_zoom {}",
                self.zoom, self.max_zoom
            ));
        }
        Ok(())
    }
}

// ==============================
// Pricing Configuration
// ==============================

/// Travel cost tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Price per kilometre
    #[serde(default = "default_rate_per_km")]
    pub rate_per_km: f64,

    /// Symbol prefixed to amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

const fn default_rate_per_km() -> f64 {
    DEFAULT_RATE_PER_KM
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rate_per_km: default_rate_per_km(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl PricingConfig {
    /// Build the cost estimator
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is not positive.
    pub fn to_estimator(&self) -> Result<CostEstimator, DomainError> {
        CostEstimator::new(self.rate_per_km, self.currency_symbol.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_defaults_center_on_mumbai() {
        let shell = MapAppConfig::default().to_shell_config().unwrap();
        assert_eq!(shell, MapShellConfig::default());
    }

    #[test]
    fn invalid_center_rejected() {
        let config = MapAppConfig {
            center: GeoPointConfig {
                latitude: 91.0,
                longitude: 0.0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.to_shell_config().is_err());
    }

    #[test]
    fn zoom_above_max_rejected() {
        let config = MapAppConfig {
            zoom: 20,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pricing_defaults() {
        let estimator = PricingConfig::default().to_estimator().unwrap();
        assert_eq!(estimator, CostEstimator::default());
    }

    #[test]
    fn non_positive_rate_rejected() {
        let config = PricingConfig {
            rate_per_km: 0.0,
            ..Default::default()
        };
        assert!(config.to_estimator().is_err());
    }
}
