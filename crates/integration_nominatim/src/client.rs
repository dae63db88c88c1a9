//! Nominatim geocoding client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::config::NominatimConfig;
use crate::error::GeocodingError;
use crate::models::{GeocodedPlace, NominatimResult};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-form address to coordinates
    ///
    /// Returns `Ok(None)` when the service has no match for the address.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>, GeocodingError>;
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn search_params(&self, address: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("q", address.to_string()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }
        params
    }

    fn map_send_error(e: &reqwest::Error) -> GeocodingError {
        if e.is_timeout() {
            GeocodingError::Timeout
        } else {
            GeocodingError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>, GeocodingError> {
        if address.trim().is_empty() {
            return Err(GeocodingError::EmptyAddress);
        }

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        debug!(%address, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&self.search_params(address))
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let Some(first) = results.first() else {
            debug!(%address, "No geocoding match");
            return Ok(None);
        };

        let place = GeocodedPlace::try_from(first)?;
        debug!(%address, lat = place.latitude, lon = place.longitude, "Geocoded address");
        Ok(Some(place))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_filter(filter: &str) -> NominatimGeocodingClient {
        let config = NominatimConfig {
            country_filter: filter.to_string(),
            ..NominatimConfig::default()
        };
        NominatimGeocodingClient::new(&config).expect("client creation should succeed")
    }

    #[test]
    fn test_search_params_without_filter() {
        let params = client_with_filter("").search_params("Pune");
        assert!(params.contains(&("format", "json".to_string())));
        assert!(params.contains(&("q", "Pune".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "countrycodes"));
    }

    #[test]
    fn test_search_params_with_filter() {
        let params = client_with_filter("in").search_params("Pune");
        assert!(params.contains(&("countrycodes", "in".to_string())));
    }

    #[tokio::test]
    async fn test_blank_address_rejected_without_request() {
        let client = client_with_filter("");
        let result = client.geocode("   ").await;
        assert!(matches!(result, Err(GeocodingError::EmptyAddress)));
    }
}
