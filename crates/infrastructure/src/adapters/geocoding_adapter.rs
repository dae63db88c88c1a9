//! Geocoding adapter - Implements GeocodingPort using integration_nominatim

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::{Coordinate, DomainError};
use integration_nominatim::{
    GeocodedPlace, GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter for address lookup using Nominatim
#[derive(Debug)]
pub struct GeocodingAdapter {
    client: NominatimGeocodingClient,
}

impl GeocodingAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(&NominatimConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration geocoding error to application error
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::ConnectionFailed(e) | GeocodingError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            GeocodingError::Timeout => {
                ApplicationError::ExternalService("Geocoding request timed out".into())
            },
            GeocodingError::ParseError(e) => ApplicationError::Internal(e),
            GeocodingError::EmptyAddress => {
                ApplicationError::InvalidOperation("Address must not be empty".into())
            },
            GeocodingError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    fn to_coordinate(place: &GeocodedPlace) -> Result<Coordinate, ApplicationError> {
        Coordinate::new(place.latitude, place.longitude)
            .map_err(|e| ApplicationError::Domain(DomainError::from(e)))
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ApplicationError> {
        let place = match self.client.geocode(address).await {
            Ok(place) => place,
            // A blank field can never match anything
            Err(GeocodingError::EmptyAddress) => {
                debug!("Blank address treated as no match");
                return Ok(None);
            },
            Err(e) => {
                debug!(error = %e, "Geocoding failed");
                return Err(Self::map_error(e));
            },
        };

        place.as_ref().map(Self::to_coordinate).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_creation_succeeds() {
        assert!(GeocodingAdapter::new().is_ok());
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::RateLimitExceeded),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::Timeout),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::RequestFailed("HTTP 503".into())),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::ParseError("eof".into())),
            ApplicationError::Internal(_)
        ));
    }

    #[test]
    fn out_of_range_place_is_rejected() {
        let place = GeocodedPlace {
            latitude: 123.0,
            longitude: 0.0,
            display_name: None,
        };
        assert!(matches!(
            GeocodingAdapter::to_coordinate(&place),
            Err(ApplicationError::Domain(DomainError::InvalidCoordinates(_)))
        ));
    }

    #[tokio::test]
    async fn blank_address_is_no_match() {
        let adapter = GeocodingAdapter::new().unwrap();
        assert_eq!(adapter.geocode("  ").await.unwrap(), None);
    }
}
