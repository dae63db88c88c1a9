//! Geocoding service port
//!
//! Resolves free-text addresses to coordinates.

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address lookup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address to a coordinate
    ///
    /// Returns `Ok(None)` when the lookup service has no match. Transport
    /// and parse failures are errors.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ApplicationError>;
}
