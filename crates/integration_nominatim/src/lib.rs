//! Nominatim geocoding integration for Wayfare
//!
//! Resolves free-text addresses to coordinates via the
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org) search API.
//!
//! Every call issues exactly one HTTP request: there is no caching, retry
//! or client-side rate limiting. An empty result set is reported as
//! `Ok(None)`, never as an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_nominatim::{GeocodingClient, NominatimConfig, NominatimGeocodingClient};
//!
//! let client = NominatimGeocodingClient::new(&NominatimConfig::default())?;
//! if let Some(place) = client.geocode("Mumbai").await? {
//!     println!("{}, {}", place.latitude, place.longitude);
//! }
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GeocodingClient, NominatimGeocodingClient};
pub use config::NominatimConfig;
pub use error::GeocodingError;
pub use models::GeocodedPlace;
