//! Nominatim response models

use serde::{Deserialize, Serialize};

use crate::error::GeocodingError;

/// A resolved address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Full name as reported by Nominatim, if present
    pub display_name: Option<String>,
}

/// Raw search hit; Nominatim encodes coordinates as strings
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimResult {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl TryFrom<&NominatimResult> for GeocodedPlace {
    type Error = GeocodingError;

    fn try_from(raw: &NominatimResult) -> Result<Self, Self::Error> {
        let latitude: f64 = raw
            .lat
            .trim()
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid latitude: {}", raw.lat)))?;
        let longitude: f64 = raw
            .lon
            .trim()
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid longitude: {}", raw.lon)))?;

        Ok(Self {
            latitude,
            longitude,
            display_name: raw.display_name.clone(),
        })
    }
}
