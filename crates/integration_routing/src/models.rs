//! OSRM request/response models

use serde::{Deserialize, Serialize};

/// A waypoint or geometry vertex in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl LatLng {
    /// Create a new point
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One route as computed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRoute {
    /// Total distance in meters
    pub distance_meters: f64,
    /// Estimated duration in seconds
    pub duration_secs: f64,
    /// Full-resolution path
    pub geometry: Vec<LatLng>,
}

/// Raw `route` service response
#[derive(Debug, Deserialize)]
pub(crate) struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRoute {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub geometry: Option<OsrmGeometry>,
}

/// GeoJSON LineString; coordinates are `[lon, lat]`
#[derive(Debug, Deserialize)]
pub(crate) struct OsrmGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl From<OsrmRoute> for EngineRoute {
    fn from(raw: OsrmRoute) -> Self {
        let geometry = raw
            .geometry
            .map(|g| {
                g.coordinates
                    .into_iter()
                    .map(|[lon, lat]| LatLng::new(lat, lon))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            distance_meters: raw.distance,
            duration_secs: raw.duration,
            geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_is_swapped_to_lat_lng() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 150000.0,
                "duration": 9000.0,
                "geometry": {"type": "LineString", "coordinates": [[72.8777, 19.076], [73.8567, 18.5204]]}
            }]
        }"#;
        let raw: OsrmResponse = serde_json::from_str(json).unwrap();
        let route = EngineRoute::from(raw.routes.into_iter().next().unwrap());
        assert_eq!(route.geometry[0], LatLng::new(19.076, 72.8777));
        assert_eq!(route.geometry[1], LatLng::new(18.5204, 73.8567));
        assert!((route.distance_meters - 150_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_route_without_geometry() {
        let json = r#"{"code": "Ok", "routes": [{"distance": 10.0, "duration": 2.0}]}"#;
        let raw: OsrmResponse = serde_json::from_str(json).unwrap();
        let route = EngineRoute::from(raw.routes.into_iter().next().unwrap());
        assert!(route.geometry.is_empty());
    }

    #[test]
    fn test_error_response_parses() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;
        let raw: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.code, "NoRoute");
        assert!(raw.routes.is_empty());
        assert_eq!(raw.message.as_deref(), Some("Impossible route between points"));
    }
}
