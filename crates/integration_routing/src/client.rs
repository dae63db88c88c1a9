//! OSRM routing client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::OsrmConfig;
use crate::error::RoutingError;
use crate::models::{EngineRoute, LatLng, OsrmResponse};

/// Trait for routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Compute routes through the given waypoints, in order
    ///
    /// The first route returned is the engine's preferred route. Alternatives,
    /// when requested and available, follow it.
    async fn route(
        &self,
        waypoints: &[LatLng],
        alternatives: bool,
    ) -> Result<Vec<EngineRoute>, RoutingError>;
}

/// OSRM-based routing client
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmRoutingClient {
    /// Create a new OSRM routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Build the `route` service URL for the waypoints
    ///
    /// OSRM expects `lon,lat` pairs separated by `;`.
    fn route_url(&self, waypoints: &[LatLng]) -> String {
        let coordinates = waypoints
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coordinates
        )
    }

    fn route_params(alternatives: bool) -> [(&'static str, &'static str); 4] {
        [
            ("alternatives", if alternatives { "true" } else { "false" }),
            ("overview", "full"),
            ("geometries", "geojson"),
            ("steps", "false"),
        ]
    }

    fn map_send_error(e: &reqwest::Error) -> RoutingError {
        if e.is_timeout() {
            RoutingError::Timeout
        } else {
            RoutingError::ConnectionFailed(e.to_string())
        }
    }

    fn map_engine_code(code: String, message: Option<String>) -> RoutingError {
        let message = message.unwrap_or_else(|| code.clone());
        match code.as_str() {
            "NoRoute" | "NoSegment" => RoutingError::NoRoute(message),
            _ => RoutingError::InvalidQuery { code, message },
        }
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    async fn route(
        &self,
        waypoints: &[LatLng],
        alternatives: bool,
    ) -> Result<Vec<EngineRoute>, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::NotEnoughWaypoints(waypoints.len()));
        }

        let url = self.route_url(waypoints);
        debug!(%url, alternatives, "Requesting routes");

        let response = self
            .client
            .get(&url)
            .query(&Self::route_params(alternatives))
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
        }

        // OSRM reports NoRoute/InvalidQuery with a 4xx status and a JSON body
        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;
        let parsed: OsrmResponse = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                RoutingError::ParseError(e.to_string())
            } else {
                RoutingError::RequestFailed(format!("HTTP {status}"))
            }
        })?;

        if parsed.code != "Ok" {
            warn!(code = %parsed.code, "Routing engine returned an error code");
            return Err(Self::map_engine_code(parsed.code, parsed.message));
        }
        if parsed.routes.is_empty() {
            return Err(RoutingError::NoRoute("engine returned no routes".to_string()));
        }

        let routes: Vec<EngineRoute> = parsed.routes.into_iter().map(EngineRoute::from).collect();
        debug!(count = routes.len(), "Received routes");
        Ok(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OsrmRoutingClient {
        OsrmRoutingClient::new(&OsrmConfig::for_testing("http://localhost:5000/"))
            .expect("client creation should succeed")
    }

    #[test]
    fn test_route_url_uses_lon_lat_order() {
        let url = client().route_url(&[LatLng::new(19.076, 72.8777), LatLng::new(18.5204, 73.8567)]);
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/driving/72.8777,19.076;73.8567,18.5204"
        );
    }

    #[test]
    fn test_route_params() {
        let params = OsrmRoutingClient::route_params(true);
        assert!(params.contains(&("alternatives", "true")));
        assert!(params.contains(&("overview", "full")));
        assert!(params.contains(&("geometries", "geojson")));

        let params = OsrmRoutingClient::route_params(false);
        assert!(params.contains(&("alternatives", "false")));
    }

    #[test]
    fn test_engine_code_mapping() {
        assert!(matches!(
            OsrmRoutingClient::map_engine_code("NoRoute".to_string(), None),
            RoutingError::NoRoute(_)
        ));
        assert!(matches!(
            OsrmRoutingClient::map_engine_code("NoSegment".to_string(), Some("x".to_string())),
            RoutingError::NoRoute(_)
        ));
        assert!(matches!(
            OsrmRoutingClient::map_engine_code("InvalidValue".to_string(), None),
            RoutingError::InvalidQuery { .. }
        ));
    }

    #[tokio::test]
    async fn test_single_waypoint_rejected() {
        let result = client().route(&[LatLng::new(19.0, 72.0)], true).await;
        assert!(matches!(result, Err(RoutingError::NotEnoughWaypoints(1))));
    }
}
