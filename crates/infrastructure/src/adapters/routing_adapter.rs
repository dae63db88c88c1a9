//! Routing adapter - Implements RoutingPort using integration_routing

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{Coordinate, Distance, DomainError, RouteSummary, RoutesFound};
use integration_routing::{
    EngineRoute, LatLng, OsrmConfig, OsrmRoutingClient, RoutingClient, RoutingError,
};
use tracing::{debug, instrument};

/// Adapter for road routing using an OSRM server
#[derive(Debug)]
pub struct RoutingAdapter {
    client: OsrmRoutingClient,
}

impl RoutingAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(&OsrmConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: &OsrmConfig) -> Result<Self, ApplicationError> {
        let client = OsrmRoutingClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration routing error to application error
    fn map_error(err: RoutingError) -> ApplicationError {
        match err {
            RoutingError::ConnectionFailed(e) | RoutingError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            RoutingError::Timeout => {
                ApplicationError::ExternalService("Routing request timed out".into())
            },
            RoutingError::ParseError(e) => ApplicationError::Internal(e),
            RoutingError::NoRoute(message) => ApplicationError::NotFound(message),
            RoutingError::InvalidQuery { code, message } => {
                ApplicationError::InvalidOperation(format!("{code}: {message}"))
            },
            RoutingError::NotEnoughWaypoints(count) => ApplicationError::InvalidOperation(
                format!("At least two waypoints are required, got {count}"),
            ),
            RoutingError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    fn to_summary(route: EngineRoute) -> Result<RouteSummary, DomainError> {
        let geometry = route
            .geometry
            .iter()
            .map(|point| Coordinate::new(point.lat, point.lng))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(
            RouteSummary::new(Distance::from_meters(route.distance_meters), route.duration_secs)
                .with_geometry(geometry),
        )
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    async fn find_routes(
        &self,
        waypoints: &[Coordinate],
        alternatives: bool,
    ) -> Result<RoutesFound, ApplicationError> {
        let points: Vec<LatLng> = waypoints
            .iter()
            .map(|c| LatLng::new(c.latitude(), c.longitude()))
            .collect();

        let routes = self
            .client
            .route(&points, alternatives)
            .await
            .map_err(Self::map_error)?;

        debug!(count = routes.len(), "Routes received");

        let summaries = routes
            .into_iter()
            .map(Self::to_summary)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RoutesFound::new(summaries)?)
    }
}
