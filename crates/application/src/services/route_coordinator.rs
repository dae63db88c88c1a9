//! Route search coordination
//!
//! Takes a start and end address through geocoding, marker placement and
//! routing, then renders distance and cost into the map session.

use std::fmt;
use std::sync::Arc;

use domain::{Coordinate, CostEstimator, Distance, Money, RoutesFound};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, RoutingPort};
use crate::services::map_shell::{MapSession, Marker, MarkerKind, RoutingControl, RoutingOptions};

/// Notice shown when either address has no geocoding match
pub const LOCATION_NOT_FOUND_NOTICE: &str = "Unable to find one or both locations.";

/// Where a search currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No search in flight
    #[default]
    Idle,
    /// Waiting for both addresses to resolve
    Geocoding,
    /// Markers placed, waiting for the routing engine
    RoutesPending,
    /// Distance and cost are displayed
    Rendered,
}

/// One end of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The start address
    Start,
    /// The end address
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// What a rendered search produced
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    /// All routes, primary first
    pub routes: RoutesFound,
    /// Primary route distance
    pub distance: Distance,
    /// Cost of the primary route
    pub cost: Money,
}

impl RouteReport {
    /// Distance as shown in the results panel
    #[must_use]
    pub fn distance_text(&self) -> String {
        self.distance.to_string()
    }

    /// Cost as shown in the results panel
    #[must_use]
    pub fn cost_text(&self) -> String {
        self.cost.to_string()
    }

    /// Number of routes the engine returned
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Distances of the alternative routes, in engine order
    #[must_use]
    pub fn alternative_distances(&self) -> Vec<Distance> {
        self.routes
            .alternatives()
            .iter()
            .map(|r| r.total_distance)
            .collect()
    }
}

/// Result of a submitted search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Routes were found and rendered
    Rendered(RouteReport),
    /// At least one address had no match; routing was not attempted
    LocationNotFound {
        /// Endpoints that did not resolve
        missing: Vec<Endpoint>,
    },
}

/// Drives a route search against a [`MapSession`]
pub struct RouteCoordinator {
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
    estimator: CostEstimator,
    routing_options: RoutingOptions,
    state: SearchState,
}

impl fmt::Debug for RouteCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteCoordinator")
            .field("estimator", &self.estimator)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RouteCoordinator {
    /// Create a coordinator with the default tariff and routing options
    #[must_use]
    pub fn new(geocoder: Arc<dyn GeocodingPort>, router: Arc<dyn RoutingPort>) -> Self {
        Self {
            geocoder,
            router,
            estimator: CostEstimator::default(),
            routing_options: RoutingOptions::default(),
            state: SearchState::Idle,
        }
    }

    /// Use a different tariff
    #[must_use]
    pub fn with_cost_estimator(mut self, estimator: CostEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Use different routing control options
    #[must_use]
    pub fn with_routing_options(mut self, options: RoutingOptions) -> Self {
        self.routing_options = options;
        self
    }

    /// Current search state
    #[must_use]
    pub const fn state(&self) -> SearchState {
        self.state
    }

    /// Tariff in use
    #[must_use]
    pub const fn cost_estimator(&self) -> &CostEstimator {
        &self.estimator
    }

    /// Run a search from `start` to `end`
    ///
    /// The previous search's markers and routing control are removed first.
    /// An address without a match is not an error: it yields
    /// [`SearchOutcome::LocationNotFound`] and a notice on the session.
    ///
    /// # Errors
    ///
    /// Returns an error if geocoding or routing fails. A notice is recorded
    /// on the session and the state returns to [`SearchState::Idle`].
    #[instrument(skip(self, session))]
    pub async fn submit(
        &mut self,
        session: &mut MapSession,
        start: &str,
        end: &str,
    ) -> Result<SearchOutcome, ApplicationError> {
        session.clear_search();
        self.state = SearchState::Geocoding;

        let (start_result, end_result) =
            futures::join!(self.geocoder.geocode(start), self.geocoder.geocode(end));

        let (start_coord, end_coord) = match (start_result, end_result) {
            (Ok(s), Ok(e)) => (s, e),
            (Err(e), _) | (_, Err(e)) => {
                self.fail(session, format!("Geocoding failed: {e}"));
                return Err(e);
            },
        };

        let (Some(start_coord), Some(end_coord)) = (start_coord, end_coord) else {
            let missing: Vec<Endpoint> = [
                (Endpoint::Start, start_coord.is_none()),
                (Endpoint::End, end_coord.is_none()),
            ]
            .into_iter()
            .filter_map(|(endpoint, is_missing)| is_missing.then_some(endpoint))
            .collect();

            warn!(?missing, "Location lookup returned no match");
            self.fail(session, LOCATION_NOT_FOUND_NOTICE);
            return Ok(SearchOutcome::LocationNotFound { missing });
        };

        session.add_marker(Marker::new(
            MarkerKind::Start,
            start_coord,
            format!("Start: {start}"),
        ));
        session.add_marker(Marker::new(MarkerKind::End, end_coord, format!("End: {end}")));
        session.set_routing_control(RoutingControl::new(
            vec![start_coord, end_coord],
            self.routing_options.clone(),
        ));
        self.state = SearchState::RoutesPending;

        self.route_active_control(session)
            .await
            .map(SearchOutcome::Rendered)
    }

    /// Move waypoint `index` of the active route and recompute in place
    ///
    /// Markers are left untouched; the results panel is re-rendered.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if no route is active, a domain validation
    /// error if `index` is out of range, or the routing error if
    /// recomputation fails.
    #[instrument(skip(self, session))]
    pub async fn drag_waypoint(
        &mut self,
        session: &mut MapSession,
        index: usize,
        coordinate: Coordinate,
    ) -> Result<RouteReport, ApplicationError> {
        let control = session.routing_control_mut().ok_or_else(|| {
            ApplicationError::InvalidOperation("no active route to edit".to_string())
        })?;
        control.set_waypoint(index, coordinate)?;

        self.state = SearchState::RoutesPending;
        self.route_active_control(session).await
    }

    async fn route_active_control(
        &mut self,
        session: &mut MapSession,
    ) -> Result<RouteReport, ApplicationError> {
        let Some(control) = session.routing_control() else {
            self.state = SearchState::Idle;
            return Err(ApplicationError::InvalidOperation(
                "no routing control installed".to_string(),
            ));
        };
        let waypoints = control.waypoints().to_vec();
        let alternatives = control.options().show_alternatives;

        let routes = match self.router.find_routes(&waypoints, alternatives).await {
            Ok(routes) => routes,
            Err(e) => {
                Self::drop_route(session);
                self.fail(session, format!("Routing failed: {e}"));
                return Err(e);
            },
        };

        let distance = routes.primary().total_distance;
        let cost = match self.estimator.cost_for(distance) {
            Ok(cost) => cost,
            Err(e) => {
                Self::drop_route(session);
                self.fail(session, format!("Routing failed: {e}"));
                return Err(e.into());
            },
        };

        info!(count = routes.len(), "Number of routes");
        for (i, route) in routes.all().iter().enumerate() {
            info!("Route {}: {}", i + 1, route.total_distance);
        }

        session
            .results_mut()
            .show(distance.to_string(), cost.to_string());
        if let Some(control) = session.routing_control_mut() {
            control.set_routes(routes.clone());
        }
        self.state = SearchState::Rendered;
        debug!(%distance, %cost, "Rendered route summary");

        Ok(RouteReport {
            routes,
            distance,
            cost,
        })
    }

    /// Remove the control and its summary; markers stay in place
    fn drop_route(session: &mut MapSession) {
        session.remove_routing_control();
        session.results_mut().clear();
    }

    fn fail(&mut self, session: &mut MapSession, notice: impl Into<String>) {
        session.push_notice(notice);
        self.state = SearchState::Idle;
    }
}
