//! Routes returned by the routing engine

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Coordinate, Distance};

/// Aggregate metrics and geometry for one computed path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total distance along the path
    pub total_distance: Distance,
    /// Estimated travel time in seconds
    pub total_duration_secs: f64,
    /// Path geometry, start to end
    #[serde(default)]
    pub geometry: Vec<Coordinate>,
}

impl RouteSummary {
    /// Create a summary without geometry
    #[must_use]
    pub const fn new(total_distance: Distance, total_duration_secs: f64) -> Self {
        Self {
            total_distance,
            total_duration_secs,
            geometry: Vec::new(),
        }
    }

    /// Attach path geometry
    #[must_use]
    pub fn with_geometry(mut self, geometry: Vec<Coordinate>) -> Self {
        self.geometry = geometry;
        self
    }
}

/// The ordered result of one routing request
///
/// Index 0 is the primary route; the rest are alternatives in the order the
/// engine ranked them. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutesFound {
    routes: Vec<RouteSummary>,
}

impl RoutesFound {
    /// Wrap an engine result
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if `routes` is empty.
    pub fn new(routes: Vec<RouteSummary>) -> Result<Self, DomainError> {
        if routes.is_empty() {
            return Err(DomainError::validation(
                "routing result must contain at least one route",
            ));
        }
        Ok(Self { routes })
    }

    /// The primary (best-ranked) route
    #[must_use]
    pub fn primary(&self) -> &RouteSummary {
        // non-empty by construction
        &self.routes[0]
    }

    /// Routes after the primary one
    #[must_use]
    pub fn alternatives(&self) -> &[RouteSummary] {
        &self.routes[1..]
    }

    /// All routes, primary first
    #[must_use]
    pub fn all(&self) -> &[RouteSummary] {
        &self.routes
    }

    /// Total number of routes including the primary
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of alternatives
    #[must_use]
    pub fn alternative_count(&self) -> usize {
        self.routes.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(km: f64) -> RouteSummary {
        RouteSummary::new(Distance::from_kilometers(km), 3600.0)
    }

    #[test]
    fn rejects_empty_result() {
        assert!(RoutesFound::new(Vec::new()).is_err());
    }

    #[test]
    fn primary_and_alternatives() {
        let found = RoutesFound::new(vec![route(150.0), route(162.0), route(170.5)])
            .expect("non-empty");
        assert!((found.primary().total_distance.kilometers() - 150.0).abs() < 1e-9);
        assert_eq!(found.alternative_count(), 2);
        assert_eq!(found.alternatives().len(), 2);
        assert_eq!(found.len(), 3);
        assert!(!found.is_empty());
    }

    #[test]
    fn single_route_has_no_alternatives() {
        let found = RoutesFound::new(vec![route(10.0)]).expect("non-empty");
        assert_eq!(found.alternative_count(), 0);
        assert!(found.alternatives().is_empty());
    }

    #[test]
    fn geometry_is_attached() {
        let r = route(1.0).with_geometry(vec![Coordinate::mumbai()]);
        assert_eq!(r.geometry.len(), 1);
    }
}
