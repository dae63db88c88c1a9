//! Routing engine port
//!
//! Computes road routes through an ordered list of waypoints.

use async_trait::async_trait;
use domain::{Coordinate, RoutesFound};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for route computation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute routes through `waypoints` in order
    ///
    /// The first route is the engine's preferred one; when `alternatives`
    /// is set, any alternatives the engine finds follow it. An engine
    /// that finds no path reports `ApplicationError::NotFound`.
    async fn find_routes(
        &self,
        waypoints: &[Coordinate],
        alternatives: bool,
    ) -> Result<RoutesFound, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn RoutingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RoutingPort>();
    }
}
