//! Road routing integration for Wayfare
//!
//! Computes driving routes, including alternatives, via the
//! [OSRM](https://project-osrm.org) `route` service. This is the same engine
//! the Leaflet Routing Machine plugin talks to by default, so distances match
//! what a browser map would show.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_routing::{LatLng, OsrmConfig, OsrmRoutingClient, RoutingClient};
//!
//! let client = OsrmRoutingClient::new(&OsrmConfig::default())?;
//! let routes = client
//!     .route(&[LatLng::new(19.076, 72.8777), LatLng::new(18.5204, 73.8567)], true)
//!     .await?;
//! println!("{:.2} km", routes[0].distance_meters / 1000.0);
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{OsrmRoutingClient, RoutingClient};
pub use config::OsrmConfig;
pub use error::RoutingError;
pub use models::{EngineRoute, LatLng};
