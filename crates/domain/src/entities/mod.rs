//! Entities produced by the external services

mod route;
mod weather_snapshot;

pub use route::{RouteSummary, RoutesFound};
pub use weather_snapshot::WeatherSnapshot;
