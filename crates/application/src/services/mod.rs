//! Application services - Use case implementations

pub mod map_shell;
mod route_coordinator;
mod weather_service;

pub use map_shell::{
    DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL, Legend, LegendEntry, LegendPosition, LineStyle, MapSession, MapShellConfig, Marker,
    MarkerIcon, MarkerKind, ResultsPanel, RoutingControl, RoutingOptions, Sidebar, TileLayer,
    Viewport,
};
pub use route_coordinator::{
    Endpoint, LOCATION_NOT_FOUND_NOTICE, RouteCoordinator, RouteReport, SearchOutcome,
    SearchState,
};
pub use weather_service::{
    DEFAULT_REFRESH_INTERVAL, SharedWeatherPanel, WeatherPanel, WeatherService,
};
