//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod routing_adapter;
mod weather_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use routing_adapter::RoutingAdapter;
pub use weather_adapter::WeatherAdapter;
