//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the geocoding, routing and weather adapters, configuration
//! loading, logging setup and the HTML map export.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{AppConfig, MapAppConfig, PricingConfig, WeatherAppConfig};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
pub use templates::{TemplateEngine, TemplateError};
