//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber for the process.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
