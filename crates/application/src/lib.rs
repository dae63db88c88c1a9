//! Application layer - Use cases and orchestration
//!
//! Contains the route-search coordinator, the weather refresher and the
//! headless map session they mutate, plus the port definitions that
//! infrastructure adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
