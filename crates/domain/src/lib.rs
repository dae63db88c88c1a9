//! Domain layer for Wayfare
//!
//! Contains the value objects, entities and pure calculations of the route
//! planner. This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use services::CostEstimator;
pub use value_objects::*;
