//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod distance;
mod humidity;
mod money;
mod wind_speed;

pub use coordinate::{Coordinate, InvalidCoordinates};
pub use distance::Distance;
pub use humidity::Humidity;
pub use money::{DEFAULT_CURRENCY_SYMBOL, Money};
pub use wind_speed::WindSpeed;
