//! Relative humidity reported by the weather provider

use std::fmt;

use serde::{Deserialize, Serialize};

/// Relative humidity in whole percent, never above 100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Humidity(u8);

impl Humidity {
    /// Upper bound of the scale
    pub const MAX: u8 = 100;

    /// Readings above 100% are capped; providers occasionally report them
    #[must_use]
    pub const fn from_percent(percent: u8) -> Self {
        if percent > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(percent)
        }
    }

    /// Percentage as shown in the weather panel
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl From<u8> for Humidity {
    fn from(percent: u8) -> Self {
        Self::from_percent(percent)
    }
}

impl From<Humidity> for u8 {
    fn from(humidity: Humidity) -> Self {
        humidity.0
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
