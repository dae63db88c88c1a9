//! OSRM client configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OSRM routing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL of the OSRM HTTP API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Routing profile (e.g. "driving", "car", "bike")
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Request timeout in seconds
    ///
    /// Bounds how long a search may stay waiting for routes.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_profile() -> String {
    "driving".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile: default_profile(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration pointing at a test server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("routing base_url must not be empty".to_string());
        }
        if self.profile.is_empty() || self.profile.contains('/') {
            return Err(format!("invalid routing profile: {:?}", self.profile));
        }
        if self.timeout_secs == 0 {
            return Err("routing timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
