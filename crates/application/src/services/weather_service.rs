//! Periodic weather refresh
//!
//! Fetches current conditions for one configured city and writes them into
//! a shared display panel. Failures are logged and the panel keeps its
//! previous contents until the next tick.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::WeatherSnapshot;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

use crate::error::ApplicationError;
use crate::ports::WeatherPort;

/// Refresh period used unless configured otherwise (10 minutes)
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(600);

/// Panel shared between the refresher and whoever displays it
pub type SharedWeatherPanel = Arc<RwLock<WeatherPanel>>;

/// Display fields of the weather popup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeatherPanel {
    /// "Weather in <city>"
    pub header: String,
    /// Rounded temperature, e.g. "29°"
    pub temperature: String,
    /// "Feels Like: 31°"
    pub feels_like: String,
    /// Condition text from the provider
    pub description: String,
    /// Relative humidity in percent, number only
    pub humidity: String,
    /// Wind speed in km/h with one decimal, number only
    pub wind: String,
    /// Whether the popup is shown
    pub visible: bool,
    /// Observation time of the displayed data
    pub updated_at: Option<DateTime<Utc>>,
}

impl WeatherPanel {
    /// Create an empty, hidden panel behind a lock
    #[must_use]
    pub fn shared() -> SharedWeatherPanel {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Overwrite every field from `snapshot` and show the panel
    pub fn apply(&mut self, city: &str, snapshot: &WeatherSnapshot) {
        self.header = format!("Weather in {city}");
        self.temperature = format!("{}°", snapshot.rounded_temperature());
        self.feels_like = format!("Feels Like: {}°", snapshot.rounded_feels_like());
        self.description.clone_from(&snapshot.description);
        self.humidity = snapshot.humidity.percent().to_string();
        self.wind = snapshot.wind_speed.display_kph();
        self.visible = true;
        self.updated_at = Some(snapshot.observed_at);
    }
}

/// Keeps a [`WeatherPanel`] up to date for one city
pub struct WeatherService {
    port: Arc<dyn WeatherPort>,
    city: String,
    interval: Duration,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService")
            .field("city", &self.city)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a refresher for `city` with the default interval
    #[must_use]
    pub fn new(port: Arc<dyn WeatherPort>, city: impl Into<String>) -> Self {
        Self {
            port,
            city: city.into(),
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Refresh every `interval` instead
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Configured city
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Refresh period
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch once and update `panel`
    ///
    /// # Errors
    ///
    /// Returns the port error; the panel is left untouched in that case.
    #[instrument(skip(self, panel), fields(city = %self.city))]
    pub async fn refresh(&self, panel: &RwLock<WeatherPanel>) -> Result<WeatherSnapshot, ApplicationError> {
        match self.port.current_weather(&self.city).await {
            Ok(snapshot) => {
                panel.write().apply(&self.city, &snapshot);
                debug!(
                    temperature = snapshot.temperature_c,
                    wind_kph = snapshot.wind_speed.kilometers_per_hour(),
                    "Weather panel updated"
                );
                Ok(snapshot)
            },
            Err(e) => {
                error!(error = %e, retryable = e.is_retryable(), "Error fetching weather data");
                Err(e)
            },
        }
    }

    /// Refresh immediately, then every interval, until `shutdown` turns true
    /// or its sender is dropped
    ///
    /// A slow request delays the following tick rather than overlapping it.
    pub async fn run(&self, panel: SharedWeatherPanel, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(city = %self.city, interval_secs = self.interval.as_secs(), "Weather refresher started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Already logged; the next tick retries
                    let _ = self.refresh(&panel).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(city = %self.city, "Weather refresher stopped");
    }
}
