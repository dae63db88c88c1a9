//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{Humidity, WeatherSnapshot, WindSpeed};
use integration_weather::{
    CurrentConditions, OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for current conditions from OpenWeatherMap
#[derive(Debug)]
pub struct WeatherAdapter {
    client: OpenWeatherMapClient,
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::Timeout => {
                ApplicationError::ExternalService("Weather request timed out".into())
            },
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
            WeatherError::Unauthorized(e) => {
                ApplicationError::Configuration(format!("Weather API key rejected: {e}"))
            },
            WeatherError::CityNotFound(city) => {
                ApplicationError::NotFound(format!("City not found: {city}"))
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    /// Convert integration conditions to the domain snapshot
    fn to_snapshot(conditions: CurrentConditions) -> WeatherSnapshot {
        WeatherSnapshot {
            city: conditions.city,
            temperature_c: conditions.temperature,
            feels_like_c: conditions.feels_like,
            description: conditions.description,
            humidity: Humidity::from_percent(conditions.humidity),
            wind_speed: WindSpeed::from_meters_per_second(conditions.wind_speed),
            observed_at: conditions.observed_at,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, ApplicationError> {
        let conditions = self
            .client
            .current_by_city(city)
            .await
            .map_err(Self::map_error)?;

        let snapshot = Self::to_snapshot(conditions);
        debug!(
            temperature = snapshot.temperature_c,
            description = %snapshot.description,
            "Fetched current weather"
        );
        Ok(snapshot)
    }
}
