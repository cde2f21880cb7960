//! Open-Meteo forecast client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::WeatherError;

/// The public Open-Meteo endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// A current-weather observation.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// WMO weather interpretation code.
    #[serde(rename = "weathercode")]
    pub weather_code: i64,
    /// Observation timestamp, ISO-8601 in the location's own timezone.
    pub time: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

/// Client for the Open-Meteo forecast API.
pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch the current weather for a coordinate pair.
    ///
    /// `timezone=auto` makes the observation timestamp local to the
    /// queried location, which is what the message templates key off.
    pub async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api { status, body });
        }

        let forecast: ForecastResponse = response.json().await?;
        let current = forecast
            .current_weather
            .ok_or(WeatherError::MissingCurrentWeather)?;

        debug!(
            temperature = current.temperature,
            code = current.weather_code,
            time = %current.time,
            "fetched current weather"
        );
        Ok(current)
    }
}
