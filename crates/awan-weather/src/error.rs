//! Error types for the weather collaborators.

use thiserror::Error;

/// Errors that can occur fetching or rendering weather.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The forecast endpoint returned a non-success status.
    #[error("weather API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response carried no current_weather block.
    #[error("response missing current_weather block")]
    MissingCurrentWeather,

    /// The observation timestamp could not be parsed.
    #[error("invalid observation timestamp: {0:?}")]
    InvalidTimestamp(String),
}
