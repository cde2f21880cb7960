//! Weather collaborators for Awan: the Open-Meteo current-weather client
//! and the Indonesian message renderer.

mod client;
mod error;
mod message;

pub use client::{CurrentWeather, DEFAULT_BASE_URL, OpenMeteoClient};
pub use error::WeatherError;
pub use message::{TimeOfDay, condition_phrase, render};
