//! Indonesian weather message rendering.
//!
//! A post is one of four sentence templates, chosen by the time-of-day
//! bucket of the observation, with the condition phrase and temperature
//! filled in.

use chrono::{NaiveDateTime, Timelike};

use crate::{CurrentWeather, WeatherError};

/// Fallback phrase for weather codes not in the lookup table.
const FALLBACK_CONDITION: &str = "weather";

/// Accepted observation timestamp layouts. Open-Meteo omits the seconds.
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Time-of-day bucket used to pick a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Pagi,
    Siang,
    Sore,
    Malam,
}

impl TimeOfDay {
    /// Bucket an hour of day: [5,12) pagi, [12,16) siang, [16,19) sore,
    /// everything else (early morning included) malam.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Pagi,
            12..=15 => TimeOfDay::Siang,
            16..=18 => TimeOfDay::Sore,
            _ => TimeOfDay::Malam,
        }
    }
}

/// Short Indonesian phrase for a WMO weather interpretation code.
///
/// Unknown codes fall back to a generic placeholder rather than failing;
/// an unmapped code must never block a post.
pub fn condition_phrase(code: i64) -> &'static str {
    match code {
        0 => "cerah",
        1 => "sebagian besar cerah",
        2 => "berawan sebagian",
        3 => "berawan",
        45 | 48 => "berkabut",
        51 => "gerimis ringan",
        53 => "gerimis sedang",
        55 => "gerimis lebat",
        61 => "hujan ringan",
        63 => "hujan sedang",
        65 => "hujan lebat",
        80 => "hujan lokal",
        95 => "badai petir",
        99 => "badai petir hebat",
        _ => FALLBACK_CONDITION,
    }
}

/// Render the post text for an observation and location name.
///
/// The template follows the observation's local hour, not the posting
/// time.
pub fn render(current: &CurrentWeather, location_name: &str) -> Result<String, WeatherError> {
    let hour = observed_hour(&current.time)
        .ok_or_else(|| WeatherError::InvalidTimestamp(current.time.clone()))?;
    let cond = condition_phrase(current.weather_code);
    let temp = current.temperature;

    let text = match TimeOfDay::from_hour(hour) {
        TimeOfDay::Pagi => {
            format!("Pagi ini di {location_name} cuaca {cond}, sekitar {temp}°C.")
        }
        TimeOfDay::Siang => {
            format!("Siang hari di {location_name} dengan {cond} dan suhu sekitar {temp}°C.")
        }
        TimeOfDay::Sore => {
            format!("Sore di {location_name}, {cond} dengan temperature {temp}°C.")
        }
        TimeOfDay::Malam => {
            format!("Malam di {location_name}, keadaan {cond} dengan suhu {temp}°C.")
        }
    };
    Ok(text)
}

fn observed_hour(time: &str) -> Option<u32> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(time, format).ok())
        .map(|dt| dt.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn observation(temperature: f64, weather_code: i64, time: &str) -> CurrentWeather {
        CurrentWeather {
            temperature,
            weather_code,
            time: time.to_string(),
        }
    }

    #[test_case(0, TimeOfDay::Malam; "midnight")]
    #[test_case(4, TimeOfDay::Malam; "pre-dawn")]
    #[test_case(5, TimeOfDay::Pagi; "dawn boundary")]
    #[test_case(11, TimeOfDay::Pagi; "late morning")]
    #[test_case(12, TimeOfDay::Siang; "noon boundary")]
    #[test_case(15, TimeOfDay::Siang; "mid afternoon")]
    #[test_case(16, TimeOfDay::Sore; "evening boundary")]
    #[test_case(18, TimeOfDay::Sore; "late evening")]
    #[test_case(19, TimeOfDay::Malam; "night boundary")]
    #[test_case(23, TimeOfDay::Malam; "late night")]
    fn test_hour_buckets(hour: u32, expected: TimeOfDay) {
        assert_eq!(TimeOfDay::from_hour(hour), expected);
    }

    #[test]
    fn test_known_condition_codes() {
        assert_eq!(condition_phrase(0), "cerah");
        assert_eq!(condition_phrase(45), "berkabut");
        assert_eq!(condition_phrase(48), "berkabut");
        assert_eq!(condition_phrase(99), "badai petir hebat");
    }

    #[test]
    fn test_unknown_condition_code_falls_back() {
        assert_eq!(condition_phrase(9999), "weather");
        assert_eq!(condition_phrase(-1), "weather");
    }

    #[test]
    fn test_render_morning_template() {
        let text = render(&observation(25.0, 0, "2024-06-01T08:00"), "Jakarta").unwrap();
        assert_eq!(text, "Pagi ini di Jakarta cuaca cerah, sekitar 25°C.");
    }

    #[test]
    fn test_render_midday_template() {
        let text = render(&observation(31.5, 2, "2024-06-01T12:00"), "Jakarta").unwrap();
        assert_eq!(
            text,
            "Siang hari di Jakarta dengan berawan sebagian dan suhu sekitar 31.5°C."
        );
    }

    #[test]
    fn test_render_evening_template() {
        let text = render(&observation(29.0, 61, "2024-06-01T17:00"), "Jakarta").unwrap();
        assert_eq!(text, "Sore di Jakarta, hujan ringan dengan temperature 29°C.");
    }

    #[test]
    fn test_render_night_template() {
        let text = render(&observation(24.0, 95, "2024-06-01T20:00"), "Jakarta").unwrap();
        assert_eq!(
            text,
            "Malam di Jakarta, keadaan badai petir dengan suhu 24°C."
        );
    }

    #[test]
    fn test_render_accepts_seconds_in_timestamp() {
        let text = render(&observation(25.0, 0, "2024-06-01T08:00:00"), "Jakarta").unwrap();
        assert!(text.starts_with("Pagi ini di Jakarta"));
    }

    #[test]
    fn test_render_unknown_code_uses_fallback() {
        let text = render(&observation(25.0, 9999, "2024-06-01T08:00"), "Jakarta").unwrap();
        assert_eq!(text, "Pagi ini di Jakarta cuaca weather, sekitar 25°C.");
    }

    #[test]
    fn test_render_invalid_timestamp() {
        let result = render(&observation(25.0, 0, "yesterday-ish"), "Jakarta");
        assert!(matches!(result, Err(WeatherError::InvalidTimestamp(_))));
    }
}
