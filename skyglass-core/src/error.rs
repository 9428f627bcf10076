//! Errors surfaced by weather queries.

use thiserror::Error;

use crate::{fixtures, location::LocationError};

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("OpenWeather rejected the configured API key")]
    InvalidCredential,

    #[error("OpenWeather request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("No OpenWeather API key configured")]
    MissingCredential,

    #[error("Location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),
}

impl WeatherError {
    /// Message shown to the user in place of the weather display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => format!("Invalid input: {msg}"),
            Self::NotFound(_) => "City not found".to_string(),
            Self::InvalidCredential => {
                "The OpenWeather API key was rejected. Check your configuration.".to_string()
            }
            Self::Upstream { status, .. } => {
                format!("Weather service error (HTTP {status}). Please try again later.")
            }
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Malformed(_) => "Failed to fetch weather data".to_string(),
            Self::MissingCredential => format!(
                "No weather data available without an API key. Demo cities: {}. \
                 Set OPENWEATHER_API_KEY or run `skyglass configure`.",
                fixtures::demo_city_names().join(", ")
            ),
            Self::LocationUnavailable(err) => match err {
                LocationError::PermissionDenied => {
                    "Location access was denied. Search by city name instead.".to_string()
                }
                LocationError::PositionUnavailable => {
                    "Your location could not be determined. Search by city name instead."
                        .to_string()
                }
            },
        }
    }

    /// Input errors are dropped silently instead of reaching the error state.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_lists_demo_cities() {
        let msg = WeatherError::MissingCredential.user_message();
        for city in ["London", "New York", "Tokyo", "Moscow"] {
            assert!(msg.contains(city), "{msg}");
        }
        // Also reached by coordinate and location queries.
        assert!(!msg.contains("City not found"), "{msg}");
    }

    #[test]
    fn location_errors_have_distinct_messages() {
        let denied = WeatherError::from(LocationError::PermissionDenied).user_message();
        let unavailable = WeatherError::from(LocationError::PositionUnavailable).user_message();
        assert!(denied.contains("denied"));
        assert!(unavailable.contains("could not be determined"));
    }

    #[test]
    fn only_invalid_input_is_silent() {
        assert!(WeatherError::InvalidInput("blank".into()).is_silent());
        assert!(!WeatherError::NotFound("x".into()).is_silent());
        assert!(!WeatherError::MissingCredential.is_silent());
    }

    #[test]
    fn not_found_message() {
        assert_eq!(WeatherError::NotFound("Atlantis".into()).user_message(), "City not found");
    }
}
