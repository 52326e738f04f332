//! Error types and handling for the `weatherbot` service

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the `weatherbot` service
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The inbound query is missing or carries invalid fields
    #[error("malformed query: {message}")]
    MalformedQuery { message: String },

    /// The place name could not be resolved to any location
    #[error("location not found: {query}")]
    LocationNotFound { query: String },

    /// The upstream provider rejected the request with HTTP 429
    #[error("weather provider rate limited")]
    ProviderRateLimited,

    /// Network failure, timeout, 5xx or undecodable upstream payload
    #[error("weather provider unavailable: {message}")]
    ProviderUnavailable { message: String },

    /// Configuration-related errors (startup only)
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Machine-readable failure taxonomy carried on a `WeatherReply`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedQuery,
    LocationNotFound,
    ProviderRateLimited,
    ProviderUnavailable,
}

impl WeatherError {
    /// Create a new malformed-query error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedQuery {
            message: message.into(),
        }
    }

    /// Create a new location-not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new provider-unavailable error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify this error for the reply envelope
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::MalformedQuery { .. } => ErrorKind::MalformedQuery,
            WeatherError::LocationNotFound { .. } => ErrorKind::LocationNotFound,
            WeatherError::ProviderRateLimited => ErrorKind::ProviderRateLimited,
            // Config failures surface to callers as provider unavailability
            WeatherError::ProviderUnavailable { .. } | WeatherError::Config { .. } => {
                ErrorKind::ProviderUnavailable
            }
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Never includes upstream status lines, URLs or response bodies; those
    /// stay in the `Display` impl for logging.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::MalformedQuery { message } => {
                format!("Invalid request: {message}")
            }
            WeatherError::LocationNotFound { query } => {
                format!(
                    "Sorry, I couldn't find a place called \"{query}\". \
                     Please check the spelling and try again."
                )
            }
            WeatherError::ProviderRateLimited => {
                "The weather service is handling too many requests right now. \
                 Please try again in a minute."
                    .to_string()
            }
            WeatherError::ProviderUnavailable { .. } => {
                "The weather service is temporarily unavailable. \
                 Please try again later."
                    .to_string()
            }
            WeatherError::Config { .. } => {
                "The weather service is not configured correctly.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let malformed = WeatherError::malformed("location is empty");
        assert!(matches!(malformed, WeatherError::MalformedQuery { .. }));

        let not_found = WeatherError::not_found("Nowhereville");
        assert!(matches!(not_found, WeatherError::LocationNotFound { .. }));

        let unavailable = WeatherError::unavailable("connect timeout");
        assert!(matches!(
            unavailable,
            WeatherError::ProviderUnavailable { .. }
        ));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            WeatherError::malformed("x").kind(),
            ErrorKind::MalformedQuery
        );
        assert_eq!(
            WeatherError::not_found("x").kind(),
            ErrorKind::LocationNotFound
        );
        assert_eq!(
            WeatherError::ProviderRateLimited.kind(),
            ErrorKind::ProviderRateLimited
        );
        assert_eq!(
            WeatherError::unavailable("x").kind(),
            ErrorKind::ProviderUnavailable
        );
        assert_eq!(
            WeatherError::config("x").kind(),
            ErrorKind::ProviderUnavailable
        );
    }

    #[test]
    fn test_user_messages_hide_upstream_detail() {
        let err = WeatherError::unavailable("HTTP 503 from https://api.openweathermap.org");
        let msg = err.user_message();
        assert!(msg.contains("temporarily unavailable"));
        assert!(!msg.contains("503"));
        assert!(!msg.contains("openweathermap"));

        let err = WeatherError::not_found("Nowhereville");
        assert!(err.user_message().contains("Nowhereville"));
    }
}
