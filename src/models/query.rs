//! Inbound query model

use crate::error::WeatherError;
use serde::{Deserialize, Serialize};

/// Whether the caller asked about current conditions or a future forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Current,
    Forecast,
}

/// One structured weather question, as extracted by the orchestration layer
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    /// Free-text place name, already trimmed
    pub location: String,
    pub intent: Intent,
    /// Requested forecast horizon in calendar days; the service default
    /// applies when absent. Ignored for current-conditions queries.
    pub horizon_days: Option<u32>,
}

impl WeatherQuery {
    /// Build a validated query from the raw inbound fields.
    ///
    /// Fails with `MalformedQuery` when the location is empty after trimming
    /// or a zero-day horizon is requested.
    pub fn new(
        location: &str,
        intent: Intent,
        horizon_days: Option<u32>,
    ) -> Result<Self, WeatherError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::malformed("location must not be empty"));
        }
        if horizon_days == Some(0) {
            return Err(WeatherError::malformed(
                "forecast horizon must be at least 1 day",
            ));
        }

        Ok(Self {
            location: location.to_string(),
            intent,
            horizon_days,
        })
    }

    /// Build a query from the wire shape used by the orchestration layer
    pub fn from_parts(
        location: &str,
        forecast: bool,
        days: Option<u32>,
    ) -> Result<Self, WeatherError> {
        let intent = if forecast {
            Intent::Forecast
        } else {
            Intent::Current
        };
        Self::new(location, intent, days)
    }
}
