//! Provider weather payloads, typed at the client boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at a location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Observation {
    /// When the provider took this observation
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Perceived temperature in Celsius
    pub feels_like_c: f64,
    /// Relative humidity percentage (0-100)
    pub humidity_pct: Option<u8>,
    /// Wind speed in m/s
    pub wind_speed_mps: Option<f64>,
    /// Atmospheric pressure in hPa
    pub pressure_hpa: Option<u32>,
    /// Human-readable condition text
    pub condition: String,
    /// UTC offset of the observed location, in seconds
    pub utc_offset_seconds: i32,
}

/// One forecast sample, typically on a 3-hour grid
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Provider condition code, used for dominance counting
    pub condition_code: u16,
    /// Human-readable condition text for the code
    pub condition: String,
    /// Probability of precipitation (0.0 - 1.0)
    pub precipitation_probability: f64,
}

/// A multi-day forecast series for one location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Forecast {
    /// UTC offset of the forecast location, in seconds
    pub utc_offset_seconds: i32,
    /// Samples ordered by timestamp ascending
    pub points: Vec<ForecastPoint>,
}
