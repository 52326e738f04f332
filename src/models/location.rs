//! Geocoded location model

use serde::{Deserialize, Serialize};

/// A place resolved to coordinates by the provider's geocoding lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoLocation {
    /// Resolved place name (city, town, ...)
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2), when the provider reports one
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Offset of the location's timezone from UTC, in seconds.
    ///
    /// The geocoding lookup does not report it; it is filled in from the
    /// weather payload for the same location before any formatting or
    /// date bucketing happens.
    pub utc_offset_seconds: i32,
}

impl GeoLocation {
    /// Create a new location; the UTC offset starts unknown (zero)
    #[must_use]
    pub fn new(name: String, country: Option<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            country,
            latitude,
            longitude,
            utc_offset_seconds: 0,
        }
    }

    /// Same location with the provider-reported UTC offset filled in
    #[must_use]
    pub fn with_utc_offset(mut self, utc_offset_seconds: i32) -> Self {
        self.utc_offset_seconds = utc_offset_seconds;
        self
    }

    /// Display name for reply headers, e.g. "Mumbai, IN"
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}
