//! Data models for the weatherbot service
//!
//! This module contains the core domain models organized by concern:
//! - Query: the structured question extracted by the orchestration layer
//! - Location: geocoded place with the provider-reported UTC offset
//! - Weather: typed provider payloads (current observation, forecast series)
//! - Forecast: daily summaries aggregated in the location's timezone
//! - Reply: the terminal envelope returned to the caller

pub mod forecast;
pub mod location;
pub mod query;
pub mod reply;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DailySummary, aggregate_daily};
pub use location::GeoLocation;
pub use query::{Intent, WeatherQuery};
pub use reply::WeatherReply;
pub use weather::{Forecast, ForecastPoint, Observation};
