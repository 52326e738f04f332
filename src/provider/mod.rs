//! Abstraction over the upstream weather provider
//!
//! The service talks to a single provider through this trait so the
//! dispatcher can be exercised with mock providers in tests.

use crate::error::WeatherError;
use crate::models::{Forecast, GeoLocation, Observation};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Look up a free-text place name. Zero results is not an error here;
    /// the resolver decides what an empty candidate list means.
    async fn geocode(&self, place: &str) -> Result<Vec<GeoLocation>, WeatherError>;

    /// Fetch current conditions for resolved coordinates
    async fn fetch_current(&self, location: &GeoLocation) -> Result<Observation, WeatherError>;

    /// Fetch the forecast series covering up to `horizon_days` days
    async fn fetch_forecast(
        &self,
        location: &GeoLocation,
        horizon_days: u32,
    ) -> Result<Forecast, WeatherError>;
}
