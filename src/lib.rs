//! `weatherbot` - weather resolution backend for a chat weather assistant
//!
//! This library answers structured weather questions: it resolves a place
//! name, fetches current conditions or a multi-day forecast from the
//! upstream provider, aggregates forecasts into timezone-correct daily
//! summaries, and renders a fixed human-readable reply. Chat UI and intent
//! extraction live in external collaborators that talk to the HTTP surface
//! in `web`.

pub mod config;
pub mod error;
pub mod formatters;
pub mod location_resolver;
pub mod models;
pub mod provider;
pub mod service;
pub mod web;

// Re-export core types for public API
pub use config::WeatherBotConfig;
pub use error::{ErrorKind, WeatherError};
pub use location_resolver::LocationResolver;
pub use models::{
    DailySummary, Forecast, ForecastPoint, GeoLocation, Intent, Observation, WeatherQuery,
    WeatherReply,
};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use service::WeatherService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;
