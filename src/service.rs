//! Request dispatching
//!
//! `WeatherService` is the service entry point: it validates the inbound
//! query, resolves the location, fetches from the provider, aggregates and
//! formats, and always returns a well-formed `WeatherReply`. No state is
//! kept across requests.

use crate::error::WeatherError;
use crate::formatters;
use crate::location_resolver::LocationResolver;
use crate::models::{Intent, WeatherQuery, WeatherReply, aggregate_daily};
use crate::provider::WeatherProvider;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    default_horizon_days: u32,
}

impl WeatherService {
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>, default_horizon_days: u32) -> Self {
        Self {
            provider,
            default_horizon_days,
        }
    }

    /// Handle one weather question.
    ///
    /// Failures never escape: every error is folded into the reply with its
    /// kind and a user-facing message.
    #[instrument(skip(self), fields(location = %query.location, intent = ?query.intent))]
    pub async fn handle(&self, query: WeatherQuery) -> WeatherReply {
        match self.dispatch(&query).await {
            Ok(text) => {
                info!("query handled");
                WeatherReply::success(text)
            }
            Err(error) => {
                warn!(kind = ?error.kind(), "query failed: {error}");
                WeatherReply::failure(&error)
            }
        }
    }

    async fn dispatch(&self, query: &WeatherQuery) -> Result<String, WeatherError> {
        let location = LocationResolver::resolve(self.provider.as_ref(), &query.location).await?;

        // The fetch path follows the query's intent, never a fixed default
        match query.intent {
            Intent::Current => {
                let observation = self.provider.fetch_current(&location).await?;
                let location = location.with_utc_offset(observation.utc_offset_seconds);
                Ok(formatters::format_current(&location, &observation))
            }
            Intent::Forecast => {
                let horizon_days = query.horizon_days.unwrap_or(self.default_horizon_days);
                let forecast = self.provider.fetch_forecast(&location, horizon_days).await?;
                let location = location.with_utc_offset(forecast.utc_offset_seconds);
                let days =
                    aggregate_daily(&forecast.points, location.utc_offset_seconds, horizon_days);
                Ok(formatters::format_forecast(&location, &days))
            }
        }
    }
}
