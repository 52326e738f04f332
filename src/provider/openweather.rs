//! OpenWeatherMap client
//!
//! Thin HTTP client over three upstream operations: geocoding lookup,
//! current conditions and the 5-day/3-hour forecast. Responses are decoded
//! into typed payloads at this boundary; upstream failures map
//! deterministically onto the service error taxonomy. No automatic retry.

use crate::config::ProviderConfig;
use crate::error::WeatherError;
use crate::models::{Forecast, ForecastPoint, GeoLocation, Observation};
use crate::provider::WeatherProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const GEOCODE_PATH: &str = "/geo/1.0/direct";
const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Candidates requested from the geocoding lookup; only the first is used
const GEOCODE_LIMIT: u32 = 5;

/// The forecast endpoint returns 3-hourly samples, 8 per day, 40 at most
const POINTS_PER_DAY: u32 = 8;
const MAX_FORECAST_POINTS: u32 = 40;

#[derive(Debug)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("weatherbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// GET a provider endpoint and decode the JSON body.
    ///
    /// `place` names the queried location in errors surfaced to the user.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        place: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "calling weather provider");

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::unavailable(format!("request to {path} failed: {e}")))?;

        let response = Self::check_status(response, path, place).await?;

        response.json::<T>().await.map_err(|e| {
            warn!(path, "undecodable provider payload: {e}");
            WeatherError::unavailable(format!("unexpected payload shape from {path}"))
        })
    }

    /// Map a non-2xx upstream status onto the error taxonomy
    async fn check_status(
        response: Response,
        path: &str,
        place: &str,
    ) -> Result<Response, WeatherError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, path, body = %truncate_body(&body), "provider error response");

        Err(match status {
            // "city not found"; can also surface on data endpoints
            StatusCode::NOT_FOUND => WeatherError::not_found(place),
            StatusCode::TOO_MANY_REQUESTS => WeatherError::ProviderRateLimited,
            _ => WeatherError::unavailable(format!("{path} returned status {status}")),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<Vec<GeoLocation>, WeatherError> {
        let entries: Vec<GeoEntry> = self
            .get_json(
                GEOCODE_PATH,
                &[
                    ("q", place.to_string()),
                    ("limit", GEOCODE_LIMIT.to_string()),
                ],
                place,
            )
            .await?;

        debug!(count = entries.len(), "geocoding candidates received");
        Ok(entries
            .into_iter()
            .map(|e| GeoLocation::new(e.name, e.country, e.lat, e.lon))
            .collect())
    }

    #[instrument(skip(self, location), fields(place = %location.name))]
    async fn fetch_current(&self, location: &GeoLocation) -> Result<Observation, WeatherError> {
        let parsed: OwCurrentResponse = self
            .get_json(
                CURRENT_PATH,
                &[
                    ("lat", location.latitude.to_string()),
                    ("lon", location.longitude.to_string()),
                    ("units", "metric".to_string()),
                ],
                &location.name,
            )
            .await?;

        let condition = parsed
            .weather
            .first()
            .map(|w| title_case(&w.description))
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Observation {
            timestamp: unix_to_utc(parsed.dt).unwrap_or_else(Utc::now),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.and_then(|w| w.speed),
            pressure_hpa: parsed.main.pressure,
            condition,
            utc_offset_seconds: parsed.timezone,
        })
    }

    #[instrument(skip(self, location), fields(place = %location.name))]
    async fn fetch_forecast(
        &self,
        location: &GeoLocation,
        horizon_days: u32,
    ) -> Result<Forecast, WeatherError> {
        let count = (horizon_days.saturating_mul(POINTS_PER_DAY)).min(MAX_FORECAST_POINTS);

        let parsed: OwForecastResponse = self
            .get_json(
                FORECAST_PATH,
                &[
                    ("lat", location.latitude.to_string()),
                    ("lon", location.longitude.to_string()),
                    ("units", "metric".to_string()),
                    ("cnt", count.to_string()),
                ],
                &location.name,
            )
            .await?;

        let points: Vec<ForecastPoint> = parsed
            .list
            .into_iter()
            .filter_map(|entry| {
                let Some(timestamp) = unix_to_utc(entry.dt) else {
                    warn!(dt = entry.dt, "skipping forecast entry with bad timestamp");
                    return None;
                };
                let (condition_code, condition) = entry
                    .weather
                    .first()
                    .map(|w| (w.id, title_case(&w.description)))
                    .unwrap_or((0, "Unknown".to_string()));

                Some(ForecastPoint {
                    timestamp,
                    temperature_c: entry.main.temp,
                    condition_code,
                    condition,
                    precipitation_probability: entry.pop.unwrap_or(0.0).clamp(0.0, 1.0),
                })
            })
            .collect();

        debug!(count = points.len(), "forecast points received");
        Ok(Forecast {
            utc_offset_seconds: parsed.city.timezone,
            points,
        })
    }
}

// OpenWeatherMap wire structures

#[derive(Debug, Deserialize)]
struct GeoEntry {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: Option<u8>,
    pressure: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: i64,
    /// Shift from UTC of the observed location, in seconds
    timezone: i32,
    main: OwMain,
    #[serde(default)]
    wind: Option<OwWind>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    /// Probability of precipitation, 0..1
    #[serde(default)]
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift from UTC of the forecast location, in seconds
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// The provider sends lowercase descriptions ("light rain")
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
