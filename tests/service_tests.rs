//! End-to-end tests for the dispatcher and the HTTP surface, driven by a
//! mock provider.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tower::ServiceExt;
use weatherbot::error::{ErrorKind, WeatherError};
use weatherbot::models::{
    Forecast, ForecastPoint, GeoLocation, Intent, Observation, WeatherQuery,
};
use weatherbot::provider::WeatherProvider;
use weatherbot::service::WeatherService;
use weatherbot::web;

const DEFAULT_HORIZON: u32 = 5;

#[derive(Debug, Default)]
struct MockProvider {
    candidates: Vec<GeoLocation>,
    current: Option<Observation>,
    forecast: Option<Forecast>,
    /// Makes data fetches fail the way a timed-out upstream call does
    simulate_timeout: bool,
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn geocode(&self, _place: &str) -> Result<Vec<GeoLocation>, WeatherError> {
        Ok(self.candidates.clone())
    }

    async fn fetch_current(&self, _location: &GeoLocation) -> Result<Observation, WeatherError> {
        if self.simulate_timeout {
            return Err(WeatherError::unavailable("request to /data/2.5/weather failed: operation timed out"));
        }
        Ok(self.current.clone().expect("no canned observation"))
    }

    async fn fetch_forecast(
        &self,
        _location: &GeoLocation,
        _horizon_days: u32,
    ) -> Result<Forecast, WeatherError> {
        if self.simulate_timeout {
            return Err(WeatherError::unavailable("request to /data/2.5/forecast failed: operation timed out"));
        }
        Ok(self.forecast.clone().expect("no canned forecast"))
    }
}

fn service_with(provider: MockProvider) -> WeatherService {
    WeatherService::new(Arc::new(provider), DEFAULT_HORIZON)
}

fn city(name: &str) -> GeoLocation {
    GeoLocation::new(name.to_string(), Some("IN".to_string()), 19.08, 72.88)
}

fn clear_observation() -> Observation {
    Observation {
        timestamp: "2024-06-10T09:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        temperature_c: 30.0,
        feels_like_c: 32.0,
        humidity_pct: Some(70),
        wind_speed_mps: Some(12.0),
        pressure_hpa: Some(1006),
        condition: "Clear".to_string(),
        utc_offset_seconds: 19800,
    }
}

/// A 3-hourly series spanning four calendar dates in the +05:30 timezone
fn four_day_series() -> Forecast {
    let start = "2024-06-10T06:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let points = (0..24)
        .map(|i| ForecastPoint {
            timestamp: start + Duration::hours(3 * i),
            temperature_c: 25.0 + (i % 8) as f64,
            condition_code: 800,
            condition: "Clear Sky".to_string(),
            precipitation_probability: 0.1,
        })
        .collect();

    Forecast {
        utc_offset_seconds: 19800,
        points,
    }
}

// Scenario A: current conditions for a resolvable city
#[tokio::test]
async fn current_weather_reply_contains_observed_fields() {
    let service = service_with(MockProvider {
        candidates: vec![city("Mumbai")],
        current: Some(clear_observation()),
        ..Default::default()
    });

    let query = WeatherQuery::new("Mumbai", Intent::Current, None).unwrap();
    let reply = service.handle(query).await;

    assert!(reply.ok, "unexpected failure: {}", reply.text);
    assert!(reply.text.contains("Mumbai"));
    assert!(reply.text.contains("30"));
    assert!(reply.text.contains("Clear"));
}

// Scenario B: forecast horizon caps the day lines
#[tokio::test]
async fn forecast_reply_has_exactly_horizon_day_lines() {
    let service = service_with(MockProvider {
        candidates: vec![city("Delhi")],
        forecast: Some(four_day_series()),
        ..Default::default()
    });

    let query = WeatherQuery::new("Delhi", Intent::Forecast, Some(3)).unwrap();
    let reply = service.handle(query).await;

    assert!(reply.ok, "unexpected failure: {}", reply.text);
    let day_lines: Vec<&str> = reply.text.lines().skip(1).collect();
    assert_eq!(day_lines.len(), 3);
    assert!(day_lines[0].contains("2024-06-10"));
    assert!(day_lines[1].contains("2024-06-11"));
    assert!(day_lines[2].contains("2024-06-12"));
}

// Scenario C: unresolvable place
#[tokio::test]
async fn unknown_location_fails_without_provider_detail() {
    let service = service_with(MockProvider::default());

    let query = WeatherQuery::new("Nowhereville", Intent::Current, None).unwrap();
    let reply = service.handle(query).await;

    assert!(!reply.ok);
    assert_eq!(reply.error_kind, Some(ErrorKind::LocationNotFound));
    assert!(reply.text.contains("Nowhereville"));
    for internal in ["geo/1.0", "http", "404", "appid"] {
        assert!(
            !reply.text.contains(internal),
            "reply leaks provider detail '{internal}': {}",
            reply.text
        );
    }
}

// Scenario D: upstream timeout
#[tokio::test]
async fn provider_timeout_maps_to_unavailable() {
    let service = service_with(MockProvider {
        candidates: vec![city("Mumbai")],
        simulate_timeout: true,
        ..Default::default()
    });

    let query = WeatherQuery::new("Mumbai", Intent::Current, None).unwrap();
    let reply = service.handle(query).await;

    assert!(!reply.ok);
    assert_eq!(reply.error_kind, Some(ErrorKind::ProviderUnavailable));
    assert!(!reply.text.contains("timed out"));
}

// The dispatch must follow the intent flag, not a hardcoded current path
#[tokio::test]
async fn forecast_intent_selects_forecast_path() {
    let service = service_with(MockProvider {
        candidates: vec![city("Delhi")],
        current: Some(clear_observation()),
        forecast: Some(four_day_series()),
        ..Default::default()
    });

    let current = service
        .handle(WeatherQuery::new("Delhi", Intent::Current, None).unwrap())
        .await;
    assert!(current.text.starts_with("Current weather for"));

    let forecast = service
        .handle(WeatherQuery::new("Delhi", Intent::Forecast, None).unwrap())
        .await;
    assert!(forecast.text.contains("-day forecast for"));
}

#[tokio::test]
async fn empty_forecast_series_renders_no_data_line() {
    let service = service_with(MockProvider {
        candidates: vec![city("Delhi")],
        forecast: Some(Forecast {
            utc_offset_seconds: 19800,
            points: Vec::new(),
        }),
        ..Default::default()
    });

    let reply = service
        .handle(WeatherQuery::new("Delhi", Intent::Forecast, Some(3)).unwrap())
        .await;

    assert!(reply.ok);
    assert!(reply.text.contains("No forecast data available"));
}

// HTTP surface: status codes and bodies

async fn post_weather(service: WeatherService, body: serde_json::Value) -> (StatusCode, String) {
    let app = web::router(Arc::new(service));
    let request = Request::builder()
        .method("POST")
        .uri("/weather")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn http_success_returns_reply_text() {
    let service = service_with(MockProvider {
        candidates: vec![city("Mumbai")],
        current: Some(clear_observation()),
        ..Default::default()
    });

    let (status, body) =
        post_weather(service, serde_json::json!({ "location": "Mumbai" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Current weather for Mumbai"));
}

#[tokio::test]
async fn http_unknown_location_returns_404() {
    let (status, body) = post_weather(
        service_with(MockProvider::default()),
        serde_json::json!({ "location": "Nowhereville", "forecast": true }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Nowhereville"));
}

#[tokio::test]
async fn http_empty_location_returns_400() {
    let (status, _body) = post_weather(
        service_with(MockProvider::default()),
        serde_json::json!({ "location": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_provider_outage_returns_502() {
    let service = service_with(MockProvider {
        candidates: vec![city("Mumbai")],
        simulate_timeout: true,
        ..Default::default()
    });

    let (status, _body) =
        post_weather(service, serde_json::json!({ "location": "Mumbai" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn http_health_endpoint_reports_ok() {
    let app = web::router(Arc::new(service_with(MockProvider::default())));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}
