//! HTTP surface
//!
//! The envelope is owned by the orchestration layer; this router only
//! accepts the structured query fields and returns the reply text as the
//! body, with a non-200 status for failures.

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::error::ErrorKind;
use crate::models::{WeatherQuery, WeatherReply};
use crate::service::WeatherService;

/// Upper bound on inbound request handling; outbound calls are themselves
/// bounded by the provider client timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Structured fields sent by the orchestration layer
#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    pub location: String,
    /// false (default) asks for current conditions, true for a forecast
    #[serde(default)]
    pub forecast: bool,
    /// Forecast horizon in days; the configured default applies when absent
    pub days: Option<u32>,
}

pub fn router(service: Arc<WeatherService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/weather", post(weather))
        .route("/health", get(health))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .with_state(service)
}

pub async fn run(port: u16, service: Arc<WeatherService>) -> Result<()> {
    let app = router(service);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("weatherbot listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn weather(
    State(service): State<Arc<WeatherService>>,
    Json(request): Json<WeatherRequest>,
) -> Response {
    let query = match WeatherQuery::from_parts(&request.location, request.forecast, request.days) {
        Ok(query) => query,
        Err(error) => return (StatusCode::BAD_REQUEST, error.user_message()).into_response(),
    };

    into_http(service.handle(query).await)
}

async fn health() -> Response {
    Json(json!({ "status": "ok", "version": crate::VERSION })).into_response()
}

fn into_http(reply: WeatherReply) -> Response {
    let status = match reply.error_kind {
        None => StatusCode::OK,
        Some(ErrorKind::MalformedQuery) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::LocationNotFound) => StatusCode::NOT_FOUND,
        Some(ErrorKind::ProviderRateLimited) => StatusCode::TOO_MANY_REQUESTS,
        Some(ErrorKind::ProviderUnavailable) => StatusCode::BAD_GATEWAY,
    };

    (status, reply.text).into_response()
}
