use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use weatherbot::config::WeatherBotConfig;
use weatherbot::provider::OpenWeatherClient;
use weatherbot::service::WeatherService;
use weatherbot::web;

#[tokio::main]
async fn main() -> Result<()> {
    // Config first: refuse to serve without a provider credential
    let config = WeatherBotConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    tracing::info!("starting weatherbot v{}", weatherbot::VERSION);

    let provider = Arc::new(OpenWeatherClient::new(&config.provider)?);
    let service = Arc::new(WeatherService::new(provider, config.defaults.horizon_days));

    web::run(config.server.port, service).await
}
