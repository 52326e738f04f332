//! Configuration management for the weatherbot service
//!
//! Loads configuration from an optional TOML file and environment variable
//! overrides at process start, and validates all settings. There is no hot
//! reload; the loaded object is handed to the service at construction.

use crate::error::WeatherError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the weatherbot service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherBotConfig {
    /// Upstream weather provider settings
    pub provider: ProviderConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OpenWeatherMap API key
    pub api_key: String,
    /// Base URL for the provider API
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// Per-call timeout in seconds for outbound requests
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the service listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Forecast horizon in days when the caller does not request one
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_provider_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_provider_timeout() -> u64 {
    10
}

fn default_server_port() -> u16 {
    3001
}

fn default_horizon_days() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for WeatherBotConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig {
                api_key: String::new(),
                base_url: default_provider_base_url(),
                timeout_seconds: default_provider_timeout(),
            },
            server: ServerConfig::default(),
            defaults: DefaultsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl WeatherBotConfig {
    /// Load configuration from `weatherbot.toml` (if present) and
    /// `WEATHERBOT_*` environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified file path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("weatherbot.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. WEATHERBOT_PROVIDER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("WEATHERBOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WeatherBotConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the provider credential
    fn validate_api_key(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            return Err(WeatherError::config(
                "Provider API key is not set. Set provider.api_key in weatherbot.toml \
                 or the WEATHERBOT_PROVIDER__API_KEY environment variable.",
            )
            .into());
        }

        if self.provider.api_key.len() < 8 {
            return Err(WeatherError::config(
                "Provider API key appears to be invalid (too short). Please check your API key.",
            )
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.provider.timeout_seconds == 0 || self.provider.timeout_seconds > 300 {
            return Err(WeatherError::config(
                "Provider timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.defaults.horizon_days == 0 || self.defaults.horizon_days > 16 {
            return Err(WeatherError::config(
                "Default forecast horizon must be between 1 and 16 days",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(
                WeatherError::config("Provider base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> WeatherBotConfig {
        let mut config = WeatherBotConfig::default();
        config.provider.api_key = "valid_api_key_123".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = WeatherBotConfig::default();
        assert_eq!(config.provider.base_url, "https://api.openweathermap.org");
        assert_eq!(config.provider.timeout_seconds, 10);
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.defaults.horizon_days, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validation_requires_api_key() {
        let config = WeatherBotConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_validation_accepts_configured_key() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_short_key() {
        let mut config = configured();
        config.provider.api_key = "abc".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_validation_numeric_ranges() {
        let mut config = configured();
        config.provider.timeout_seconds = 500;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout"));

        let mut config = configured();
        config.defaults.horizon_days = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("horizon"));
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let mut config = configured();
        config.provider.base_url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let mut config = configured();
        config.logging.level = "loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }
}
