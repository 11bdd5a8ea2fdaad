//! Configuration management for the country weather service
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and provides validation for all configuration settings.

use crate::AppError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding an explicit config file path
pub const CONFIG_PATH_ENV: &str = "COUNTRY_WEATHER_CONFIG";

/// Root configuration structure, built once at startup and shared read-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Statistics endpoint configuration
    #[serde(default)]
    pub math: MathConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

/// Weather API configuration settings
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API credential, sent as `appid`
    pub api_key: Option<String>,
    /// Current-weather endpoint URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Unit system requested from the API (standard, metric, imperial)
    #[serde(default = "default_weather_units")]
    pub units: String,
    /// Timeout for a single outbound weather request in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u32,
}

/// Settings for the cross-country statistics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathConfig {
    /// Maximum number of country codes accepted in one request
    #[serde(default = "default_max_countries")]
    pub max_countries: usize,
    /// Denominator used when averaging a metric
    #[serde(default)]
    pub average_denominator: AverageDenominator,
}

/// Which count the average divides by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageDenominator {
    /// Every requested code counts, codes without data contribute zero
    #[default]
    AllRequested,
    /// Only codes that produced a value count
    WithData,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_request_timeout() -> u32 {
    30
}

fn default_weather_base_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_weather_units() -> String {
    "metric".to_string()
}

fn default_fetch_timeout() -> u32 {
    5
}

fn default_max_countries() -> usize {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            units: default_weather_units(),
            fetch_timeout_seconds: default_fetch_timeout(),
        }
    }
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            max_countries: default_max_countries(),
            average_denominator: AverageDenominator::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// The API key never shows up in logs.
impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .field("fetch_timeout_seconds", &self.fetch_timeout_seconds)
            .finish()
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds.into())
    }
}

impl ServerConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.into())
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // COUNTRY_WEATHER_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("COUNTRY_WEATHER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to empty or zero configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_weather_units();
        }
        if self.weather.fetch_timeout_seconds == 0 {
            self.weather.fetch_timeout_seconds = default_fetch_timeout();
        }
        if self.math.max_countries == 0 {
            self.math.max_countries = default_max_countries();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_api_key(&self) -> Result<()> {
        match &self.weather.api_key {
            None => {
                tracing::warn!(
                    "No weather API key configured; weather endpoints will fail until COUNTRY_WEATHER_WEATHER__API_KEY is set"
                );
                Ok(())
            }
            Some(key) if key.trim().is_empty() => Err(AppError::config(
                "Weather API key cannot be empty if provided. Either remove it or provide a valid key.",
            )
            .into()),
            Some(key) if key.len() > 100 => Err(AppError::config(
                "Weather API key appears to be invalid (too long). Please check your API key.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.fetch_timeout_seconds > 60 {
            return Err(AppError::config("Weather fetch timeout cannot exceed 60 seconds").into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(AppError::config("Request timeout cannot exceed 300 seconds").into());
        }

        if self.math.max_countries > 500 {
            return Err(
                AppError::config("Maximum countries per request cannot exceed 500").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AppError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AppError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_units = ["standard", "metric", "imperial"];
        if !valid_units.contains(&self.weather.units.as_str()) {
            return Err(AppError::config(format!(
                "Invalid weather units '{}'. Must be one of: {}",
                self.weather.units,
                valid_units.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(
                AppError::config("Weather API base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}
