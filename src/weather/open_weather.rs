//! OpenWeatherMap current-weather client
//!
//! Issues exactly one GET per lookup: no retries, no rate limiting. The
//! client-level timeout bounds every request.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::WeatherSource;
use crate::AppError;
use crate::config::WeatherConfig;
use crate::models::WeatherObservation;

pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(concat!("country-weather/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        })
    }

    fn request_url(&self, query: &str) -> Result<Url, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config("Weather API key is not configured"))?;

        Url::parse_with_params(
            &self.base_url,
            [("q", query), ("appid", api_key), ("units", self.units.as_str())],
        )
        .map_err(|e| AppError::config(format!("Invalid weather API base URL: {e}")))
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, query: &str) -> Result<WeatherObservation, AppError> {
        let url = self.request_url(query)?;
        let start_time = Instant::now();
        debug!("Requesting current weather from {}", self.base_url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Weather request for '{}' failed: {}", query, e.without_url());
            AppError::connection("Connection lost!")
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather service answered {} for '{}'", status, query);
            return Err(AppError::connection(format!(
                "Weather service responded with status {status}"
            )));
        }

        let body: CurrentWeatherResponse = response.json().await.map_err(|e| {
            warn!(
                "Unreadable weather response for '{}': {}",
                query,
                e.without_url()
            );
            AppError::connection("Invalid weather data received")
        })?;

        info!(
            "Retrieved current weather for '{}' in {:.3}s",
            query,
            start_time.elapsed().as_secs_f64()
        );

        Ok(body.into())
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    name: String,
    dt: Option<i64>,
    #[serde(default)]
    weather: Vec<Condition>,
    main: Option<MainSection>,
    wind: Option<WindSection>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: Option<f64>,
    feels_like: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WindSection {
    speed: Option<f64>,
}

impl From<CurrentWeatherResponse> for WeatherObservation {
    fn from(response: CurrentWeatherResponse) -> Self {
        let main = response.main;
        Self {
            location: response.name,
            observed_at: response
                .dt
                .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0)),
            description: response.weather.into_iter().next().map(|c| c.description),
            temperature: main.as_ref().and_then(|m| m.temp),
            feels_like: main.as_ref().and_then(|m| m.feels_like),
            humidity: main.as_ref().and_then(|m| m.humidity),
            pressure: main.as_ref().and_then(|m| m.pressure),
            wind_speed: response.wind.and_then(|w| w.speed),
        }
    }
}
