use std::sync::Arc;

use anyhow::{Context, Result};
use country_weather::{AppConfig, AppState, CountryDirectory, OpenWeatherClient, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let directory = CountryDirectory::embedded()?;
    tracing::info!("Country directory ready with {} countries", directory.len());

    let weather = OpenWeatherClient::new(&config.weather).context("Failed to create HTTP client")?;

    let state = AppState::new(config, directory, Arc::new(weather));
    web::run(state).await
}
