use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::directory::CountryDirectory;
use crate::error::ErrorBody;
use crate::weather::WeatherSource;

pub mod countries;
pub mod extract;
pub mod math;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub directory: Arc<CountryDirectory>,
    pub weather: Arc<dyn WeatherSource>,
    /// Cancelled on shutdown; in-flight fan-outs stop waiting on the weather service
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        directory: CountryDirectory,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            directory: Arc::new(directory),
            weather,
            shutdown: CancellationToken::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/countries", get(countries::list_countries))
        .route("/countries/{code}", get(countries::get_country))
        .route("/countries/{code}/provinces", get(countries::get_provinces))
        .route("/countries/{code}/wiki", get(countries::wiki_redirect))
        .route("/countries/{code}/center", get(countries::get_center))
        .route(
            "/countries/{code}/weather/capital",
            get(countries::get_capital_weather),
        )
        .route("/math", get(math::weather_math))
        .route("/weatherMath/temperatureMath", get(math::temperature_math))
        .route("/weatherMath/humidityMath", get(math::humidity_math))
        .route("/weatherMath/pressureMath", get(math::pressure_math))
        .fallback(unknown_route)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

async fn unknown_route() -> Response {
    let body = ErrorBody {
        error_message: "Route not found.".to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
