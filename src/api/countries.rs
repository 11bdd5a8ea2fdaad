//! Country reference routes and capital weather

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::info;

use super::AppState;
use super::extract::Path;
use crate::AppError;
use crate::models::{Country, CountrySummary, GeoPoint, WeatherObservation};
use crate::weather::capital_query;

pub async fn list_countries(State(state): State<AppState>) -> Json<Vec<CountrySummary>> {
    info!("Query for all countries");
    Json(state.directory.all())
}

pub async fn get_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Country>, AppError> {
    info!("Query for country with {} code", code);
    state.directory.info(&code).cloned().map(Json)
}

pub async fn get_provinces(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    info!("Query for provinces of country with {} code", code);
    state
        .directory
        .provinces(&code)
        .map(|provinces| Json(provinces.to_vec()))
}

pub async fn wiki_redirect(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    info!("Query for wiki redirection for country with {} code", code);
    let wiki = state.directory.wiki(&code)?;
    Ok((StatusCode::FOUND, [(header::LOCATION, wiki.to_string())]).into_response())
}

pub async fn get_center(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<GeoPoint>, AppError> {
    info!("Query for center coordinates of country with {} code", code);
    state.directory.center(&code).map(Json)
}

pub async fn get_capital_weather(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<WeatherObservation>, AppError> {
    info!("Query for weather in capital city of country with {} code", code);
    let capital = state.directory.capital(&code)?;
    let observation = state
        .weather
        .current_weather(&capital_query(capital, &code))
        .await?;
    Ok(Json(observation))
}
