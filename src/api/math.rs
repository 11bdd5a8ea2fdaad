//! Cross-country weather statistics routes

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::info;

use super::AppState;
use super::extract::Query;
use crate::AppError;
use crate::aggregate::WeatherAggregator;
use crate::models::{MetricName, SummaryResponse};
use crate::stats::summarize;

#[derive(Debug, Deserialize)]
pub struct MathQuery {
    pub what: Option<String>,
    pub countries: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CountriesQuery {
    pub countries: Option<String>,
}

/// Split a comma-separated code list, dropping blanks
pub fn parse_codes(raw: Option<&str>, max_countries: usize) -> Result<Vec<String>, AppError> {
    let codes: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect();

    if codes.is_empty() {
        return Err(AppError::validation("No country codes provided."));
    }

    if codes.len() > max_countries {
        return Err(AppError::validation(format!(
            "Too many country codes: {} given, at most {} allowed.",
            codes.len(),
            max_countries
        )));
    }

    Ok(codes)
}

pub async fn weather_math(
    State(state): State<AppState>,
    Query(query): Query<MathQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let codes = parse_codes(query.countries.as_deref(), state.config.math.max_countries)?;
    let metric: MetricName = query
        .what
        .as_deref()
        .ok_or_else(|| {
            AppError::validation(
                "No metric provided. Use what=temperature, what=humidity or what=pressure.",
            )
        })?
        .parse()?;

    summary_for(&state, metric, codes).await.map(Json)
}

pub async fn temperature_math(
    State(state): State<AppState>,
    Query(query): Query<CountriesQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    legacy_math(&state, MetricName::Temperature, query).await
}

pub async fn humidity_math(
    State(state): State<AppState>,
    Query(query): Query<CountriesQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    legacy_math(&state, MetricName::Humidity, query).await
}

pub async fn pressure_math(
    State(state): State<AppState>,
    Query(query): Query<CountriesQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    legacy_math(&state, MetricName::Pressure, query).await
}

async fn legacy_math(
    state: &AppState,
    metric: MetricName,
    query: CountriesQuery,
) -> Result<Json<SummaryResponse>, AppError> {
    let codes = parse_codes(query.countries.as_deref(), state.config.math.max_countries)?;
    summary_for(state, metric, codes).await.map(Json)
}

/// Validate every code, fan out, and reduce
async fn summary_for(
    state: &AppState,
    metric: MetricName,
    codes: Vec<String>,
) -> Result<SummaryResponse, AppError> {
    if let Some(unknown) = state.directory.first_unknown(codes.as_slice()) {
        return Err(AppError::not_found(unknown));
    }

    info!("Query for {} analysis for countries: {}", metric, codes.join(","));

    let aggregator = WeatherAggregator::new(
        &state.directory,
        &*state.weather,
        state.config.weather.fetch_timeout(),
    );
    let cancel = state.shutdown.child_token();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let results = aggregator.fetch_all(codes.as_slice(), &cancel).await;
    Ok(summarize(
        &results,
        metric,
        state.config.math.average_denominator,
    ))
}
