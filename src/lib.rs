//! Country weather service
//!
//! Serves country reference data and current capital weather over a small
//! REST API, and computes max/min/average summaries of one weather metric
//! across a set of countries.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod models;
pub mod stats;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use aggregate::WeatherAggregator;
pub use api::AppState;
pub use config::{AppConfig, AverageDenominator};
pub use directory::CountryDirectory;
pub use error::AppError;
pub use models::{Country, MetricName, PerCodeResult, SummaryResponse, WeatherObservation};
pub use stats::summarize;
pub use weather::{OpenWeatherClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
