//! Current-weather lookups for a single location

use async_trait::async_trait;

use crate::AppError;
use crate::models::WeatherObservation;

pub mod open_weather;

pub use open_weather::OpenWeatherClient;

/// A source of current weather observations
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch the current observation for a `"{city},{country code}"` query.
    ///
    /// Any transport failure, non-success status or unreadable body is an
    /// [`AppError::Connection`].
    async fn current_weather(&self, query: &str) -> Result<WeatherObservation, AppError>;
}

/// Location query for a country's capital
#[must_use]
pub fn capital_query(capital: &str, code: &str) -> String {
    format!("{capital},{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_query() {
        assert_eq!(capital_query("Paris", "FR"), "Paris,FR");
    }
}
