//! Weather observation model and metric selection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AppError;

/// Current weather at one location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WeatherObservation {
    /// Location name as reported by the weather service
    pub location: String,
    /// When the observation was taken
    pub observed_at: Option<DateTime<Utc>>,
    /// Human-readable description of weather conditions
    pub description: Option<String>,
    /// Temperature in the configured unit system
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Atmospheric pressure in hPa
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl WeatherObservation {
    /// Value of the selected metric, if the service reported it
    #[must_use]
    pub fn value(&self, metric: MetricName) -> Option<f64> {
        match metric {
            MetricName::Temperature => self.temperature,
            MetricName::Humidity => self.humidity,
            MetricName::Pressure => self.pressure,
        }
    }
}

/// Observation field a statistics request reduces over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    Temperature,
    Humidity,
    Pressure,
}

impl MetricName {
    /// Short key used in summary field names (`tempMax`, `countryMinhumidity`, ...)
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MetricName::Temperature => "temp",
            MetricName::Humidity => "humidity",
            MetricName::Pressure => "pressure",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::Temperature => "temperature",
            MetricName::Humidity => "humidity",
            MetricName::Pressure => "pressure",
        }
    }

    pub const fn all() -> &'static [MetricName] {
        &[
            MetricName::Temperature,
            MetricName::Humidity,
            MetricName::Pressure,
        ]
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "temperature" | "temp" => Ok(MetricName::Temperature),
            "humidity" => Ok(MetricName::Humidity),
            "pressure" => Ok(MetricName::Pressure),
            _ => Err(AppError::validation(format!(
                "Unknown metric '{value}'. Supported metrics: temperature, humidity, pressure."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("temperature", MetricName::Temperature)]
    #[case("temp", MetricName::Temperature)]
    #[case("Humidity", MetricName::Humidity)]
    #[case(" pressure ", MetricName::Pressure)]
    fn test_metric_parsing(#[case] input: &str, #[case] expected: MetricName) {
        assert_eq!(input.parse::<MetricName>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_metric() {
        let err = "windiness".parse::<MetricName>().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("Unknown metric 'windiness'"));
    }

    #[test]
    fn test_metric_as_str_roundtrip() {
        for metric in MetricName::all() {
            assert_eq!(metric.as_str().parse::<MetricName>().unwrap(), *metric);
        }
    }

    #[test]
    fn test_value_selects_field() {
        let observation = WeatherObservation {
            location: "Paris".to_string(),
            temperature: Some(18.4),
            humidity: Some(70.0),
            pressure: None,
            ..Default::default()
        };
        assert_eq!(observation.value(MetricName::Temperature), Some(18.4));
        assert_eq!(observation.value(MetricName::Humidity), Some(70.0));
        assert_eq!(observation.value(MetricName::Pressure), None);
    }
}
