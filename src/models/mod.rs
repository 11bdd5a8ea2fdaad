//! Data models for the country weather service
//!
//! This module contains the core domain models organized by concern:
//! - Country: reference data and boundary geometry
//! - Weather: current observations and metric selection
//! - Summary: per-country fetch outcomes and the statistics response

pub mod country;
pub mod summary;
pub mod weather;

// Re-export all public types for convenient access
pub use country::{Country, CountrySummary, GeoPoint, Geometry};
pub use summary::{CountryResults, Extreme, MetricValue, NO_DATA, PerCodeResult, SummaryResponse};
pub use weather::{MetricName, WeatherObservation};
