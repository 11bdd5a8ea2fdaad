//! Per-country fetch outcomes and the cross-country summary

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{MetricName, WeatherObservation};

/// Marker rendered for codes that produced no value
pub const NO_DATA: &str = "no data";

/// Outcome of the weather fetch for one country code
#[derive(Debug, Clone, PartialEq)]
pub enum PerCodeResult {
    Value(WeatherObservation),
    Unavailable,
}

impl PerCodeResult {
    /// Selected metric, if the fetch succeeded and the field was reported
    #[must_use]
    pub fn metric(&self, metric: MetricName) -> Option<f64> {
        match self {
            PerCodeResult::Value(observation) => observation.value(metric),
            PerCodeResult::Unavailable => None,
        }
    }
}

/// One entry per requested code, in request order
pub type CountryResults = Vec<(String, PerCodeResult)>;

/// Rendered value of one code in the summary `data` map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Number(f64),
    NoData,
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Number(value) => serializer.serialize_f64(*value),
            MetricValue::NoData => serializer.serialize_str(NO_DATA),
        }
    }
}

/// Code holding an extreme value
#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    pub code: String,
    pub value: f64,
}

/// Cross-country statistics for one metric
///
/// Serializes with the field names existing clients expect, keyed by the
/// metric's short name:
///
/// ```json
/// { "data": {"US": 22.1, "XX": "no data"},
///   "countryMaxtemp": "US", "tempMax": 22.1,
///   "countryMintemp": "US", "tempMin": 22.1,
///   "tempAvg": 11.05 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResponse {
    pub metric: MetricName,
    /// Rendered values, in first-appearance order of the codes
    pub data: Vec<(String, MetricValue)>,
    pub max: Option<Extreme>,
    pub min: Option<Extreme>,
    pub average: f64,
}

impl SummaryResponse {
    #[must_use]
    pub fn value_of(&self, code: &str) -> Option<MetricValue> {
        self.data
            .iter()
            .find(|(entry, _)| entry == code)
            .map(|(_, value)| *value)
    }
}

struct DataMap<'a>(&'a [(String, MetricValue)]);

impl Serialize for DataMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, value) in self.0 {
            map.serialize_entry(code, value)?;
        }
        map.end()
    }
}

impl Serialize for SummaryResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = self.metric.key();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("data", &DataMap(&self.data))?;

        if let Some(max) = &self.max {
            map.serialize_entry(&format!("countryMax{key}"), &max.code)?;
            map.serialize_entry(&format!("{key}Max"), &max.value)?;
        }

        if let Some(min) = &self.min {
            map.serialize_entry(&format!("countryMin{key}"), &min.code)?;
            map.serialize_entry(&format!("{key}Min"), &min.value)?;
        }

        map.serialize_entry(&format!("{key}Avg"), &self.average)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_legacy_field_names() {
        let summary = SummaryResponse {
            metric: MetricName::Humidity,
            data: vec![
                ("PL".to_string(), MetricValue::Number(80.0)),
                ("XX".to_string(), MetricValue::NoData),
            ],
            max: Some(Extreme {
                code: "PL".to_string(),
                value: 80.0,
            }),
            min: Some(Extreme {
                code: "PL".to_string(),
                value: 80.0,
            }),
            average: 40.0,
        };

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "data": {"PL": 80.0, "XX": "no data"},
                "countryMaxhumidity": "PL",
                "humidityMax": 80.0,
                "countryMinhumidity": "PL",
                "humidityMin": 80.0,
                "humidityAvg": 40.0
            })
        );
    }

    #[test]
    fn test_omits_extremes_without_data() {
        let summary = SummaryResponse {
            metric: MetricName::Temperature,
            data: vec![("XX".to_string(), MetricValue::NoData)],
            max: None,
            min: None,
            average: 0.0,
        };

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({ "data": {"XX": "no data"}, "tempAvg": 0.0 })
        );
    }

    #[test]
    fn test_unavailable_has_no_metric() {
        assert_eq!(PerCodeResult::Unavailable.metric(MetricName::Pressure), None);
    }
}
