//! Cross-country statistics over one weather metric

use crate::config::AverageDenominator;
use crate::models::{Extreme, MetricName, MetricValue, PerCodeResult, SummaryResponse};

/// Reduce per-code results into max/min/average for `metric`.
///
/// Entries are visited in the order given; on ties the first entry keeps the
/// extreme. A code that was requested twice keeps its first position in
/// `data` with the later value, but every entry counts towards the statistics.
#[must_use]
pub fn summarize(
    results: &[(String, PerCodeResult)],
    metric: MetricName,
    denominator: AverageDenominator,
) -> SummaryResponse {
    let mut data: Vec<(String, MetricValue)> = Vec::with_capacity(results.len());
    let mut max: Option<Extreme> = None;
    let mut min: Option<Extreme> = None;
    let mut sum = 0.0;
    let mut with_data = 0usize;

    for (code, result) in results {
        let value = result.metric(metric);
        let rendered = value.map_or(MetricValue::NoData, MetricValue::Number);

        match data.iter_mut().find(|(existing, _)| existing == code) {
            Some(entry) => entry.1 = rendered,
            None => data.push((code.clone(), rendered)),
        }

        let Some(value) = value else { continue };
        sum += value;
        with_data += 1;

        if max.as_ref().is_none_or(|current| value > current.value) {
            max = Some(Extreme {
                code: code.clone(),
                value,
            });
        }
        if min.as_ref().is_none_or(|current| value < current.value) {
            min = Some(Extreme {
                code: code.clone(),
                value,
            });
        }
    }

    let count = match denominator {
        AverageDenominator::AllRequested => results.len(),
        AverageDenominator::WithData => with_data,
    };
    let average = if count == 0 { 0.0 } else { sum / count as f64 };

    SummaryResponse {
        metric,
        data,
        max,
        min,
        average,
    }
}
