//! Multi-country weather aggregation
//!
//! Fans out one weather lookup per requested country code and joins the
//! outcomes. Individual failures never fail the aggregation: a code whose
//! capital cannot be resolved, whose fetch errors, times out or is cancelled
//! ends up as [`PerCodeResult::Unavailable`].

use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::directory::CountryDirectory;
use crate::models::{CountryResults, PerCodeResult};
use crate::weather::{WeatherSource, capital_query};

pub struct WeatherAggregator<'a> {
    directory: &'a CountryDirectory,
    source: &'a dyn WeatherSource,
    fetch_timeout: Duration,
}

impl<'a> WeatherAggregator<'a> {
    pub fn new(
        directory: &'a CountryDirectory,
        source: &'a dyn WeatherSource,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            source,
            fetch_timeout,
        }
    }

    /// Fetch current weather for every code concurrently.
    ///
    /// Returns exactly one entry per input code, in input order.
    #[instrument(skip(self, codes, cancel), fields(count = codes.len()))]
    pub async fn fetch_all<S: AsRef<str>>(
        &self,
        codes: &[S],
        cancel: &CancellationToken,
    ) -> CountryResults {
        let fetches = codes
            .iter()
            .map(|code| self.fetch_one(code.as_ref(), cancel));
        let results = join_all(fetches).await;

        let available = results
            .iter()
            .filter(|(_, result)| matches!(result, PerCodeResult::Value(_)))
            .count();
        debug!("Weather available for {}/{} codes", available, results.len());

        results
    }

    async fn fetch_one(&self, code: &str, cancel: &CancellationToken) -> (String, PerCodeResult) {
        let capital = match self.directory.capital(code) {
            Ok(capital) => capital,
            Err(e) => {
                warn!("No capital for {}: {}", code, e);
                return (code.to_string(), PerCodeResult::Unavailable);
            }
        };

        let query = capital_query(capital, code);
        let fetch = tokio::time::timeout(self.fetch_timeout, self.source.current_weather(&query));

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Weather fetch for {} cancelled", code);
                PerCodeResult::Unavailable
            }
            outcome = fetch => match outcome {
                Ok(Ok(observation)) => PerCodeResult::Value(observation),
                Ok(Err(e)) => {
                    warn!("Weather fetch for {} failed: {}", code, e);
                    PerCodeResult::Unavailable
                }
                Err(_) => {
                    warn!(
                        "Weather fetch for {} timed out after {:.1}s",
                        code,
                        self.fetch_timeout.as_secs_f64()
                    );
                    PerCodeResult::Unavailable
                }
            },
        };

        (code.to_string(), result)
    }
}
