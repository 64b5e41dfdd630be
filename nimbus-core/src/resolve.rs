use tracing::debug;

use crate::{
    error::{FetchError, QueryError},
    fallback::FallbackStore,
    model::{WeatherQuery, WeatherRecord},
    source::WeatherSource,
};

/// Why a degraded (canned) record is being shown instead of live data.
/// Selects the advisory shown alongside the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    /// The fetch was refused locally because no usable API key is
    /// configured.
    MissingApiKey,
    /// The fetch reached out and failed: bad status, transport error, or
    /// an unparseable body.
    ServiceFailure,
}

impl DegradedReason {
    pub fn advisory(&self) -> &'static str {
        match self {
            DegradedReason::MissingApiKey => {
                "Using offline data - add your API key for live weather"
            }
            DegradedReason::ServiceFailure => "Using offline data - API unavailable",
        }
    }
}

/// Final display outcome for one search. Raw fetch errors never escape
/// past this boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Fetch succeeded.
    Live(WeatherRecord),
    /// Fetch failed but a canned record exists for the city.
    Degraded {
        record: WeatherRecord,
        reason: DegradedReason,
    },
    /// Fetch failed and no canned record exists.
    Unavailable,
}

impl Outcome {
    /// Blocking message for the `Unavailable` outcome.
    pub const UNAVAILABLE_MESSAGE: &'static str =
        "Weather data not available. Please check the city name and try again.";

    /// The record to display, if any.
    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            Outcome::Live(record) | Outcome::Degraded { record, .. } => Some(record),
            Outcome::Unavailable => None,
        }
    }
}

/// Decision procedure mapping a city query to a final display outcome:
/// try the live source, fall back to the canned table, or give up.
#[derive(Debug)]
pub struct Resolver {
    source: Box<dyn WeatherSource>,
    fallback: FallbackStore,
}

impl Resolver {
    pub fn new(source: Box<dyn WeatherSource>, fallback: FallbackStore) -> Self {
        Self { source, fallback }
    }

    /// Resolve a city-name search. Empty or whitespace-only input is
    /// rejected before the source is invoked.
    pub async fn resolve(&self, city: &str) -> Result<Outcome, QueryError> {
        if city.trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let query = WeatherQuery::city(city);
        match self.source.fetch(&query).await {
            Ok(record) => Ok(Outcome::Live(record)),
            Err(err) => {
                debug!(city, error = %err, "live fetch failed, consulting fallback table");

                let reason = match err {
                    FetchError::MissingApiKey => DegradedReason::MissingApiKey,
                    _ => DegradedReason::ServiceFailure,
                };

                match self.fallback.lookup(city) {
                    Some(record) => Ok(Outcome::Degraded {
                        record: record.clone(),
                        reason,
                    }),
                    None => Ok(Outcome::Unavailable),
                }
            }
        }
    }
}
