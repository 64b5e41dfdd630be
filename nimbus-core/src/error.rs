use thiserror::Error;

/// Everything that can go wrong between "build the request" and "have a
/// parsed record". Resolution collapses these into user-facing outcomes;
/// none of them reach the user as-is.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API key is absent, empty, or still the placeholder. Raised
    /// before any network I/O so the placeholder is never sent upstream.
    #[error("API key not configured")]
    MissingApiKey,

    #[error("city not found")]
    NotFound,

    #[error("invalid API key")]
    Unauthorized,

    #[error("weather service unavailable (status {0})")]
    ServiceUnavailable(reqwest::StatusCode),

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejected before the fetcher is ever invoked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please enter a city name")]
    EmptyQuery,
}
