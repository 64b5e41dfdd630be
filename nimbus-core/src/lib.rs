//! Core library for the `nimbus` CLI.
//!
//! This crate defines:
//! - Configuration handling (API URL and key)
//! - The live weather source and its error taxonomy
//! - The canned fallback table and the resolution flow over both
//! - The durable last-search slot
//!
//! It is used by `nimbus-cli`, but can also be reused by other binaries or
//! services.

pub mod config;
pub mod error;
pub mod fallback;
pub mod model;
pub mod resolve;
pub mod source;
pub mod store;

pub use config::Config;
pub use error::{FetchError, QueryError};
pub use fallback::FallbackStore;
pub use model::{WeatherQuery, WeatherRecord};
pub use resolve::{DegradedReason, Outcome, Resolver};
pub use source::{WeatherSource, openweather::OpenWeatherClient};
pub use store::{FileStore, KvStore};
