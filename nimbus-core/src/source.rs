use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    error::FetchError,
    model::{WeatherQuery, WeatherRecord},
};

pub mod openweather;

/// A source of current weather for a query. The live implementation talks
/// to OpenWeather; tests substitute stubs.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError>;
}
