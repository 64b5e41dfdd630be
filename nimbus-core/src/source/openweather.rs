use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Config,
    error::FetchError,
    model::{WeatherQuery, WeatherRecord},
};

use super::WeatherSource;

/// Client for the OpenWeather current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            api_url,
            api_key,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }

    fn key_or_reject(&self) -> Result<&str, FetchError> {
        let key = self.api_key.trim();
        if key.is_empty() || key == crate::config::PLACEHOLDER_API_KEY {
            return Err(FetchError::MissingApiKey);
        }
        Ok(key)
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError> {
        // Checked before anything leaves the process: the placeholder key
        // must never appear in a request.
        let key = self.key_or_reject()?;

        let mut params = match query {
            WeatherQuery::City(name) => vec![("q", name.clone())],
            WeatherQuery::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        params.push(("appid", key.to_string()));
        params.push(("units", "metric".to_string()));

        let res = self
            .http
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = res.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                404 => FetchError::NotFound,
                401 => FetchError::Unauthorized,
                _ => FetchError::ServiceUnavailable(status),
            });
        }

        let body = res.text().await.map_err(FetchError::Network)?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl From<OwCurrentResponse> for WeatherRecord {
    fn from(value: OwCurrentResponse) -> Self {
        let (condition, description, icon) = value
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string(), String::new()));

        WeatherRecord {
            location_name: value.name,
            temperature_c: value.main.temp,
            feels_like_c: value.main.feels_like,
            humidity_pct: value.main.humidity,
            condition,
            description,
            icon,
            wind_speed_mps: value.wind.speed,
            observed_at: value.dt.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError> {
        self.fetch_current(query).await
    }
}
