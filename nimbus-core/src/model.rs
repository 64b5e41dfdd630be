use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the user asked for: a city by name, or a point on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl WeatherQuery {
    pub fn city(name: impl Into<String>) -> Self {
        WeatherQuery::City(name.into())
    }
}

/// Snapshot of conditions for one location at fetch time.
///
/// Numeric fields keep the precision the source gave us; rounding is the
/// presenter's job. `observed_at` is `None` for canned fallback entries,
/// which have no observation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    /// Condition group, e.g. "Clouds".
    pub condition: String,
    /// Human-readable detail, e.g. "overcast clouds".
    pub description: String,
    /// OpenWeather icon code, e.g. "04d".
    pub icon: String,
    pub wind_speed_mps: f64,
    pub observed_at: Option<DateTime<Utc>>,
}
