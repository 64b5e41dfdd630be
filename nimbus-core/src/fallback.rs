use std::collections::HashMap;

use crate::model::WeatherRecord;

/// Read-only table of canned weather for a handful of well-known cities,
/// used when the live fetch fails. Keys are normalized city names.
#[derive(Debug, Clone)]
pub struct FallbackStore {
    entries: HashMap<&'static str, WeatherRecord>,
}

fn canned(
    name: &str,
    temp: f64,
    feels_like: f64,
    humidity: u8,
    condition: &str,
    description: &str,
    icon: &str,
    wind: f64,
) -> WeatherRecord {
    WeatherRecord {
        location_name: name.to_string(),
        temperature_c: temp,
        feels_like_c: feels_like,
        humidity_pct: humidity,
        condition: condition.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        wind_speed_mps: wind,
        observed_at: None,
    }
}

impl Default for FallbackStore {
    fn default() -> Self {
        let entries = HashMap::from([
            ("london", canned("London", 15.0, 13.0, 78, "Clouds", "overcast clouds", "04d", 4.2)),
            ("new york", canned("New York", 22.0, 24.0, 65, "Clear", "clear sky", "01d", 3.1)),
            ("tokyo", canned("Tokyo", 28.0, 31.0, 85, "Rain", "light rain", "10d", 2.5)),
            ("paris", canned("Paris", 18.0, 17.0, 70, "Clouds", "few clouds", "02d", 3.8)),
        ]);

        Self { entries }
    }
}

impl FallbackStore {
    /// Look up a canned record by city name. Input is trimmed and
    /// case-folded before the lookup; no other normalization is applied.
    pub fn lookup(&self, city: &str) -> Option<&WeatherRecord> {
        let key = city.trim().to_lowercase();
        self.entries.get(key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_trims() {
        let store = FallbackStore::default();

        let record = store.lookup("  LONDON ").expect("london must be canned");
        assert_eq!(record.location_name, "London");
        assert_eq!(record.temperature_c, 15.0);
        assert_eq!(record.humidity_pct, 78);
        assert_eq!(record.description, "overcast clouds");
        assert_eq!(record.observed_at, None);
    }

    #[test]
    fn lookup_handles_multi_word_cities() {
        let store = FallbackStore::default();

        let record = store.lookup("New York").expect("new york must be canned");
        assert_eq!(record.location_name, "New York");
        assert_eq!(record.icon, "01d");
    }

    #[test]
    fn unknown_city_is_absent() {
        let store = FallbackStore::default();
        assert!(store.lookup("Atlantis").is_none());
    }

    #[test]
    fn all_four_cities_are_present() {
        let store = FallbackStore::default();
        for city in ["london", "new york", "tokyo", "paris"] {
            assert!(store.lookup(city).is_some(), "missing canned city: {city}");
        }
    }
}
