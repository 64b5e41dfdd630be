use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use nimbus_core::{
    Config, FallbackStore, FileStore, OpenWeatherClient, Outcome, QueryError, Resolver,
    WeatherQuery, WeatherSource,
    store::{load_last_city, save_last_city},
};

use crate::output::{ConsolePresenter, Presenter};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "nimbus", version, about = "City weather lookup with offline fallback")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name. If absent, prompts with the last searched city
        /// pre-filled.
        city: Option<String>,
    },

    /// Show current weather for a coordinate pair.
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Store the OpenWeather API key.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut presenter = ConsolePresenter;

        match self.command {
            Command::Show { city } => show(city, &mut presenter).await,
            Command::Locate { lat, lon } => locate(lat, lon, &mut presenter).await,
            Command::Configure => configure(),
        }
    }
}

/// The last-search slot is best-effort: a missing platform data directory
/// only costs the pre-filled prompt.
fn open_store() -> Option<FileStore> {
    match FileStore::in_data_dir() {
        Ok(store) => Some(store),
        Err(err) => {
            warn!(error = %err, "last-search store unavailable");
            None
        }
    }
}

fn build_resolver(config: &Config) -> Resolver {
    Resolver::new(
        Box::new(OpenWeatherClient::from_config(config)),
        FallbackStore::default(),
    )
}

async fn show(city: Option<String>, presenter: &mut dyn Presenter) -> Result<()> {
    let config = Config::load()?;
    let store = open_store();

    let city = match city {
        Some(city) => city,
        None => prompt_for_city(store.as_ref())?,
    };

    let resolver = build_resolver(&config);
    run_search(&resolver, store.as_ref(), &city, presenter).await
}

/// Resolve one city search, render the outcome, and persist the city when
/// a record was shown. Live and Degraded outcomes write the last-search
/// slot; Unavailable and rejected input do not.
async fn run_search(
    resolver: &Resolver,
    store: Option<&FileStore>,
    city: &str,
    presenter: &mut dyn Presenter,
) -> Result<()> {
    presenter.show_loading();

    match resolver.resolve(city).await {
        Ok(outcome) => {
            match &outcome {
                Outcome::Live(record) => presenter.show_weather(record),
                Outcome::Degraded { record, reason } => {
                    presenter.show_weather(record);
                    presenter.show_error(reason.advisory(), false);
                }
                Outcome::Unavailable => {
                    presenter.show_error(Outcome::UNAVAILABLE_MESSAGE, true);
                }
            }

            if outcome.record().is_some() {
                if let Some(store) = store {
                    save_last_city(store, city.trim());
                }
            }
        }
        Err(QueryError::EmptyQuery) => {
            presenter.show_error("Please enter a city name", true);
        }
    }

    Ok(())
}

fn prompt_for_city(store: Option<&FileStore>) -> Result<String> {
    let last = store.and_then(|s| load_last_city(s)).unwrap_or_default();

    inquire::Text::new("City:")
        .with_initial_value(&last)
        .prompt()
        .context("City prompt was cancelled")
}

/// Coordinate lookups go straight to the source: there is no city key to
/// consult the fallback table with.
async fn locate(lat: f64, lon: f64, presenter: &mut dyn Presenter) -> Result<()> {
    let config = Config::load()?;
    let client = OpenWeatherClient::from_config(&config);

    presenter.show_loading();

    match client.fetch(&WeatherQuery::Coordinates { lat, lon }).await {
        Ok(record) => presenter.show_weather(&record),
        Err(err) => {
            warn!(lat, lon, error = %err, "coordinate lookup failed");
            presenter.show_error("Weather data not available for this location.", true);
        }
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .prompt()
        .context("API key prompt was cancelled")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nimbus_core::{FetchError, WeatherRecord};

    /// Presenter that records every call instead of printing.
    #[derive(Debug, Default)]
    struct RecordingPresenter {
        loading: usize,
        weather: Vec<WeatherRecord>,
        errors: Vec<(String, bool)>,
    }

    impl Presenter for RecordingPresenter {
        fn show_loading(&mut self) {
            self.loading += 1;
        }

        fn show_weather(&mut self, record: &WeatherRecord) {
            self.weather.push(record.clone());
        }

        fn show_error(&mut self, message: &str, blocking: bool) {
            self.errors.push((message.to_string(), blocking));
        }
    }

    #[derive(Debug)]
    struct LiveSource(WeatherRecord);

    #[async_trait]
    impl WeatherSource for LiveSource {
        async fn fetch(&self, _query: &WeatherQuery) -> Result<WeatherRecord, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct DownSource;

    #[async_trait]
    impl WeatherSource for DownSource {
        async fn fetch(&self, _query: &WeatherQuery) -> Result<WeatherRecord, FetchError> {
            Err(FetchError::NotFound)
        }
    }

    fn live_resolver() -> Resolver {
        let record = FallbackStore::default().lookup("tokyo").unwrap().clone();
        Resolver::new(Box::new(LiveSource(record)), FallbackStore::default())
    }

    fn down_resolver() -> Resolver {
        Resolver::new(Box::new(DownSource), FallbackStore::default())
    }

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn live_resolution_persists_city_for_the_next_prompt() {
        let (_dir, store) = temp_store();
        let mut presenter = RecordingPresenter::default();

        run_search(&live_resolver(), Some(&store), "Tokyo", &mut presenter)
            .await
            .unwrap();

        assert_eq!(presenter.loading, 1);
        assert_eq!(presenter.weather.len(), 1);
        assert!(presenter.errors.is_empty());
        // What the next `show` prompt would pre-fill.
        assert_eq!(load_last_city(&store), Some("Tokyo".to_string()));
    }

    #[tokio::test]
    async fn degraded_resolution_persists_city_and_shows_advisory() {
        let (_dir, store) = temp_store();
        let mut presenter = RecordingPresenter::default();

        run_search(&down_resolver(), Some(&store), "  London ", &mut presenter)
            .await
            .unwrap();

        assert_eq!(presenter.weather.len(), 1);
        assert_eq!(presenter.weather[0].location_name, "London");
        assert_eq!(
            presenter.errors,
            vec![("Using offline data - API unavailable".to_string(), false)]
        );
        // Persisted trimmed, so the pre-fill is clean.
        assert_eq!(load_last_city(&store), Some("London".to_string()));
    }

    #[tokio::test]
    async fn unavailable_resolution_persists_nothing() {
        let (_dir, store) = temp_store();
        let mut presenter = RecordingPresenter::default();

        run_search(&down_resolver(), Some(&store), "Atlantis", &mut presenter)
            .await
            .unwrap();

        assert!(presenter.weather.is_empty());
        assert_eq!(
            presenter.errors,
            vec![(Outcome::UNAVAILABLE_MESSAGE.to_string(), true)]
        );
        assert_eq!(load_last_city(&store), None);
    }

    #[tokio::test]
    async fn empty_query_persists_nothing_and_prompts_for_a_city() {
        let (_dir, store) = temp_store();
        let mut presenter = RecordingPresenter::default();

        run_search(&down_resolver(), Some(&store), "   ", &mut presenter)
            .await
            .unwrap();

        assert!(presenter.weather.is_empty());
        assert_eq!(
            presenter.errors,
            vec![("Please enter a city name".to_string(), true)]
        );
        assert_eq!(load_last_city(&store), None);
    }

    #[tokio::test]
    async fn missing_store_is_not_fatal() {
        let mut presenter = RecordingPresenter::default();

        run_search(&live_resolver(), None, "Tokyo", &mut presenter)
            .await
            .unwrap();

        assert_eq!(presenter.weather.len(), 1);
    }
}
