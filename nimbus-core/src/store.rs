use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

/// Key under which the last searched city is persisted.
pub const LAST_CITY_KEY: &str = "last_city";

/// Minimal durable key-value slot. One synchronous call per operation;
/// callers treat failures as log-only, never fatal.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: each key is a small file in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the platform data directory.
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::new(crate::config::Config::data_dir()?))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store entry: {}", path.display()))?;

        Ok(Some(value.trim_end_matches('\n').to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create store directory: {}", self.dir.display())
        })?;

        let path = self.key_path(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write store entry: {}", path.display()))?;

        Ok(())
    }
}

/// Read the persisted last city, swallowing store failures with a warning.
pub fn load_last_city(store: &dyn KvStore) -> Option<String> {
    match store.get(LAST_CITY_KEY) {
        Ok(value) => value.filter(|v| !v.trim().is_empty()),
        Err(err) => {
            tracing::warn!(error = %err, "could not load last searched city");
            None
        }
    }
}

/// Persist the last searched city, swallowing store failures with a
/// warning. Never surfaced to the user.
pub fn save_last_city(store: &dyn KvStore, city: &str) {
    if let Err(err) = store.set(LAST_CITY_KEY, city) {
        tracing::warn!(error = %err, "could not save last searched city");
    }
}
