//! Durable preference storage
//!
//! Persists the presentation layer's small bits of state between runs: the
//! theme preference and the recent search history. The history keeps the
//! five most recent place names, most recent first, deduplicated
//! case-insensitively.

use crate::models::Units;
use crate::{HamroWeatherError, Result};
use fjall::Keyspace;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;
use tokio::task;

const THEME_KEY: &str = "theme";
const HISTORY_KEY: &str = "search_history";
const UNITS_KEY: &str = "units";

/// Maximum number of remembered searches
pub const HISTORY_LIMIT: usize = 5;

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Preference store backed by a local key/value database
pub struct PreferencesStore {
    store: Keyspace,
}

impl PreferencesStore {
    /// Open (or create) the preference database at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(|e| HamroWeatherError::storage(format!("Failed to open database: {e}")))?;
        let store = db
            .keyspace("preferences", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| HamroWeatherError::storage(format!("Failed to open keyspace: {e}")))?;
        Ok(Self { store })
    }

    /// Read the stored theme preference, if any
    pub async fn theme(&self) -> Result<Option<Theme>> {
        self.get(THEME_KEY).await
    }

    /// Persist the theme preference
    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.put(THEME_KEY, theme).await
    }

    /// Read the stored unit-system preference, if any
    pub async fn units(&self) -> Result<Option<Units>> {
        self.get(UNITS_KEY).await
    }

    /// Persist the unit-system preference
    pub async fn set_units(&self, units: Units) -> Result<()> {
        self.put(UNITS_KEY, units).await
    }

    /// Read the search history, most recent first
    pub async fn history(&self) -> Result<Vec<String>> {
        Ok(self.get(HISTORY_KEY).await?.unwrap_or_default())
    }

    /// Record a search, moving it to the front of the history.
    ///
    /// Earlier entries matching case-insensitively are dropped, and the
    /// history is capped at [`HISTORY_LIMIT`]. Returns the updated history.
    pub async fn record_search(&self, name: &str) -> Result<Vec<String>> {
        let mut history = self.history().await?;
        history.retain(|entry| !entry.eq_ignore_ascii_case(name));
        history.insert(0, name.to_string());
        history.truncate(HISTORY_LIMIT);
        self.put(HISTORY_KEY, history.clone()).await?;
        Ok(history)
    }

    /// Remove all remembered searches
    pub async fn clear_history(&self) -> Result<()> {
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(HISTORY_KEY.as_bytes().to_vec()))
            .await
            .map_err(|e| HamroWeatherError::storage(format!("Storage task failed: {e}")))?
            .map_err(|e| HamroWeatherError::storage(format!("Failed to remove key: {e}")))?;
        Ok(())
    }

    async fn put<T: Serialize + Send + 'static>(&self, key: &str, value: T) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let bytes = postcard::to_stdvec(&value)
            .map_err(|e| HamroWeatherError::storage(format!("Failed to encode value: {e}")))?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(|e| HamroWeatherError::storage(format!("Storage task failed: {e}")))?
            .map_err(|e| HamroWeatherError::storage(format!("Failed to write key: {e}")))?;
        Ok(())
    }

    async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();

        let maybe_bytes = task::spawn_blocking(move || {
            store.get(key).map(|maybe| maybe.map(|v| v.to_vec()))
        })
        .await
        .map_err(|e| HamroWeatherError::storage(format!("Storage task failed: {e}")))?
        .map_err(|e| HamroWeatherError::storage(format!("Failed to read key: {e}")))?;

        match maybe_bytes {
            Some(bytes) => {
                let value = postcard::from_bytes(&bytes).map_err(|e| {
                    HamroWeatherError::storage(format!("Failed to decode value: {e}"))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}
