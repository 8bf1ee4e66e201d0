//! Configuration management for the Hamro Weather application
//!
//! Settings are read from environment variables with sensible defaults for
//! everything except the weather API key, which the provider requires.

use crate::HamroWeatherError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Root configuration structure for the Hamro Weather application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HamroWeatherConfig {
    /// Weather provider configuration
    pub weather: WeatherApiConfig,
    /// AI insight configuration
    pub insight: InsightConfig,
    /// Preference storage configuration
    pub storage: StorageConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// OpenWeatherMap API key (required)
    pub api_key: String,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Generative AI insight configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Gemini API key; insights degrade to a fixed hint when absent
    pub api_key: Option<String>,
    /// Base URL for the generative language API
    #[serde(default = "default_insight_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_insight_model")]
    pub model: String,
}

/// Preference storage configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the preference database
    #[serde(default = "default_storage_path")]
    pub path: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_insight_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_insight_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_storage_path() -> String {
    ".hamro-weather".to_string()
}

impl HamroWeatherConfig {
    /// Load configuration from environment variables.
    ///
    /// `OWM_API_KEY` is mandatory; everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OWM_API_KEY").map_err(|_| {
            HamroWeatherError::config("API key missing. Please configure OWM_API_KEY.")
        })?;

        Ok(Self {
            weather: WeatherApiConfig {
                api_key,
                base_url: env::var("OWM_BASE_URL").unwrap_or_else(|_| default_weather_base_url()),
                timeout_seconds: default_weather_timeout(),
            },
            insight: InsightConfig {
                api_key: env::var("GEMINI_API_KEY").ok(),
                base_url: env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| default_insight_base_url()),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| default_insight_model()),
            },
            storage: StorageConfig {
                path: env::var("HAMRO_STORAGE_PATH").unwrap_or_else(|_| default_storage_path()),
            },
        })
    }
}

impl Default for HamroWeatherConfig {
    fn default() -> Self {
        Self {
            weather: WeatherApiConfig {
                api_key: String::new(),
                base_url: default_weather_base_url(),
                timeout_seconds: default_weather_timeout(),
            },
            insight: InsightConfig {
                api_key: None,
                base_url: default_insight_base_url(),
                model: default_insight_model(),
            },
            storage: StorageConfig {
                path: default_storage_path(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HamroWeatherConfig::default();
        assert!(config.weather.base_url.contains("openweathermap"));
        assert_eq!(config.weather.timeout_seconds, 30);
        assert!(config.insight.api_key.is_none());
        assert_eq!(config.storage.path, ".hamro-weather");
    }
}
