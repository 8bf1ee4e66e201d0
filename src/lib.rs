//! Hamro Weather - weather dashboard with hazard alerts and AI insights
//!
//! This library provides the core functionality for the dashboard: fetching
//! current conditions with UV and air-quality augmentation, reducing the
//! 3-hourly forecast feed to daily samples, merging forecast metric series
//! onto them, and classifying hazard alerts.

pub mod alerts;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod insight;
pub mod merger;
pub mod models;
pub mod reducer;
pub mod store;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use config::HamroWeatherConfig;
pub use dashboard::{DashboardService, RequestToken, RequestTracker};
pub use error::HamroWeatherError;
pub use merger::{merge_daily_metrics, AirQualityForecastEntry, UvForecastEntry};
pub use models::{
    Condition, Coord, CurrentConditions, DailySample, HazardAlert, Pollutants, Sample, Severity,
    Units,
};
pub use reducer::{reduce_daily, MAX_FORECAST_DAYS};
pub use store::{PreferencesStore, Theme};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, HamroWeatherError>;
