//! Dashboard request orchestration
//!
//! Assembles the data one dashboard render needs: the current conditions
//! with UV/air-quality metrics merged in and hazard alerts attached, and the
//! reduced five-day forecast with its own metrics merged on. Augmentation
//! fetches run in parallel and tolerate partial failure; only the primary
//! current-conditions and forecast lookups are fatal.
//!
//! A [`RequestTracker`] hands out monotonically increasing generation tokens
//! so the presentation layer can discard a late-arriving stale response when
//! a newer request (unit toggle, rapid successive searches) has superseded
//! it.

use crate::alerts;
use crate::api::WeatherApiClient;
use crate::config::HamroWeatherConfig;
use crate::merger::merge_daily_metrics;
use crate::models::{CurrentConditions, DailySample, Units};
use crate::reducer::reduce_daily;
use crate::{HamroWeatherError, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Generation token identifying one dashboard request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Issues and validates request generation tokens.
///
/// In-flight requests are not cancelled; instead, each request records a
/// token at issue time and the caller applies the response only while that
/// token is still the latest one issued.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new request, superseding all earlier ones
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a response carrying this token may still be applied
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

/// Orchestrates the fetch/reduce/merge/classify pipeline for one dashboard
pub struct DashboardService {
    client: WeatherApiClient,
    tracker: RequestTracker,
}

impl DashboardService {
    /// Create a new dashboard service from configuration
    pub fn new(config: &HamroWeatherConfig) -> Result<Self> {
        Ok(Self {
            client: WeatherApiClient::new(&config.weather)?,
            tracker: RequestTracker::new(),
        })
    }

    /// The request tracker guarding against stale responses
    #[must_use]
    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Fetch current conditions for a place-name query, augment with UV and
    /// air-quality metrics, and classify hazard alerts.
    ///
    /// An empty query is rejected before any request is issued.
    pub async fn current_by_query(
        &self,
        query: &str,
        units: Units,
    ) -> Result<CurrentConditions> {
        let query = query.trim();
        if query.is_empty() {
            return Err(HamroWeatherError::validation("Search query cannot be empty"));
        }

        let current = self.client.current_by_query(query, units).await?;
        Ok(self.augment(current).await)
    }

    /// Fetch current conditions for a coordinate, augment and classify.
    pub async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<CurrentConditions> {
        let current = self.client.current_by_coords(lat, lon, units).await?;
        Ok(self.augment(current).await)
    }

    /// Fetch the forecast feed for a coordinate, reduce it to daily samples
    /// and merge the UV and air-quality forecast series onto them.
    ///
    /// The primary forecast fetch is fatal on failure; the two metric series
    /// degrade to empty and leave the corresponding fields absent.
    pub async fn forecast(&self, lat: f64, lon: f64, units: Units) -> Result<Vec<DailySample>> {
        let samples = self.client.forecast(lat, lon, units).await?;

        let (uv_series, air_series) = tokio::join!(
            self.client.uv_forecast(lat, lon),
            self.client.air_quality_forecast(lat, lon),
        );
        debug!(
            "Merging {} UV and {} air-quality forecast entries",
            uv_series.len(),
            air_series.len()
        );

        let mut daily = reduce_daily(samples);
        merge_daily_metrics(&mut daily, &uv_series, &air_series);

        info!("Reduced forecast to {} daily samples", daily.len());
        Ok(daily)
    }

    /// Attach UV index, air quality and pollutants to the current reading,
    /// then classify hazard alerts on the merged result.
    ///
    /// Both augmentation fetches run concurrently and degrade independently;
    /// classification waits for both because its thresholds read the merged
    /// fields.
    async fn augment(&self, mut current: CurrentConditions) -> CurrentConditions {
        let (lat, lon) = (current.coord.lat, current.coord.lon);

        let (uv, air) = tokio::join!(
            self.client.uv_index(lat, lon),
            self.client.air_quality(lat, lon),
        );

        current.sample.uv_index = uv;
        if let Some((aqi, pollutants)) = air {
            current.sample.aqi = Some(aqi);
            current.sample.pollutants = Some(pollutants);
        }

        current.alerts = alerts::classify(&current.sample);
        if !current.alerts.is_empty() {
            info!(
                "Classified {} hazard alert(s) for {}",
                current.alerts.len(),
                current.name
            );
        }

        current
    }
}
