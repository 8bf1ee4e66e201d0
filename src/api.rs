//! Weather API client for OpenWeatherMap integration
//!
//! This module provides HTTP client functionality for the current-conditions,
//! forecast, UV-index and air-pollution endpoints. Primary lookups surface
//! typed errors; the augmentation endpoints (UV, air quality and their
//! forecast variants) degrade to absent values or empty series instead of
//! failing the request.

use crate::config::WeatherApiConfig;
use crate::merger::{AirQualityForecastEntry, UvForecastEntry};
use crate::models::{Condition, Coord, CurrentConditions, Pollutants, Sample, Units};
use crate::{HamroWeatherError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Weather API client for OpenWeatherMap
pub struct WeatherApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("HamroWeather/0.1.0")
            .build()
            .map_err(|e| HamroWeatherError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get current conditions for a place-name query.
    ///
    /// A non-success response is fatal; 404 surfaces as a location-not-found
    /// error carrying the query. Alerts and augmentation fields on the result
    /// are empty; the dashboard service fills them in.
    pub async fn current_by_query(&self, query: &str, units: Units) -> Result<CurrentConditions> {
        info!("Fetching current conditions for '{}'", query);
        let url = format!(
            "{}/weather?q={}&units={}&appid={}",
            self.base_url,
            urlencoding::encode(query),
            units.as_query_param(),
            self.api_key
        );
        let response: owm::CurrentResponse = self.fetch(&url, "weather", Some(query)).await?;
        Ok(response.into_current())
    }

    /// Get current conditions for a coordinate.
    pub async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<CurrentConditions> {
        info!("Fetching current conditions for ({:.4}, {:.4})", lat, lon);
        let url = format!(
            "{}/weather?lat={lat}&lon={lon}&units={}&appid={}",
            self.base_url,
            units.as_query_param(),
            self.api_key
        );
        let query = format!("{lat:.4}, {lon:.4}");
        let response: owm::CurrentResponse = self.fetch(&url, "weather", Some(&query)).await?;
        Ok(response.into_current())
    }

    /// Get the 5-day / 3-hourly forecast feed for a coordinate.
    ///
    /// Failure here is fatal and propagates to the caller.
    pub async fn forecast(&self, lat: f64, lon: f64, units: Units) -> Result<Vec<Sample>> {
        info!("Fetching forecast feed for ({:.4}, {:.4})", lat, lon);
        let url = format!(
            "{}/forecast?lat={lat}&lon={lon}&units={}&appid={}",
            self.base_url,
            units.as_query_param(),
            self.api_key
        );
        let response: owm::ForecastResponse = self.fetch(&url, "forecast", None).await?;
        let samples: Vec<Sample> = response
            .list
            .into_iter()
            .map(owm::ForecastItem::into_sample)
            .collect();
        debug!("Forecast feed contains {} readings", samples.len());
        Ok(samples)
    }

    /// Get the current UV index for a coordinate, or `None` on any failure.
    pub async fn uv_index(&self, lat: f64, lon: f64) -> Option<f32> {
        let url = format!("{}/uvi?lat={lat}&lon={lon}&appid={}", self.base_url, self.api_key);
        match self.fetch::<owm::UvResponse>(&url, "uvi", None).await {
            Ok(response) => Some(response.value),
            Err(e) => {
                warn!("Could not fetch UV index: {}", e);
                None
            }
        }
    }

    /// Get the current air-quality category and pollutant breakdown for a
    /// coordinate, or `None` on any failure.
    pub async fn air_quality(&self, lat: f64, lon: f64) -> Option<(u8, Pollutants)> {
        let url = format!(
            "{}/air_pollution?lat={lat}&lon={lon}&appid={}",
            self.base_url, self.api_key
        );
        match self
            .fetch::<owm::AirPollutionResponse>(&url, "air_pollution", None)
            .await
        {
            Ok(response) => response
                .list
                .into_iter()
                .next()
                .map(|item| (item.main.aqi, item.components.into_pollutants())),
            Err(e) => {
                warn!("Could not fetch air quality: {}", e);
                None
            }
        }
    }

    /// Get the day-resolution UV forecast series, or an empty series on any
    /// failure.
    pub async fn uv_forecast(&self, lat: f64, lon: f64) -> Vec<UvForecastEntry> {
        let url = format!(
            "{}/uvi/forecast?lat={lat}&lon={lon}&appid={}",
            self.base_url, self.api_key
        );
        match self
            .fetch::<Vec<owm::UvForecastItem>>(&url, "uvi/forecast", None)
            .await
        {
            Ok(items) => items
                .into_iter()
                .map(|item| UvForecastEntry {
                    timestamp: item.date,
                    value: item.value,
                })
                .collect(),
            Err(e) => {
                warn!("Could not fetch UV forecast: {}", e);
                Vec::new()
            }
        }
    }

    /// Get the hourly air-quality forecast series, or an empty series on any
    /// failure.
    pub async fn air_quality_forecast(&self, lat: f64, lon: f64) -> Vec<AirQualityForecastEntry> {
        let url = format!(
            "{}/air_pollution/forecast?lat={lat}&lon={lon}&appid={}",
            self.base_url, self.api_key
        );
        match self
            .fetch::<owm::AirPollutionResponse>(&url, "air_pollution/forecast", None)
            .await
        {
            Ok(response) => response
                .list
                .into_iter()
                .map(|item| AirQualityForecastEntry {
                    timestamp: item.dt,
                    aqi: item.main.aqi,
                    pollutants: item.components.into_pollutants(),
                })
                .collect(),
            Err(e) => {
                warn!("Could not fetch air quality forecast: {}", e);
                Vec::new()
            }
        }
    }

    /// Issue a GET request and deserialize the JSON body.
    ///
    /// `not_found_query` controls how a 404 is reported: primary lookups pass
    /// the user's query so the error names the failed place.
    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        endpoint: &str,
        not_found_query: Option<&str>,
    ) -> Result<T> {
        debug!("GET {}", endpoint);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HamroWeatherError::api(format!("Network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(match (status.as_u16(), not_found_query) {
                (404, Some(query)) => HamroWeatherError::location_not_found(query),
                (401, _) => HamroWeatherError::api(
                    "Invalid API key. Please check your OpenWeatherMap API key.",
                ),
                _ => HamroWeatherError::api(format!(
                    "Weather API request to {endpoint} failed with status {status}"
                )),
            });
        }

        response.json::<T>().await.map_err(|e| {
            HamroWeatherError::api(format!("Failed to parse {endpoint} response: {e}"))
        })
    }
}

/// OpenWeatherMap API response structures and conversion utilities
mod owm {
    use super::{Condition, Coord, CurrentConditions, Pollutants, Sample};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ConditionEntry {
        pub id: u16,
        pub main: String,
        pub description: String,
        pub icon: String,
    }

    impl From<ConditionEntry> for Condition {
        fn from(entry: ConditionEntry) -> Self {
            Condition {
                code: entry.id,
                main: entry.main,
                description: entry.description,
                icon: entry.icon,
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: f32,
        pub feels_like: f32,
        pub temp_min: f32,
        pub temp_max: f32,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct WindData {
        pub speed: f32,
        #[serde(default)]
        pub deg: f32,
    }

    #[derive(Debug, Deserialize)]
    pub struct SysData {
        #[serde(default)]
        pub country: String,
        pub sunrise: i64,
        pub sunset: i64,
    }

    #[derive(Debug, Deserialize)]
    pub struct CoordData {
        pub lat: f64,
        pub lon: f64,
    }

    /// Current conditions response from the `/weather` endpoint
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub name: String,
        pub coord: CoordData,
        pub main: MainData,
        pub weather: Vec<ConditionEntry>,
        pub wind: WindData,
        pub sys: SysData,
        pub dt: i64,
    }

    impl CurrentResponse {
        pub fn into_current(self) -> CurrentConditions {
            let sample = Sample {
                timestamp: self.dt,
                temp: self.main.temp,
                feels_like: self.main.feels_like,
                temp_min: self.main.temp_min,
                temp_max: self.main.temp_max,
                humidity: self.main.humidity,
                conditions: self.weather.into_iter().map(Condition::from).collect(),
                wind_speed: self.wind.speed,
                wind_direction: wind_degrees(self.wind.deg),
                uv_index: None,
                aqi: None,
                pollutants: None,
            };

            CurrentConditions {
                name: self.name,
                country: self.sys.country,
                coord: Coord {
                    lat: self.coord.lat,
                    lon: self.coord.lon,
                },
                sunrise: self.sys.sunrise,
                sunset: self.sys.sunset,
                sample,
                alerts: Vec::new(),
            }
        }
    }

    /// One 3-hourly entry of the `/forecast` endpoint
    #[derive(Debug, Deserialize)]
    pub struct ForecastItem {
        pub dt: i64,
        pub main: MainData,
        pub weather: Vec<ConditionEntry>,
        pub wind: WindData,
    }

    impl ForecastItem {
        pub fn into_sample(self) -> Sample {
            Sample {
                timestamp: self.dt,
                temp: self.main.temp,
                feels_like: self.main.feels_like,
                temp_min: self.main.temp_min,
                temp_max: self.main.temp_max,
                humidity: self.main.humidity,
                conditions: self.weather.into_iter().map(Condition::from).collect(),
                wind_speed: self.wind.speed,
                wind_direction: wind_degrees(self.wind.deg),
                uv_index: None,
                aqi: None,
                pollutants: None,
            }
        }
    }

    /// Forecast response from the `/forecast` endpoint
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastItem>,
    }

    /// Current UV index from the `/uvi` endpoint
    #[derive(Debug, Deserialize)]
    pub struct UvResponse {
        pub value: f32,
    }

    /// One day of the `/uvi/forecast` endpoint
    #[derive(Debug, Deserialize)]
    pub struct UvForecastItem {
        pub date: i64,
        pub value: f32,
    }

    #[derive(Debug, Deserialize)]
    pub struct AqiMain {
        pub aqi: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct ComponentsEntry {
        #[serde(default)]
        pub co: f32,
        #[serde(default)]
        pub no: f32,
        #[serde(default)]
        pub no2: f32,
        #[serde(default)]
        pub o3: f32,
        #[serde(default)]
        pub so2: f32,
        #[serde(default)]
        pub pm2_5: f32,
        #[serde(default)]
        pub pm10: f32,
        #[serde(default)]
        pub nh3: f32,
    }

    impl ComponentsEntry {
        pub fn into_pollutants(self) -> Pollutants {
            Pollutants {
                co: self.co,
                no: self.no,
                no2: self.no2,
                o3: self.o3,
                so2: self.so2,
                pm2_5: self.pm2_5,
                pm10: self.pm10,
                nh3: self.nh3,
            }
        }
    }

    /// One reading of the `/air_pollution` endpoints
    #[derive(Debug, Deserialize)]
    pub struct AirPollutionItem {
        pub dt: i64,
        pub main: AqiMain,
        pub components: ComponentsEntry,
    }

    /// Response shape shared by `/air_pollution` and its forecast variant
    #[derive(Debug, Deserialize)]
    pub struct AirPollutionResponse {
        pub list: Vec<AirPollutionItem>,
    }

    /// Wind direction arrives as a float; clamp into 0-359 degrees
    pub fn wind_degrees(deg: f32) -> u16 {
        (deg.rem_euclid(360.0)) as u16 % 360
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_wind_degrees_clamping() {
            assert_eq!(wind_degrees(0.0), 0);
            assert_eq!(wind_degrees(359.9), 359);
            assert_eq!(wind_degrees(360.0), 0);
            assert_eq!(wind_degrees(-90.0), 270);
        }

        #[test]
        fn test_current_response_conversion() {
            let json = r#"{
                "name": "Kathmandu",
                "coord": {"lat": 27.7172, "lon": 85.324},
                "main": {"temp": 22.5, "feels_like": 22.0, "temp_min": 18.0,
                         "temp_max": 26.0, "humidity": 65},
                "weather": [{"id": 802, "main": "Clouds",
                             "description": "scattered clouds", "icon": "03d"}],
                "wind": {"speed": 2.5, "deg": 140},
                "sys": {"country": "NP", "sunrise": 1750000000, "sunset": 1750047600},
                "dt": 1750020000
            }"#;
            let response: CurrentResponse = serde_json::from_str(json).unwrap();
            let current = response.into_current();
            assert_eq!(current.name, "Kathmandu");
            assert_eq!(current.country, "NP");
            assert_eq!(current.sample.conditions[0].code, 802);
            assert_eq!(current.sample.wind_direction, 140);
            assert!(current.alerts.is_empty());
            assert!(current.sample.uv_index.is_none());
        }

        #[test]
        fn test_air_pollution_parsing() {
            let json = r#"{
                "list": [{
                    "dt": 1750020000,
                    "main": {"aqi": 3},
                    "components": {"co": 201.9, "no": 0.0, "no2": 1.1,
                                   "o3": 68.7, "so2": 0.6, "pm2_5": 12.4,
                                   "pm10": 15.8, "nh3": 0.9}
                }]
            }"#;
            let response: AirPollutionResponse = serde_json::from_str(json).unwrap();
            let item = &response.list[0];
            assert_eq!(item.main.aqi, 3);
            assert_eq!(item.components.pm2_5, 12.4);
        }
    }
}
