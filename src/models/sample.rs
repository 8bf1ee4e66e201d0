//! Point-in-time weather reading and related value types

use chrono::{DateTime, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

/// Unit system requested from the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    /// Query-parameter value understood by the provider
    #[must_use]
    pub fn as_query_param(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature suffix for display
    #[must_use]
    pub fn temperature_symbol(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    /// Wind speed unit for display
    #[must_use]
    pub fn wind_speed_unit(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

/// One weather condition descriptor as reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    /// Numeric condition code (e.g. 781 = tornado)
    pub code: u16,
    /// Short category ("Rain", "Clear", ...)
    pub main: String,
    /// Human-readable description
    pub description: String,
    /// Provider icon identifier
    pub icon: String,
}

/// Pollutant concentrations in micrograms per cubic metre
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pollutants {
    pub co: f32,
    pub no: f32,
    pub no2: f32,
    pub o3: f32,
    pub so2: f32,
    pub pm2_5: f32,
    pub pm10: f32,
    pub nh3: f32,
}

/// A point-in-time weather reading, current or forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Observation time in seconds since epoch
    pub timestamp: i64,
    /// Temperature in the caller-selected unit system
    pub temp: f32,
    /// Perceived temperature
    pub feels_like: f32,
    /// Minimum temperature for the reading window
    pub temp_min: f32,
    /// Maximum temperature for the reading window
    pub temp_max: f32,
    /// Relative humidity (0-100)
    pub humidity: u8,
    /// Condition descriptors, never empty; the first entry is primary
    pub conditions: Vec<Condition>,
    /// Wind speed in the caller-selected unit system
    pub wind_speed: f32,
    /// Wind direction in degrees (0-359)
    pub wind_direction: u16,
    /// UV index, absent when the provider endpoint fails or is unsupported
    pub uv_index: Option<f32>,
    /// Air quality index, 1 (Good) to 5 (Very Poor)
    pub aqi: Option<u8>,
    /// Pollutant breakdown accompanying the AQI
    pub pollutants: Option<Pollutants>,
}

impl Sample {
    /// Observation time in the local timezone
    #[must_use]
    pub fn local_time(&self) -> DateTime<Local> {
        DateTime::from_timestamp(self.timestamp, 0)
            .unwrap_or_default()
            .with_timezone(&Local)
    }

    /// Local calendar date of the observation
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.local_time().date_naive()
    }

    /// Local hour of day (0-23) of the observation
    #[must_use]
    pub fn local_hour(&self) -> u32 {
        self.local_time().hour()
    }

    /// The primary condition descriptor, if the provider sent any
    #[must_use]
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.conditions.first()
    }

    /// Convert wind direction from degrees to a cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
        match degrees {
            0..=11 | 349..=360 => "N",
            12..=33 => "NNE",
            34..=56 => "NE",
            57..=78 => "ENE",
            79..=101 => "E",
            102..=123 => "ESE",
            124..=146 => "SE",
            147..=168 => "SSE",
            169..=191 => "S",
            192..=213 => "SSW",
            214..=236 => "SW",
            237..=258 => "WSW",
            259..=281 => "W",
            282..=303 => "WNW",
            304..=326 => "NW",
            327..=348 => "NNW",
            _ => "Unknown",
        }
    }

    /// Format wind information for display
    #[must_use]
    pub fn format_wind(&self, units: Units) -> String {
        let direction = Self::wind_direction_to_cardinal(self.wind_direction);
        format!(
            "{:.1} {} {}",
            self.wind_speed,
            units.wind_speed_unit(),
            direction
        )
    }
}
