//! Daily metric merging
//!
//! UV-index and air-quality forecasts come from separate endpoints with
//! their own cadences: the UV series is day-resolution, the air-quality
//! series is hourly. Both are aligned onto the reduced daily samples by
//! local calendar date. Either series may be empty when the provider does
//! not support the endpoint or the request failed; merging then leaves the
//! corresponding fields absent.

use crate::models::{DailySample, Pollutants};
use chrono::{DateTime, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

/// One entry of the day-resolution UV-index forecast series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UvForecastEntry {
    /// Day-resolution timestamp in seconds since epoch
    pub timestamp: i64,
    /// Forecast UV index for that day
    pub value: f32,
}

/// One entry of the hourly air-quality forecast series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityForecastEntry {
    /// Hourly timestamp in seconds since epoch
    pub timestamp: i64,
    /// Air quality index, 1 (Good) to 5 (Very Poor)
    pub aqi: u8,
    /// Pollutant concentrations for the hour
    pub pollutants: Pollutants,
}

fn local_time(timestamp: i64) -> DateTime<Local> {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
}

fn local_date(timestamp: i64) -> NaiveDate {
    local_time(timestamp).date_naive()
}

/// Attach UV-index and air-quality metrics onto the matching daily samples.
///
/// A UV entry matches on equal local calendar date; the series carries at
/// most one entry per date, so the first match wins. Air-quality entries
/// match on date too, preferring the first one at local hour >= 12 (an
/// afternoon reading pairs better with the noon-biased daily sample) and
/// falling back to the first same-date entry. No daily samples are added or
/// removed.
pub fn merge_daily_metrics(
    days: &mut [DailySample],
    uv_series: &[UvForecastEntry],
    air_series: &[AirQualityForecastEntry],
) {
    for day in days.iter_mut() {
        if let Some(uv) = uv_series.iter().find(|e| local_date(e.timestamp) == day.date) {
            day.sample.uv_index = Some(uv.value);
        }

        let same_date = || air_series.iter().filter(|e| local_date(e.timestamp) == day.date);
        let picked = same_date()
            .find(|e| local_time(e.timestamp).hour() >= 12)
            .or_else(|| same_date().next());

        if let Some(air) = picked {
            day.sample.aqi = Some(air.aqi);
            day.sample.pollutants = Some(air.pollutants.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, Sample};
    use chrono::TimeZone;

    fn ts(day: u32, hour: u32) -> i64 {
        Local
            .with_ymd_and_hms(2026, 6, day, hour, 0, 0)
            .single()
            .unwrap()
            .timestamp()
    }

    fn daily_sample(day: u32, hour: u32) -> DailySample {
        let sample = Sample {
            timestamp: ts(day, hour),
            temp: 22.0,
            feels_like: 22.0,
            temp_min: 18.0,
            temp_max: 26.0,
            humidity: 55,
            conditions: vec![Condition {
                code: 800,
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
            wind_speed: 3.0,
            wind_direction: 200,
            uv_index: None,
            aqi: None,
            pollutants: None,
        };
        DailySample::new(sample)
    }

    #[test]
    fn test_empty_series_is_noop() {
        let mut days = vec![daily_sample(1, 12), daily_sample(2, 12)];
        merge_daily_metrics(&mut days, &[], &[]);
        assert_eq!(days.len(), 2);
        for day in &days {
            assert!(day.sample.uv_index.is_none());
            assert!(day.sample.aqi.is_none());
            assert!(day.sample.pollutants.is_none());
        }
    }

    #[test]
    fn test_uv_matches_by_date() {
        let mut days = vec![daily_sample(1, 12), daily_sample(2, 12)];
        let uv = vec![
            UvForecastEntry {
                timestamp: ts(2, 12),
                value: 7.5,
            },
            UvForecastEntry {
                timestamp: ts(3, 12),
                value: 9.0,
            },
        ];
        merge_daily_metrics(&mut days, &uv, &[]);
        assert!(days[0].sample.uv_index.is_none());
        assert_eq!(days[1].sample.uv_index, Some(7.5));
    }

    #[test]
    fn test_aqi_prefers_afternoon_entry() {
        let mut days = vec![daily_sample(1, 12)];
        let air = vec![
            AirQualityForecastEntry {
                timestamp: ts(1, 8),
                aqi: 2,
                pollutants: Pollutants::default(),
            },
            AirQualityForecastEntry {
                timestamp: ts(1, 14),
                aqi: 4,
                pollutants: Pollutants {
                    pm2_5: 35.0,
                    ..Pollutants::default()
                },
            },
        ];
        merge_daily_metrics(&mut days, &[], &air);
        assert_eq!(days[0].sample.aqi, Some(4));
        assert_eq!(days[0].sample.pollutants.as_ref().unwrap().pm2_5, 35.0);
    }

    #[test]
    fn test_aqi_falls_back_to_first_morning_entry() {
        let mut days = vec![daily_sample(1, 12)];
        let air = vec![
            AirQualityForecastEntry {
                timestamp: ts(1, 6),
                aqi: 3,
                pollutants: Pollutants::default(),
            },
            AirQualityForecastEntry {
                timestamp: ts(1, 9),
                aqi: 1,
                pollutants: Pollutants::default(),
            },
        ];
        merge_daily_metrics(&mut days, &[], &air);
        assert_eq!(days[0].sample.aqi, Some(3));
    }

    #[test]
    fn test_unmatched_dates_stay_absent() {
        let mut days = vec![daily_sample(1, 12)];
        let uv = vec![UvForecastEntry {
            timestamp: ts(4, 12),
            value: 6.0,
        }];
        let air = vec![AirQualityForecastEntry {
            timestamp: ts(4, 13),
            aqi: 5,
            pollutants: Pollutants::default(),
        }];
        merge_daily_metrics(&mut days, &uv, &air);
        assert!(days[0].sample.uv_index.is_none());
        assert!(days[0].sample.aqi.is_none());
    }
}
