//! Daily forecast reduction
//!
//! The provider's 5-day forecast feed returns one reading every three hours,
//! eight per day. Rendering all of them would drown the dashboard, so the
//! feed is collapsed to one representative reading per calendar day, picked
//! as close to local noon as the feed allows. This avoids a second request
//! to a separate daily-aggregate endpoint.

use crate::models::{DailySample, Sample};
use tracing::debug;

/// Maximum number of days kept in the reduced forecast
pub const MAX_FORECAST_DAYS: usize = 5;

/// Hour window treated as an immediately acceptable noon representative
const NOON_WINDOW: std::ops::RangeInclusive<u32> = 11..=14;

/// Collapse an ordered sequence of fixed-interval forecast samples into at
/// most one representative per local calendar day, capped at
/// [`MAX_FORECAST_DAYS`] days.
///
/// Selection policy: the first sample seen for a date is stored, either as a
/// noon-window pick (hour 11-14) or as a provisional placeholder so a day is
/// never left unrepresented (e.g. the partial last day of the feed). Any
/// later sample for the same date replaces the stored one iff its hour is
/// strictly closer to 12. Samples for dates beyond the first five distinct
/// ones are dropped.
#[must_use]
pub fn reduce_daily(samples: Vec<Sample>) -> Vec<DailySample> {
    let mut daily: Vec<DailySample> = Vec::with_capacity(MAX_FORECAST_DAYS);

    for sample in samples {
        let date = sample.local_date();
        let hour = sample.local_hour();

        match daily.iter_mut().find(|d| d.date == date) {
            Some(existing) => {
                let stored_distance = noon_distance(existing.sample.local_hour());
                if noon_distance(hour) < stored_distance {
                    existing.sample = sample;
                }
            }
            None => {
                if daily.len() >= MAX_FORECAST_DAYS {
                    // Feed spans more days than the dashboard shows
                    continue;
                }
                if !NOON_WINDOW.contains(&hour) {
                    debug!(%date, hour, "no noon-window sample yet, keeping placeholder");
                }
                daily.push(DailySample { date, sample });
            }
        }
    }

    daily
}

fn noon_distance(hour: u32) -> u32 {
    hour.abs_diff(12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Condition;
    use chrono::{Local, NaiveDate, TimeZone};
    use rstest::rstest;

    fn sample_at(day: u32, hour: u32) -> Sample {
        let timestamp = Local
            .with_ymd_and_hms(2026, 6, day, hour, 0, 0)
            .single()
            .unwrap()
            .timestamp();
        Sample {
            timestamp,
            temp: 20.0 + hour as f32,
            feels_like: 20.0,
            temp_min: 15.0,
            temp_max: 25.0,
            humidity: 50,
            conditions: vec![Condition {
                code: 800,
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
            wind_speed: 2.0,
            wind_direction: 90,
            uv_index: None,
            aqi: None,
            pollutants: None,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, day).unwrap()
    }

    #[test]
    fn test_prefers_noon_sample() {
        let samples = vec![
            sample_at(1, 9),
            sample_at(1, 12),
            sample_at(1, 15),
            sample_at(1, 18),
        ];
        let daily = reduce_daily(samples);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].sample.local_hour(), 12);
    }

    #[test]
    fn test_no_noon_window_picks_nearest() {
        // |9-12| = 3 beats |21-12| = 9
        let daily = reduce_daily(vec![sample_at(1, 9), sample_at(1, 21)]);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].sample.local_hour(), 9);
    }

    #[test]
    fn test_partial_today_keeps_placeholder() {
        // Today's noon slot already passed; the evening reading still
        // represents the day.
        let daily = reduce_daily(vec![sample_at(1, 18), sample_at(1, 21), sample_at(2, 12)]);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, date(1));
        assert_eq!(daily[0].sample.local_hour(), 18);
        assert_eq!(daily[1].sample.local_hour(), 12);
    }

    #[test]
    fn test_one_entry_per_date_ascending() {
        let mut samples = Vec::new();
        for day in 1..=3 {
            for hour in [0, 3, 6, 9, 12, 15, 18, 21] {
                samples.push(sample_at(day, hour));
            }
        }
        let daily = reduce_daily(samples);
        assert_eq!(daily.len(), 3);
        for (i, entry) in daily.iter().enumerate() {
            assert_eq!(entry.date, date(1 + i as u32));
            assert_eq!(entry.sample.local_hour(), 12);
        }
    }

    #[test]
    fn test_truncates_to_five_days() {
        let mut samples = Vec::new();
        for day in 1..=7 {
            samples.push(sample_at(day, 12));
        }
        let daily = reduce_daily(samples);
        assert_eq!(daily.len(), MAX_FORECAST_DAYS);
        assert_eq!(daily.last().unwrap().date, date(5));
    }

    #[test]
    fn test_empty_input() {
        assert!(reduce_daily(Vec::new()).is_empty());
    }

    #[rstest]
    #[case(vec![10, 17], 10)] // |10-12| = 2 < |17-12| = 5
    #[case(vec![15, 11], 11)] // strict improvement replaces
    #[case(vec![13, 11], 13)] // equal distance keeps the stored sample
    fn test_tie_break(#[case] hours: Vec<u32>, #[case] expected: u32) {
        let samples = hours.into_iter().map(|h| sample_at(1, h)).collect();
        let daily = reduce_daily(samples);
        assert_eq!(daily[0].sample.local_hour(), expected);
    }
}
