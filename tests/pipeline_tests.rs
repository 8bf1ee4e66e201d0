//! End-to-end tests for the forecast aggregation and hazard pipeline

use chrono::{Local, NaiveDate, TimeZone};
use hamro_weather::{
    alerts, merge_daily_metrics, reduce_daily, AirQualityForecastEntry, Condition, Pollutants,
    Sample, Severity, UvForecastEntry,
};

fn ts(day: u32, hour: u32) -> i64 {
    Local
        .with_ymd_and_hms(2026, 9, day, hour, 0, 0)
        .single()
        .unwrap()
        .timestamp()
}

fn forecast_sample(day: u32, hour: u32, code: u16) -> Sample {
    Sample {
        timestamp: ts(day, hour),
        temp: 21.0,
        feels_like: 21.0,
        temp_min: 16.0,
        temp_max: 27.0,
        humidity: 58,
        conditions: vec![Condition {
            code,
            main: "Clouds".to_string(),
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
        }],
        wind_speed: 3.5,
        wind_direction: 150,
        uv_index: None,
        aqi: None,
        pollutants: None,
    }
}

/// Two calendar days of 3-hourly readings: day 1 carries a noon reading,
/// day 2 has nothing in the 11-14 window but readings at hours 10 and 17.
#[test]
fn test_two_day_feed_reduces_to_noon_biased_representatives() {
    let mut feed = Vec::new();
    for hour in [0, 3, 6, 9, 12, 15, 18, 21] {
        feed.push(forecast_sample(1, hour, 802));
    }
    for hour in [1, 4, 7, 10, 17, 19, 20, 23] {
        feed.push(forecast_sample(2, hour, 500));
    }
    assert_eq!(feed.len(), 16);

    let daily = reduce_daily(feed);
    assert_eq!(daily.len(), 2);

    assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
    assert_eq!(daily[0].sample.local_hour(), 12);

    // |10-12| = 2 beats |17-12| = 5
    assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2026, 9, 2).unwrap());
    assert_eq!(daily[1].sample.local_hour(), 10);
}

#[test]
fn test_reduce_merge_classify_pipeline() {
    let mut feed = Vec::new();
    for day in 1..=3 {
        for hour in [6, 9, 12, 15, 18] {
            feed.push(forecast_sample(day, hour, 801));
        }
    }

    let mut daily = reduce_daily(feed);
    assert_eq!(daily.len(), 3);

    let uv_series = vec![
        UvForecastEntry {
            timestamp: ts(1, 12),
            value: 12.5,
        },
        UvForecastEntry {
            timestamp: ts(2, 12),
            value: 4.0,
        },
    ];
    let air_series = vec![
        AirQualityForecastEntry {
            timestamp: ts(1, 15),
            aqi: 5,
            pollutants: Pollutants {
                pm2_5: 120.0,
                ..Pollutants::default()
            },
        },
        AirQualityForecastEntry {
            timestamp: ts(2, 9),
            aqi: 2,
            pollutants: Pollutants::default(),
        },
    ];

    merge_daily_metrics(&mut daily, &uv_series, &air_series);

    assert_eq!(daily[0].sample.uv_index, Some(12.5));
    assert_eq!(daily[0].sample.aqi, Some(5));
    assert_eq!(daily[1].sample.uv_index, Some(4.0));
    assert_eq!(daily[1].sample.aqi, Some(2));
    assert!(daily[2].sample.uv_index.is_none());
    assert!(daily[2].sample.aqi.is_none());

    // Day 1 carries extreme UV and hazardous air; both rules fire in order.
    let alerts = alerts::classify(&daily[0].sample);
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].id, "extreme-uv");
    assert_eq!(alerts[0].severity, Severity::Warning);
    assert_eq!(alerts[1].id, "hazardous-aqi");
    assert_eq!(alerts[1].severity, Severity::Critical);

    // Day 2 is benign.
    assert!(alerts::classify(&daily[1].sample).is_empty());
}

#[test]
fn test_degraded_augmentation_still_classifies_condition_codes() {
    // Both metric series failed upstream; storm codes alone drive alerts.
    let mut daily = reduce_daily(vec![forecast_sample(1, 12, 212)]);
    merge_daily_metrics(&mut daily, &[], &[]);

    assert!(daily[0].sample.uv_index.is_none());
    assert!(daily[0].sample.aqi.is_none());

    let alerts = alerts::classify(&daily[0].sample);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, "thunderstorm");
}
