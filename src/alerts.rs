//! Hazard classification
//!
//! Inspects a current reading's primary condition code and environmental
//! metrics and emits structured alerts. Classification is a pure function of
//! the reading; no historical state is consulted. Output order is rule
//! evaluation order, not severity order, and every rule carries a fixed
//! identifier so the presentation layer can track dismissal across
//! re-renders.

use crate::models::{HazardAlert, Sample, Severity};

/// Originator label stamped on every generated alert
pub const ALERT_SENDER: &str = "Hamro Weather Monitor";

/// UV index at or above which the extreme-UV rule fires
pub const EXTREME_UV_THRESHOLD: f32 = 11.0;

/// AQI category at or above which the hazardous-air rule fires
pub const HAZARDOUS_AQI_THRESHOLD: u8 = 5;

fn alert(id: &str, event: &str, severity: Severity, description: &str) -> HazardAlert {
    HazardAlert {
        id: id.to_string(),
        event: event.to_string(),
        sender_name: ALERT_SENDER.to_string(),
        description: description.to_string(),
        severity,
        start: None,
        end: None,
    }
}

/// Classify the current reading into zero or more hazard alerts.
pub fn classify(sample: &Sample) -> Vec<HazardAlert> {
    let mut alerts = Vec::new();

    let code = sample.primary_condition().map(|c| c.code);

    if let Some(code) = code {
        if (200..=232).contains(&code) {
            alerts.push(alert(
                "thunderstorm",
                "Thunderstorm Warning",
                Severity::Warning,
                "Thunderstorm conditions detected in the area. Stay indoors and avoid open ground.",
            ));
        }

        if code == 781 {
            alerts.push(alert(
                "tornado",
                "Tornado Warning",
                Severity::Critical,
                "Tornado conditions reported. Seek sturdy shelter immediately.",
            ));
        }

        if code == 771 {
            alerts.push(alert(
                "squall",
                "Wind Squall Advisory",
                Severity::Advisory,
                "Sudden strong wind squalls possible. Secure loose objects outdoors.",
            ));
        }

        if matches!(code, 502 | 503 | 504) {
            alerts.push(alert(
                "heavy-rain",
                "Heavy Rain Warning",
                Severity::Warning,
                "Very heavy rainfall expected. Flooding is possible in low-lying areas.",
            ));
        }
    }

    if let Some(uv) = sample.uv_index {
        if uv >= EXTREME_UV_THRESHOLD {
            alerts.push(alert(
                "extreme-uv",
                "Extreme UV Alert",
                Severity::Warning,
                "UV radiation is at extreme levels. Avoid sun exposure during midday hours.",
            ));
        }
    }

    if let Some(aqi) = sample.aqi {
        if aqi >= HAZARDOUS_AQI_THRESHOLD {
            alerts.push(alert(
                "hazardous-aqi",
                "Hazardous Air Quality",
                Severity::Critical,
                "Air quality is very poor. Limit outdoor activity and consider wearing a mask.",
            ));
        }
    }

    alerts
}
