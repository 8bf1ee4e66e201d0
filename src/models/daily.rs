//! Daily forecast representative model

use super::Sample;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A [`Sample`] chosen to represent one calendar day of a multi-day forecast.
///
/// At most one exists per distinct local calendar date, and a reduced
/// forecast holds at most five, ordered by increasing timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySample {
    /// The local calendar date this sample represents
    pub date: NaiveDate,
    /// The representative reading for the day
    pub sample: Sample,
}

impl DailySample {
    /// Wrap a sample, deriving the date from its local timestamp
    #[must_use]
    pub fn new(sample: Sample) -> Self {
        Self {
            date: sample.local_date(),
            sample,
        }
    }
}
