//! Data models for the Hamro Weather application
//!
//! This module contains the core domain models organized by concern:
//! - Sample: a point-in-time weather reading with optional UV/AQI metrics
//! - DailySample: one reading chosen to represent a calendar day
//! - CurrentConditions: the assembled current reading for a resolved place
//! - HazardAlert: structured warnings derived from the current reading

pub mod alert;
pub mod current;
pub mod daily;
pub mod sample;

// Re-export all public types for convenient access
pub use alert::{HazardAlert, Severity};
pub use current::{Coord, CurrentConditions};
pub use daily::DailySample;
pub use sample::{Condition, Pollutants, Sample, Units};
