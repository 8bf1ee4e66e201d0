//! Current conditions model

use super::{HazardAlert, Sample};
use serde::{Deserialize, Serialize};

/// Geographic coordinate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for a resolved place, with augmentation metrics merged
/// in and hazard alerts attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Resolved place name as reported by the provider
    pub name: String,
    /// Country code of the place
    pub country: String,
    /// Coordinate the augmentation fetches use
    pub coord: Coord,
    /// Sunrise time in seconds since epoch
    pub sunrise: i64,
    /// Sunset time in seconds since epoch
    pub sunset: i64,
    /// The merged current reading
    pub sample: Sample,
    /// Hazard alerts classified from the merged reading
    pub alerts: Vec<HazardAlert>,
}
