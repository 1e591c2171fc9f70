//! Thresholds shared by the bucket and single-observation classifiers.

use serde::{Deserialize, Serialize};

/// Strong breeze (Beaufort 6, 10.8 m/s) and up, km/h.
pub const WIND_BREEZY: f64 = 38.88;
/// Gale (Beaufort 8, 17.2 m/s) and up, km/h.
pub const WIND_STRONG: f64 = 61.92;
/// Hurricane force (Beaufort 12, 33 m/s), km/h.
pub const WIND_DANGEROUS: f64 = 118.8;

/// Cloud cover (%) from which the sky counts as cloudy.
pub const CLOUD_CLOUDY: f64 = 80.0;
/// Cloud cover (%) from which the sky counts as partly cloudy.
pub const CLOUD_PARTLY: f64 = 30.0;

/// Share of hours above which a condition dominates the bucket.
pub const HEAVY_FRACTION: f64 = 0.35;
/// Share of hours above which a condition is noticeable.
pub const LIGHT_FRACTION: f64 = 0.10;
/// Lower bound (exclusive) of the "possible" band; the upper bound is [`HEAVY_FRACTION`].
pub const POSSIBLE_MIN_FRACTION: f64 = 0.05;
pub const POSSIBLE_MAX_FRACTION: f64 = HEAVY_FRACTION;

pub const MIN_HAIL_HOURS: usize = 1;
pub const MIN_SLEET_HOURS: usize = 2;
pub const MIN_THUNDERSTORM_HOURS: usize = 1;

/// Precipitation-probability window (percent, inclusive) in which a dry reading is
/// shown as "possible rain".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PossibleRainWindow {
    pub min: f64,
    pub max: f64,
}

impl PossibleRainWindow {
    pub fn contains(&self, probability: f64) -> bool {
        (self.min..=self.max).contains(&probability)
    }
}

impl Default for PossibleRainWindow {
    fn default() -> Self {
        Self {
            min: 30.0,
            max: 70.0,
        }
    }
}

/// Whether `fraction` falls in the "possible" band.
pub fn is_possible(fraction: f64) -> bool {
    fraction > POSSIBLE_MIN_FRACTION && fraction <= POSSIBLE_MAX_FRACTION
}
