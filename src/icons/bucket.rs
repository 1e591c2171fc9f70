//! Icon classification over a multi-hour bucket (a day, or one half of a day).

use crate::icons::keys::{AlternateIcon, Classification, DayPart, Icon};
use crate::icons::thresholds::*;
use crate::types::condition::Condition;
use crate::utils::{max, median, present};
use std::collections::HashMap;

/// Statistics the cascades decide on.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketStats {
    pub hours: usize,
    pub max_wind_speed: f64,
    pub median_cloud_cover: Option<f64>,
    counts: HashMap<Condition, usize>,
}

impl BucketStats {
    /// Collects statistics from parallel per-hour columns.
    pub fn from_columns(
        conditions: &[Option<&str>],
        wind_speed: &[Option<f64>],
        cloud_cover: &[Option<f64>],
    ) -> Self {
        let mut counts = HashMap::new();
        for condition in conditions.iter().flatten().filter_map(|c| Condition::parse(c)) {
            *counts.entry(condition).or_insert(0) += 1;
        }
        Self {
            hours: conditions.len(),
            max_wind_speed: max(&present(wind_speed)).unwrap_or(0.0),
            median_cloud_cover: median(&present(cloud_cover)),
            counts,
        }
    }

    pub fn count(&self, condition: Condition) -> usize {
        self.counts.get(&condition).copied().unwrap_or(0)
    }

    /// Occurrences of `condition` per hour of the bucket.
    pub fn fraction(&self, condition: Condition) -> f64 {
        self.count(condition) as f64 / self.hours.max(1) as f64
    }

    fn cloud_at_least(&self, threshold: f64) -> bool {
        self.median_cloud_cover.is_some_and(|c| c >= threshold)
    }
}

fn primary(stats: &BucketStats, part: DayPart) -> Icon {
    let thunder = stats.fraction(Condition::Thunderstorm);
    let obscured = stats.fraction(Condition::Fog) + stats.fraction(Condition::Smoke);

    if stats.max_wind_speed >= WIND_DANGEROUS {
        Icon::Storm
    } else if thunder > HEAVY_FRACTION {
        Icon::Thunderstorm
    } else if thunder > LIGHT_FRACTION
        && stats.count(Condition::Thunderstorm) >= MIN_THUNDERSTORM_HOURS
    {
        Icon::ScatteredThunderstorm
    } else if stats.count(Condition::Hail) >= MIN_HAIL_HOURS {
        Icon::Hail
    } else if stats.fraction(Condition::Snow) > HEAVY_FRACTION {
        Icon::Snow
    } else if stats.count(Condition::Sleet) >= MIN_SLEET_HOURS {
        Icon::Sleet
    } else if stats.fraction(Condition::Rain) > HEAVY_FRACTION {
        Icon::Rain
    } else if stats.max_wind_speed >= WIND_STRONG {
        Icon::Wind
    } else if obscured > HEAVY_FRACTION {
        Icon::Fog
    } else if stats.fraction(Condition::Rain) > LIGHT_FRACTION {
        Icon::LightRain
    } else if stats.cloud_at_least(CLOUD_CLOUDY) {
        Icon::Cloudy
    } else if stats.cloud_at_least(CLOUD_PARTLY) {
        Icon::PartlyCloudy(part)
    } else if part == DayPart::Night {
        Icon::ClearNight
    } else {
        Icon::Sunny
    }
}

fn alternate(stats: &BucketStats, part: DayPart) -> AlternateIcon {
    let thunder = stats.fraction(Condition::Thunderstorm);
    let snow = stats.fraction(Condition::Snow);
    let sleet = stats.fraction(Condition::Sleet);
    let rain = stats.fraction(Condition::Rain);
    let obscured = stats.fraction(Condition::Fog) + stats.fraction(Condition::Smoke);

    if thunder > HEAVY_FRACTION {
        AlternateIcon::Thunderstorm
    } else if is_possible(thunder) {
        AlternateIcon::PossiblyThunderstorm(part)
    } else if snow > HEAVY_FRACTION {
        AlternateIcon::Snow
    } else if is_possible(snow) {
        AlternateIcon::PossiblySnow(part)
    } else if stats.count(Condition::Sleet) >= MIN_SLEET_HOURS
        || stats.count(Condition::Hail) >= MIN_HAIL_HOURS
    {
        AlternateIcon::Sleet
    } else if is_possible(sleet) {
        AlternateIcon::PossiblySleet(part)
    } else if rain > HEAVY_FRACTION {
        AlternateIcon::Rainy
    } else if is_possible(rain) {
        AlternateIcon::PossiblyRainy(part)
    } else if stats.max_wind_speed >= WIND_BREEZY {
        AlternateIcon::Windy
    } else if obscured > HEAVY_FRACTION {
        AlternateIcon::Foggy
    } else if stats.cloud_at_least(CLOUD_CLOUDY) {
        AlternateIcon::Cloudy
    } else if stats.cloud_at_least(CLOUD_PARTLY) {
        AlternateIcon::PartlyCloudy(part)
    } else {
        AlternateIcon::Clear(part)
    }
}

/// Classifies a bucket from its per-hour columns.
///
/// `is_day` is `Some(false)` for a night bucket; whole days and day buckets use the
/// day variants.
pub fn classify_bucket(
    conditions: &[Option<&str>],
    wind_speed: &[Option<f64>],
    cloud_cover: &[Option<f64>],
    is_day: Option<bool>,
) -> Classification {
    let stats = BucketStats::from_columns(conditions, wind_speed, cloud_cover);
    classify_stats(&stats, is_day)
}

pub fn classify_stats(stats: &BucketStats, is_day: Option<bool>) -> Classification {
    let part = DayPart::from_is_day(is_day.unwrap_or(true));
    Classification {
        icon: primary(stats, part),
        alternate: alternate(stats, part),
    }
}
