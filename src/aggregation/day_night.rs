use crate::solar::sun::{SunPositionProvider, SunTimes};
use crate::types::location::LatLon;
use crate::types::observation::HourlyObservation;
use crate::types::record::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate over the daylight or the night hours of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayNightAggregate {
    pub day: bool,
    #[serde(flatten)]
    pub fields: Record,
}

/// Splits the hours of a day into daylight and night hours, both in hour order.
///
/// With sun times an hour is daylight when `sunrise <= t <= sunset`. Without them
/// (polar day or night) the sun altitude at `t` decides.
pub fn split_day_night<'o, S>(
    hours: &[&'o HourlyObservation],
    times: Option<SunTimes>,
    sun: &S,
    location: LatLon,
) -> (Vec<&'o HourlyObservation>, Vec<&'o HourlyObservation>)
where
    S: SunPositionProvider + ?Sized,
{
    hours
        .iter()
        .copied()
        .partition(|obs| is_daylight(obs.timestamp, times, sun, location))
}

fn is_daylight<S>(time: DateTime<Utc>, times: Option<SunTimes>, sun: &S, location: LatLon) -> bool
where
    S: SunPositionProvider + ?Sized,
{
    match times {
        Some(SunTimes { sunrise, sunset }) => sunrise <= time && time <= sunset,
        None => sun.position(time, location.lat(), location.lon()).altitude > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::sun::{SpaSun, SunPosition};
    use chrono::{NaiveDate, TimeDelta, TimeZone, Timelike};

    /// Sun above the horizon from 06:00 to 18:00 UTC, no sun times.
    struct HalfDaySun;

    impl SunPositionProvider for HalfDaySun {
        fn position(&self, time: DateTime<Utc>, _lat: f64, _lon: f64) -> SunPosition {
            let altitude = if (6..18).contains(&time.hour()) { 20.0 } else { -20.0 };
            SunPosition {
                altitude,
                azimuth: 180.0,
            }
        }

        fn times(&self, _date: NaiveDate, _lat: f64, _lon: f64) -> Option<SunTimes> {
            None
        }
    }

    fn day_of_hours() -> Vec<HourlyObservation> {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        (0..24)
            .map(|h| HourlyObservation {
                timestamp: start + TimeDelta::hours(h),
                ..HourlyObservation::default()
            })
            .collect()
    }

    #[test]
    fn test_split_with_sun_times_is_inclusive() {
        let obs = day_of_hours();
        let refs: Vec<&HourlyObservation> = obs.iter().collect();
        let times = SunTimes {
            sunrise: obs[6].timestamp,
            sunset: obs[18].timestamp,
        };
        let (day, night) = split_day_night(&refs, Some(times), &SpaSun, LatLon(52.5, 13.4));
        assert_eq!(day.len(), 13);
        assert_eq!(night.len(), 11);
        assert_eq!(day.first().map(|o| o.timestamp), Some(obs[6].timestamp));
        assert_eq!(night[6].timestamp, obs[19].timestamp);
    }

    #[test]
    fn test_split_without_sun_times_uses_altitude() {
        let obs = day_of_hours();
        let refs: Vec<&HourlyObservation> = obs.iter().collect();
        let (day, night) = split_day_night(&refs, None, &HalfDaySun, LatLon(78.2, 15.6));
        assert_eq!(day.len(), 12);
        assert_eq!(night.len(), 12);
    }

    #[test]
    fn test_split_empty_bucket() {
        let (day, night) = split_day_night(&[], None, &HalfDaySun, LatLon(0.0, 0.0));
        assert!(day.is_empty() && night.is_empty());
    }

    #[test]
    fn test_serializes_flat_with_day_flag() {
        let mut fields = Record::new();
        fields.insert_number("temperature", Some(12.5));
        let json = serde_json::to_value(DayNightAggregate { day: false, fields }).unwrap();
        assert_eq!(json, serde_json::json!({"day": false, "temperature": 12.5}));
    }
}
