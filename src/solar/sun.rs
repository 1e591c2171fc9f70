//! Sun position and sunrise/sunset, behind a provider trait so callers can plug in
//! their own ephemeris. [`SpaSun`] is backed by NREL's Solar Position Algorithm from the
//! `solar-positioning` crate.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::warn;
use solar_positioning::time::DeltaT;
use solar_positioning::{spa, Horizon, RefractionCorrection, SunriseResult};

/// Sun position at a specific instant, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Angle above the horizon.
    pub altitude: f64,
    /// Clockwise from north (90 = east, 180 = south).
    pub azimuth: f64,
}

impl SunPosition {
    /// Straight below the observer; never lit.
    pub const BELOW_HORIZON: SunPosition = SunPosition {
        altitude: -90.0,
        azimuth: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// External sun-position capability.
pub trait SunPositionProvider {
    fn position(&self, time: DateTime<Utc>, lat: f64, lon: f64) -> SunPosition;

    /// Sunrise and sunset around solar noon of `date` at the location, `None` during
    /// polar day or night.
    ///
    /// `date` is a calendar day in the caller's zone (daily summaries pass the local
    /// date of their configured timezone). Longitude alone pins which solar day that
    /// is, so implementations need no timezone.
    fn times(&self, date: NaiveDate, lat: f64, lon: f64) -> Option<SunTimes>;
}

/// Built-in provider using the SPA algorithm with standard atmospheric refraction.
///
/// Inputs SPA rejects (coordinates out of range, dates beyond its ΔT tables) are logged
/// and treated as the sun being below the horizon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaSun;

impl SpaSun {
    fn try_position(
        time: DateTime<Utc>,
        lat: f64,
        lon: f64,
    ) -> solar_positioning::Result<SunPosition> {
        let delta_t = DeltaT::estimate_from_date_like(time)?;
        let position = spa::solar_position(
            time,
            lat,
            lon,
            0.0,
            delta_t,
            Some(RefractionCorrection::standard()),
        )?;
        Ok(SunPosition {
            altitude: position.elevation_angle(),
            azimuth: position.azimuth(),
        })
    }

    fn try_times(
        date: NaiveDate,
        lat: f64,
        lon: f64,
    ) -> solar_positioning::Result<Option<SunTimes>> {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let delta_t = DeltaT::estimate_from_date_like(midnight)?;
        let result =
            spa::sunrise_sunset_for_horizon(midnight, lat, lon, delta_t, Horizon::SunriseSunset)?;
        Ok(match result {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => Some(SunTimes { sunrise, sunset }),
            // all day or all night
            _ => None,
        })
    }
}

impl SunPositionProvider for SpaSun {
    fn position(&self, time: DateTime<Utc>, lat: f64, lon: f64) -> SunPosition {
        Self::try_position(time, lat, lon).unwrap_or_else(|err| {
            warn!("Sun position unavailable at {time} ({lat}, {lon}): {err}");
            SunPosition::BELOW_HORIZON
        })
    }

    fn times(&self, date: NaiveDate, lat: f64, lon: f64) -> Option<SunTimes> {
        Self::try_times(date, lat, lon).unwrap_or_else(|err| {
            warn!("Sun times unavailable on {date} ({lat}, {lon}): {err}");
            None
        })
    }
}
