//! Plane-of-array irradiance and PV output estimates from hourly horizontal irradiance.
//!
//! The hourly GHI is split into a beam and a diffuse share using the sun altitude, each
//! panel receives beam, isotropic sky-diffuse and ground-reflected components, and the
//! per-inverter sums are clipped to the inverter capacity.

use crate::solar::panel::{InverterGroup, PvSystem, SolarPanel};
use crate::solar::sun::{SunPosition, SunPositionProvider};
use crate::types::location::LatLon;
use chrono::{DateTime, TimeDelta, Utc};

/// Ground albedo used for the reflected component (grass/soil).
const ALBEDO: f64 = 0.2;
/// Lower bound for sin(altitude) in the beam transposition.
const MIN_SIN_ALTITUDE: f64 = 1e-3;
/// Beam share grows with sin(altitude) at this slope, capped at 1.
const BEAM_SLOPE: f64 = 1.1;
/// Sub-sample offsets inside the hour, in minutes.
const SUBSAMPLE_MINUTES: [i64; 4] = [0, 15, 30, 45];

/// Estimates PV energy for an installation at a fixed location.
#[derive(Debug)]
pub struct PvEstimator<'a, S: ?Sized> {
    sun: &'a S,
    location: LatLon,
    system: &'a PvSystem,
}

/// Unit vector in east/north/up coordinates for an altitude/azimuth pair in degrees.
fn direction(altitude_deg: f64, azimuth_deg: f64) -> [f64; 3] {
    let alt = altitude_deg.to_radians();
    let az = azimuth_deg.to_radians();
    [alt.cos() * az.sin(), alt.cos() * az.cos(), alt.sin()]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Plane-of-array irradiance for one panel, same unit as `ghi`.
pub fn plane_of_array(ghi: f64, sun: SunPosition, panel: &SolarPanel) -> f64 {
    let sin_alt = sun.altitude.to_radians().sin();
    let beam = (sin_alt * BEAM_SLOPE).clamp(0.0, 1.0);
    let diffuse = 1.0 - beam;

    // panel normal: tilting by `tilt` away from vertical toward `azimuth`
    let normal = direction(90.0 - panel.tilt, panel.azimuth);
    let sun_vector = direction(sun.altitude, sun.azimuth);
    let cos_incidence = dot(normal, sun_vector).max(0.0);

    let cos_tilt = panel.tilt.to_radians().cos();
    let direct_gain = cos_incidence / sin_alt.max(MIN_SIN_ALTITUDE);
    let sky_gain = (1.0 + cos_tilt) / 2.0;
    let ground_gain = ALBEDO * (1.0 - cos_tilt) / 2.0;

    ghi * (beam * direct_gain + diffuse * sky_gain + ground_gain)
}

fn group_output(group: &InverterGroup, ghi: f64, sun: SunPosition) -> f64 {
    let raw: f64 = group
        .panels
        .iter()
        .map(|panel| {
            plane_of_array(ghi, sun, panel).max(0.0) * panel.area * (panel.efficiency / 100.0)
        })
        .sum();
    group.clip(raw)
}

impl<'a, S: SunPositionProvider + ?Sized> PvEstimator<'a, S> {
    pub fn new(sun: &'a S, location: LatLon, system: &'a PvSystem) -> Self {
        Self {
            sun,
            location,
            system,
        }
    }

    /// Output in Wh if the sun stood where it is at `time` for the whole hour.
    pub fn instant(&self, ghi: f64, time: DateTime<Utc>) -> f64 {
        if ghi <= 0.0 || !self.system.has_panels() {
            return 0.0;
        }
        let sun = self.sun.position(time, self.location.lat(), self.location.lon());
        if sun.altitude <= 0.0 {
            return 0.0;
        }
        self.system
            .groups()
            .iter()
            .map(|group| group_output(group, ghi, sun))
            .sum()
    }

    /// Energy in Wh for the hour starting at `hour_start`, given its GHI in Wh/m².
    ///
    /// Averages four quarter-hour sun positions to follow the sun through the hour.
    pub fn hourly(&self, ghi: f64, hour_start: DateTime<Utc>) -> f64 {
        let total: f64 = SUBSAMPLE_MINUTES
            .iter()
            .map(|&minutes| self.instant(ghi, hour_start + TimeDelta::minutes(minutes)))
            .sum();
        total / SUBSAMPLE_MINUTES.len() as f64
    }
}
