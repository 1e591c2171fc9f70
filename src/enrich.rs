//! Derived fields for a single reading: icons, wind bearing, apparent temperature and,
//! for forecast hours, the PV estimate.

use crate::config::EngineConfig;
use crate::icons::{classify_reading, Reading};
use crate::solar::estimator::PvEstimator;
use crate::solar::sun::SunPositionProvider;
use crate::types::location::LatLon;
use crate::types::observation::{Field, HourlyObservation};
use crate::types::record::Record;
use crate::utils::round_to;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass label for a direction in degrees (0 = north).
pub fn wind_bearing_text(direction: f64) -> &'static str {
    let sector = (direction.rem_euclid(360.0) / 22.5 + 0.5).floor() as usize;
    COMPASS_POINTS[sector % COMPASS_POINTS.len()]
}

/// Australian apparent temperature (°C) from air temperature (°C), relative humidity (%)
/// and wind speed (km/h), rounded to 1 decimal.
///
/// Missing wind counts as calm.
pub fn apparent_temperature(
    temperature: Option<f64>,
    relative_humidity: Option<f64>,
    wind_speed: Option<f64>,
) -> Option<f64> {
    let ta = temperature?;
    let rh = relative_humidity?;
    let ws = wind_speed.unwrap_or(0.0) / 3.6;
    let vapour_pressure = rh / 100.0 * 6.105 * (17.27 * ta / (237.7 + ta)).exp();
    Some(round_to(ta + 0.33 * vapour_pressure - 0.70 * ws - 4.00, 1))
}

/// The observation's own columns as a flat record.
pub fn observation_record(obs: &HourlyObservation) -> Record {
    let mut record = Record::new();
    for field in Field::ALL {
        match field {
            Field::Timestamp => record.insert_time(field.name(), Some(obs.timestamp)),
            Field::SourceId => record.insert_integer(field.name(), obs.source_id),
            Field::Condition | Field::Icon => record.insert_text(field.name(), field.text(obs)),
            _ => record.insert_number(field.name(), field.number(obs)),
        }
    }
    record
}

/// Adds derived fields to current readings and forecast hours.
#[derive(Debug)]
pub struct Enricher<'a, S: ?Sized> {
    config: &'a EngineConfig,
    sun: &'a S,
}

impl<'a, S: SunPositionProvider + ?Sized> Enricher<'a, S> {
    pub fn new(config: &'a EngineConfig, sun: &'a S) -> Self {
        Self { config, sun }
    }

    fn is_day(&self, obs: &HourlyObservation) -> bool {
        let LatLon(lat, lon) = self.config.location;
        self.sun.position(obs.timestamp, lat, lon).altitude > 0.0
    }

    /// Current reading plus `icon_special`, `iconUrl`, `wind_bearing_text` and
    /// `apparent_temperature`.
    pub fn current(&self, obs: &HourlyObservation) -> Record {
        let mut record = observation_record(obs);
        let reading = Reading {
            condition: obs.condition.as_deref(),
            wind_speed: obs.wind_speed,
            cloud_cover: obs.cloud_cover,
            precipitation_probability: obs.precipitation_probability,
            is_day: self.is_day(obs),
        };
        let classification = classify_reading(&reading, self.config.possible_rain_window);
        record.insert_text("icon_special", Some(classification.icon.to_string().as_str()));
        record.insert_text(
            "iconUrl",
            Some(classification.asset_path(&self.config.app_id).as_str()),
        );
        record.insert_text("wind_bearing_text", obs.wind_direction.map(wind_bearing_text));
        record.insert_number(
            "apparent_temperature",
            apparent_temperature(obs.temperature, obs.relative_humidity, obs.wind_speed),
        );
        record
    }

    /// Like [`Enricher::current`], plus the hour's `solar_estimate` in Wh.
    pub fn hourly(&self, obs: &HourlyObservation) -> Record {
        let mut record = self.current(obs);
        let estimator = PvEstimator::new(self.sun, self.config.location, &self.config.pv);
        let estimate = obs.solar.map(|solar| {
            round_to(
                estimator.hourly(solar * self.config.solar_input_scale, obs.timestamp),
                1,
            )
        });
        record.insert_number("solar_estimate", estimate);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::panel::{PvSystem, SolarPanel};
    use crate::solar::sun::{SunPosition, SunTimes};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    struct StubSun(f64);

    impl SunPositionProvider for StubSun {
        fn position(&self, _time: DateTime<Utc>, _lat: f64, _lon: f64) -> SunPosition {
            SunPosition {
                altitude: self.0,
                azimuth: 180.0,
            }
        }

        fn times(&self, _date: NaiveDate, _lat: f64, _lon: f64) -> Option<SunTimes> {
            None
        }
    }

    fn reading() -> HourlyObservation {
        HourlyObservation {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap(),
            temperature: Some(30.0),
            relative_humidity: Some(70.0),
            wind_speed: Some(18.0),
            wind_direction: Some(200.0),
            cloud_cover: Some(20.0),
            condition: Some("dry".into()),
            ..HourlyObservation::default()
        }
    }

    #[test]
    fn test_wind_bearing_text() {
        assert_eq!(wind_bearing_text(0.0), "N");
        assert_eq!(wind_bearing_text(11.24), "N");
        assert_eq!(wind_bearing_text(11.25), "NNE");
        assert_eq!(wind_bearing_text(200.0), "SSW");
        assert_eq!(wind_bearing_text(270.0), "W");
        assert_eq!(wind_bearing_text(355.0), "N");
        assert_eq!(wind_bearing_text(-90.0), "W");
    }

    #[test]
    fn test_apparent_temperature() {
        assert_eq!(apparent_temperature(Some(20.0), Some(50.0), None), Some(19.8));
        assert_eq!(apparent_temperature(Some(30.0), Some(70.0), Some(18.0)), Some(32.3));
        assert_eq!(apparent_temperature(Some(-5.0), Some(80.0), Some(36.0)), Some(-14.9));
        assert_eq!(apparent_temperature(None, Some(80.0), Some(36.0)), None);
        assert_eq!(apparent_temperature(Some(10.0), None, None), None);
    }

    #[test]
    fn test_current_record() {
        let config = EngineConfig::builder()
            .location(LatLon(52.52, 13.40))
            .app_id("brightsky")
            .build();
        let sun = StubSun(45.0);
        let record = Enricher::new(&config, &sun).current(&reading());
        assert_eq!(record.text("timestamp"), Some("2024-06-03T12:00:00Z"));
        assert_eq!(record.number("temperature"), Some(30.0));
        assert_eq!(record.text("icon_special"), Some("sunny"));
        assert_eq!(record.text("iconUrl"), Some("/brightsky/icons/clear-day.svg"));
        assert_eq!(record.text("wind_bearing_text"), Some("SSW"));
        assert_eq!(record.number("apparent_temperature"), Some(32.3));
        assert!(!record.contains_key("solar_estimate"));
    }

    #[test]
    fn test_night_icons_follow_sun_altitude() {
        let config = EngineConfig::builder().location(LatLon(52.52, 13.40)).build();
        let sun = StubSun(-3.0);
        let record = Enricher::new(&config, &sun).current(&reading());
        assert_eq!(record.text("icon_special"), Some("clear-night"));
        assert_eq!(
            record.text("iconUrl"),
            Some("/weather-digest/icons/clear-night.svg")
        );
    }

    #[test]
    fn test_hourly_solar_estimate() {
        let panel = SolarPanel {
            azimuth: 180.0,
            tilt: 0.0,
            area: 10.0,
            efficiency: 20.0,
            inverter: 0,
        };
        let config = EngineConfig::builder()
            .location(LatLon(52.52, 13.40))
            .pv(PvSystem::from_panels(&[panel], &[0.0]).unwrap())
            .build();
        let sun = StubSun(90.0);
        let enricher = Enricher::new(&config, &sun);

        let mut obs = reading();
        obs.solar = Some(0.5);
        // flat panel, sun at zenith: the full 500 Wh/m² hits 10 m² at 20 %
        assert_eq!(enricher.hourly(&obs).number("solar_estimate"), Some(1000.0));

        obs.solar = None;
        assert!(enricher.hourly(&obs).is_null("solar_estimate"));
    }
}
