//! Engine configuration.
//!
//! [`EngineConfig`] can be assembled in code through its builder or deserialized from the
//! adapter's JSON settings; every field except `location` has a default.

use crate::error::ConfigError;
use crate::icons::PossibleRainWindow;
use crate::solar::panel::PvSystem;
use crate::types::location::LatLon;
use bon::Builder;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_APP_ID: &str = "weather-digest";
/// Bright Sky reports `solar` in kWh/m² per hour; the PV model expects Wh/m².
pub const DEFAULT_SOLAR_INPUT_SCALE: f64 = 1000.0;
pub const DEFAULT_RADAR_POLL_SECONDS: u64 = 300;

/// Minimum non-null sample counts a bucket needs before a mean is reported.
///
/// The mean of a median/mean field is only emitted when the number of non-null
/// values is strictly greater than the threshold of the bucket kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinSamples {
    pub daily: usize,
    pub day_night: usize,
}

impl Default for MinSamples {
    fn default() -> Self {
        Self {
            daily: 12,
            day_night: 6,
        }
    }
}

/// Settings of a [`crate::WeatherEngine`].
///
/// # Examples
///
/// ```
/// use weather_digest::{EngineConfig, LatLon};
///
/// let config = EngineConfig::builder()
///     .location(LatLon(52.52, 13.40))
///     .timezone(chrono_tz::Europe::Berlin)
///     .build();
/// assert_eq!(config.min_samples.daily, 12);
/// assert_eq!(config.app_id, "weather-digest");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct EngineConfig {
    pub location: LatLon,

    /// Zone whose calendar days and hours the daily buckets follow.
    #[builder(default = Tz::UTC)]
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    #[builder(default)]
    #[serde(default)]
    pub pv: PvSystem,

    #[builder(default)]
    #[serde(default)]
    pub min_samples: MinSamples,

    /// Prefix of icon asset paths, `/{app_id}/icons/...`.
    #[builder(default = DEFAULT_APP_ID.to_string(), into)]
    #[serde(default = "default_app_id")]
    pub app_id: String,

    #[builder(default)]
    #[serde(default)]
    pub possible_rain_window: PossibleRainWindow,

    /// Factor turning the input `solar` column into Wh/m².
    #[builder(default = DEFAULT_SOLAR_INPUT_SCALE)]
    #[serde(default = "default_solar_input_scale")]
    pub solar_input_scale: f64,

    /// How often the caller fetches radar data, in seconds.
    #[builder(default = DEFAULT_RADAR_POLL_SECONDS)]
    #[serde(default = "default_radar_poll_seconds")]
    pub radar_poll_seconds: u64,
}

fn default_timezone() -> Tz {
    Tz::UTC
}

fn default_app_id() -> String {
    DEFAULT_APP_ID.to_string()
}

fn default_solar_input_scale() -> f64 {
    DEFAULT_SOLAR_INPUT_SCALE
}

fn default_radar_poll_seconds() -> u64 {
    DEFAULT_RADAR_POLL_SECONDS
}

impl EngineConfig {
    pub fn radar_poll_interval(&self) -> Duration {
        Duration::from_secs(self.radar_poll_seconds)
    }

    /// Checks coordinates, panel geometry, the rain window and the app id.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let LatLon(lat, lon) = self.location;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ConfigError::InvalidLatitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ConfigError::InvalidLongitude(lon));
        }
        self.pv.validate()?;

        let window = self.possible_rain_window;
        if !(0.0..=100.0).contains(&window.min)
            || !(0.0..=100.0).contains(&window.max)
            || window.min > window.max
        {
            return Err(ConfigError::InvalidRainWindow {
                min: window.min,
                max: window.max,
            });
        }
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::EmptyAppId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::panel::SolarPanel;

    #[test]
    fn test_defaults_from_json() -> Result<(), Box<dyn std::error::Error>> {
        let config: EngineConfig =
            serde_json::from_str(r#"{"location": [48.14, 11.58], "timezone": "Europe/Berlin"}"#)?;
        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(config.min_samples, MinSamples::default());
        assert_eq!(config.app_id, DEFAULT_APP_ID);
        assert_eq!(config.solar_input_scale, 1000.0);
        assert_eq!(config.radar_poll_interval(), Duration::from_secs(300));
        assert!(!config.pv.has_panels());
        config.validate()?;
        Ok(())
    }

    #[test]
    fn test_builder_matches_json_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let built = EngineConfig::builder().location(LatLon(48.14, 11.58)).build();
        let parsed: EngineConfig = serde_json::from_str(r#"{"location": [48.14, 11.58]}"#)?;
        assert_eq!(built, parsed);
        assert_eq!(built.timezone, Tz::UTC);
        Ok(())
    }

    #[test]
    fn test_validate_rejects_bad_values() -> Result<(), Box<dyn std::error::Error>> {
        let base = EngineConfig::builder().location(LatLon(0.0, 0.0)).build();

        let config = EngineConfig {
            location: LatLon(91.0, 0.0),
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidLatitude(91.0)));

        let config = EngineConfig {
            location: LatLon(0.0, -181.0),
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidLongitude(-181.0)));

        let config = EngineConfig {
            app_id: "  ".into(),
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyAppId));

        let config = EngineConfig {
            possible_rain_window: PossibleRainWindow {
                min: 80.0,
                max: 20.0,
            },
            ..base.clone()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRainWindow { .. })
        ));

        let panel = SolarPanel {
            azimuth: 180.0,
            tilt: 30.0,
            area: 1.7,
            efficiency: 140.0,
            inverter: 0,
        };
        let config = EngineConfig {
            pv: serde_json::from_value(serde_json::json!({
                "groups": [{"capacity": 0.0, "panels": [panel]}]
            }))?,
            ..base
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEfficiency { panel: 0, .. })
        ));
        Ok(())
    }
}
