use crate::error::DigestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One hourly observation or forecast step, or a point "current" reading.
///
/// Field names and units follow the Bright Sky (DWD) vocabulary: wind in km/h,
/// precipitation in mm, `sunshine` in minutes, `solar` in kWh/m² for the hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyObservation {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub source_id: Option<i64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub pressure_msl: Option<f64>,
    #[serde(default)]
    pub sunshine: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    #[serde(default)]
    pub dew_point: Option<f64>,
    #[serde(default)]
    pub relative_humidity: Option<f64>,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub wind_gust_direction: Option<f64>,
    #[serde(default)]
    pub wind_gust_speed: Option<f64>,
    #[serde(default)]
    pub precipitation_probability: Option<f64>,
    #[serde(default)]
    pub precipitation_probability_6h: Option<f64>,
    #[serde(default)]
    pub solar: Option<f64>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Every column an [`HourlyObservation`] carries, in state-store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Timestamp,
    SourceId,
    Precipitation,
    PressureMsl,
    Sunshine,
    Temperature,
    WindDirection,
    WindSpeed,
    CloudCover,
    DewPoint,
    RelativeHumidity,
    Visibility,
    WindGustDirection,
    WindGustSpeed,
    PrecipitationProbability,
    PrecipitationProbability6h,
    Solar,
    Condition,
    Icon,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::Timestamp,
        Field::SourceId,
        Field::Precipitation,
        Field::PressureMsl,
        Field::Sunshine,
        Field::Temperature,
        Field::WindDirection,
        Field::WindSpeed,
        Field::CloudCover,
        Field::DewPoint,
        Field::RelativeHumidity,
        Field::Visibility,
        Field::WindGustDirection,
        Field::WindGustSpeed,
        Field::PrecipitationProbability,
        Field::PrecipitationProbability6h,
        Field::Solar,
        Field::Condition,
        Field::Icon,
    ];

    /// State key of the field; aggregate siblings append `_min`, `_max`, `_median`.
    pub fn name(self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::SourceId => "source_id",
            Field::Precipitation => "precipitation",
            Field::PressureMsl => "pressure_msl",
            Field::Sunshine => "sunshine",
            Field::Temperature => "temperature",
            Field::WindDirection => "wind_direction",
            Field::WindSpeed => "wind_speed",
            Field::CloudCover => "cloud_cover",
            Field::DewPoint => "dew_point",
            Field::RelativeHumidity => "relative_humidity",
            Field::Visibility => "visibility",
            Field::WindGustDirection => "wind_gust_direction",
            Field::WindGustSpeed => "wind_gust_speed",
            Field::PrecipitationProbability => "precipitation_probability",
            Field::PrecipitationProbability6h => "precipitation_probability_6h",
            Field::Solar => "solar",
            Field::Condition => "condition",
            Field::Icon => "icon",
        }
    }

    /// Reads the numeric value of this field, `None` for categorical fields.
    pub fn number(self, obs: &HourlyObservation) -> Option<f64> {
        match self {
            Field::Precipitation => obs.precipitation,
            Field::PressureMsl => obs.pressure_msl,
            Field::Sunshine => obs.sunshine,
            Field::Temperature => obs.temperature,
            Field::WindDirection => obs.wind_direction,
            Field::WindSpeed => obs.wind_speed,
            Field::CloudCover => obs.cloud_cover,
            Field::DewPoint => obs.dew_point,
            Field::RelativeHumidity => obs.relative_humidity,
            Field::Visibility => obs.visibility,
            Field::WindGustDirection => obs.wind_gust_direction,
            Field::WindGustSpeed => obs.wind_gust_speed,
            Field::PrecipitationProbability => obs.precipitation_probability,
            Field::PrecipitationProbability6h => obs.precipitation_probability_6h,
            Field::Solar => obs.solar,
            Field::SourceId => obs.source_id.map(|id| id as f64),
            Field::Timestamp | Field::Condition | Field::Icon => None,
        }
    }

    pub fn text(self, obs: &HourlyObservation) -> Option<&str> {
        match self {
            Field::Condition => obs.condition.as_deref(),
            Field::Icon => obs.icon.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses a `/weather` style payload (`{"weather": [ ... ]}`) into observations.
///
/// # Errors
///
/// Returns [`DigestError::JsonParse`] if the payload is not valid JSON or an entry
/// lacks a parseable `timestamp`, and [`DigestError::MissingArray`] if there is no
/// `weather` array.
pub fn parse_weather_response(payload: &str) -> Result<Vec<HourlyObservation>, DigestError> {
    let mut value: Value = serde_json::from_str(payload)?;
    let weather = value
        .get_mut("weather")
        .filter(|w| w.is_array())
        .map(Value::take)
        .ok_or(DigestError::MissingArray("weather"))?;
    Ok(serde_json::from_value(weather)?)
}

/// Parses a `/current_weather` style payload (`{"weather": { ... }}`).
pub fn parse_current_response(payload: &str) -> Result<HourlyObservation, DigestError> {
    let mut value: Value = serde_json::from_str(payload)?;
    let weather = value
        .get_mut("weather")
        .filter(|w| w.is_object())
        .map(Value::take)
        .ok_or(DigestError::MissingArray("weather"))?;
    Ok(serde_json::from_value(weather)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_weather_response() -> Result<(), Box<dyn std::error::Error>> {
        let payload = r#"{
            "weather": [
                {"timestamp": "2024-06-01T00:00:00+02:00", "source_id": 7, "temperature": 14.2,
                 "relative_humidity": 81, "condition": "dry", "icon": "clear-night", "solar": null},
                {"timestamp": "2024-06-01T01:00:00+02:00", "precipitation": 0.3, "condition": "rain"}
            ],
            "sources": []
        }"#;
        let observations = parse_weather_response(payload)?;
        assert_eq!(observations.len(), 2);
        assert_eq!(
            observations[0].timestamp,
            Utc.with_ymd_and_hms(2024, 5, 31, 22, 0, 0).unwrap()
        );
        assert_eq!(observations[0].source_id, Some(7));
        assert_eq!(observations[0].relative_humidity, Some(81.0));
        assert_eq!(observations[1].temperature, None);
        assert_eq!(Field::Condition.text(&observations[1]), Some("rain"));
        assert_eq!(Field::Precipitation.number(&observations[1]), Some(0.3));
        Ok(())
    }

    #[test]
    fn test_parse_weather_response_without_array() {
        let err = parse_weather_response(r#"{"radar": []}"#).unwrap_err();
        assert!(matches!(err, DigestError::MissingArray("weather")));
    }

    #[test]
    fn test_parse_current_response() -> Result<(), Box<dyn std::error::Error>> {
        let payload = r#"{"weather": {"timestamp": "2024-06-01T12:00:00+00:00", "wind_speed": 12.0}}"#;
        let current = parse_current_response(payload)?;
        assert_eq!(current.wind_speed, Some(12.0));
        Ok(())
    }
}
