use crate::error::DigestError;
use crate::radar::grid::{RadarGrid, RadarStats};
use crate::types::record::Record;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Stat value of a frame for which no radar data was observed.
pub const UNOBSERVED: f64 = -1.0;

/// One 5-minute radar record as served by the radar endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RadarRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub source: Option<String>,
    /// Grid of hundredths of a millimetre. Kept as raw JSON so malformed rows can be
    /// skipped instead of failing the whole response.
    #[serde(default)]
    pub precipitation_5: Value,
}

#[derive(Deserialize)]
struct RadarResponse {
    radar: Vec<RadarRecord>,
}

/// Parses a `{"radar": [...]}` response body.
pub fn parse_radar_response(body: &str) -> Result<Vec<RadarRecord>, DigestError> {
    let value: Value = serde_json::from_str(body)?;
    if !value.get("radar").is_some_and(Value::is_array) {
        return Err(DigestError::MissingArray("radar"));
    }
    let response: RadarResponse = serde_json::from_value(value)?;
    Ok(response.radar)
}

/// Per-timestamp reduced radar statistics.
///
/// `stats` is `None` for frames appended by rotation; those serialize every
/// statistic as [`UNOBSERVED`].
#[derive(Debug, Clone, PartialEq)]
pub struct RadarFrame {
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
    pub forecast_time: DateTime<Utc>,
    pub stats: Option<RadarStats>,
}

impl RadarFrame {
    pub fn observed(record: &RadarRecord, grid: &RadarGrid, forecast_time: DateTime<Utc>) -> Self {
        Self {
            timestamp: record.timestamp,
            source: record.source.clone(),
            forecast_time,
            stats: Some(grid.stats()),
        }
    }

    /// A placeholder frame `step` after `previous`, carrying its source.
    pub fn unobserved(previous: &RadarFrame, step: TimeDelta) -> Self {
        Self {
            timestamp: previous.timestamp + step,
            source: previous.source.clone(),
            forecast_time: previous.forecast_time,
            stats: None,
        }
    }

    pub fn is_observed(&self) -> bool {
        self.stats.is_some()
    }

    pub fn avg(&self) -> f64 {
        self.stats.map_or(UNOBSERVED, |s| s.avg)
    }

    pub fn min(&self) -> f64 {
        self.stats.map_or(UNOBSERVED, |s| s.min)
    }

    pub fn max(&self) -> f64 {
        self.stats.map_or(UNOBSERVED, |s| s.max)
    }

    pub fn median(&self) -> f64 {
        self.stats.map_or(UNOBSERVED, |s| s.median)
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::default();
        record.insert_time("timestamp", Some(self.timestamp));
        record.insert_text("source", self.source.as_deref());
        record.insert_time("forecast_time", Some(self.forecast_time));
        record.insert_number("precipitation_5_avg", Some(self.avg()));
        record.insert_number("precipitation_5_min", Some(self.min()));
        record.insert_number("precipitation_5_max", Some(self.max()));
        record.insert_number("precipitation_5_median", Some(self.median()));
        record
    }
}

impl Serialize for RadarFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}
