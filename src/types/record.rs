//! Flat key/value records, the shape every derived product is handed to the state store in.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A flat record of JSON scalars (`null`, numbers, strings) keyed by state name.
///
/// Keys follow the state-store naming: `temperature_min`, `wind_speed_max`,
/// `solar_estimateForHomoran`, `iconUrl`, ...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Stores a number, or `null` when absent or not finite.
    pub fn insert_number(&mut self, key: impl Into<String>, value: Option<f64>) {
        let value = value
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        self.0.insert(key.into(), value);
    }

    pub fn insert_integer(&mut self, key: impl Into<String>, value: Option<i64>) {
        self.0
            .insert(key.into(), value.map(Value::from).unwrap_or(Value::Null));
    }

    pub fn insert_text(&mut self, key: impl Into<String>, value: Option<&str>) {
        self.0
            .insert(key.into(), value.map(Value::from).unwrap_or(Value::Null));
    }

    /// Stores an instant as an RFC 3339 string in UTC.
    pub fn insert_time(&mut self, key: impl Into<String>, value: Option<DateTime<Utc>>) {
        let value = value
            .map(|t| Value::from(t.to_rfc3339_opts(SecondsFormat::Secs, true)))
            .unwrap_or(Value::Null);
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric value of `key`; `None` when missing, `null`, or not a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Whether `key` is present and explicitly `null`.
    pub fn is_null(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Null))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
