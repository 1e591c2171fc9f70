use crate::aggregation::{DailySummary, HourlyAggregator};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::enrich::Enricher;
use crate::error::DigestError;
use crate::radar::{needs_rotation, parse_radar_response, ForecastTable, RadarRecord, RadarWindow};
use crate::solar::sun::{SpaSun, SunPositionProvider};
use crate::types::observation::{parse_current_response, parse_weather_response, HourlyObservation};
use crate::types::record::Record;
use bon::bon;
use chrono::{DateTime, Utc};
use log::debug;

/// The main entry point: turns already-fetched weather records into derived products.
///
/// A `WeatherEngine` owns a validated [`EngineConfig`], a [`SunPositionProvider`] and a
/// [`Clock`]. It holds no other state; the radar window is owned by the caller and passed
/// in by mutable reference.
///
/// # Examples
///
/// ```
/// use weather_digest::{EngineConfig, LatLon, WeatherEngine, DigestError};
///
/// # fn main() -> Result<(), DigestError> {
/// let config = EngineConfig::builder().location(LatLon(52.52, 13.40)).build();
/// let engine = WeatherEngine::new(config)?;
///
/// let payload = r#"{"weather": [
///     {"timestamp": "2024-06-03T10:00:00+00:00", "temperature": 18.5, "condition": "dry"},
///     {"timestamp": "2024-06-03T11:00:00+00:00", "temperature": 19.5, "condition": "rain"}
/// ]}"#;
/// let summaries = engine.daily_summaries_from_json(payload)?;
/// assert!(!summaries.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WeatherEngine<S = SpaSun, C = SystemClock> {
    config: EngineConfig,
    sun: S,
    clock: C,
}

impl WeatherEngine {
    /// Creates an engine with the built-in SPA sun model and the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Config`] if the configuration does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, DigestError> {
        Self::with_providers(config, SpaSun, SystemClock)
    }
}

#[bon]
impl<S: SunPositionProvider, C: Clock> WeatherEngine<S, C> {
    /// Creates an engine with a custom sun-position provider and clock.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Config`] if the configuration does not validate.
    pub fn with_providers(config: EngineConfig, sun: S, clock: C) -> Result<Self, DigestError> {
        config.validate()?;
        debug!(
            "Weather engine at {:?} ({}), {} panel(s)",
            config.location,
            config.timezone,
            config.pv.panel_count()
        );
        Ok(Self { config, sun, clock })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Aggregates hourly observations into one [`DailySummary`] per local calendar day.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.observations(&[HourlyObservation])`: **Required.** Hours in time order.
    /// * `.now(DateTime<Utc>)`: Optional. Reference instant for day offsets and the
    ///   homogenization hour. Defaults to the engine's clock.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use weather_digest::{EngineConfig, HourlyObservation, LatLon, WeatherEngine};
    ///
    /// let engine = WeatherEngine::new(EngineConfig::builder().location(LatLon(52.52, 13.40)).build()).unwrap();
    /// let now = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
    /// let hours: Vec<HourlyObservation> = (0..3)
    ///     .map(|h| HourlyObservation {
    ///         timestamp: Utc.with_ymd_and_hms(2024, 6, 4, 10 + h, 0, 0).unwrap(),
    ///         precipitation: Some(0.4),
    ///         ..Default::default()
    ///     })
    ///     .collect();
    ///
    /// let summaries = engine.daily_summaries().observations(&hours).now(now).call();
    /// assert_eq!(summaries[0].offset, 1);
    /// assert_eq!(summaries[0].fields.number("precipitation"), Some(1.2));
    /// ```
    #[builder]
    pub fn daily_summaries(
        &self,
        observations: &[HourlyObservation],
        now: Option<DateTime<Utc>>,
    ) -> Vec<DailySummary> {
        let now = now.unwrap_or_else(|| self.clock.now());
        HourlyAggregator::new(&self.config, &self.sun).aggregate(observations, now)
    }

    /// Parses a `{"weather": [...]}` payload and aggregates it as of the clock's now.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::JsonParse`] or [`DigestError::MissingArray`] for payloads
    /// that are not in the expected shape.
    pub fn daily_summaries_from_json(&self, payload: &str) -> Result<Vec<DailySummary>, DigestError> {
        let observations = parse_weather_response(payload)?;
        Ok(self.daily_summaries().observations(&observations).call())
    }

    /// Enriches a current reading with icons, wind bearing text and apparent temperature.
    pub fn enrich_current(&self, observation: &HourlyObservation) -> Record {
        Enricher::new(&self.config, &self.sun).current(observation)
    }

    /// Parses a `{"weather": {...}}` current-weather payload and enriches it.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] for payloads that are not in the expected shape.
    pub fn enrich_current_json(&self, payload: &str) -> Result<Record, DigestError> {
        Ok(self.enrich_current(&parse_current_response(payload)?))
    }

    /// Enriches every forecast hour, adding the hour's PV estimate.
    pub fn enrich_hourly(&self, observations: &[HourlyObservation]) -> Vec<Record> {
        let enricher = Enricher::new(&self.config, &self.sun);
        observations.iter().map(|obs| enricher.hourly(obs)).collect()
    }

    /// Replaces the contents of `window` with the records of the next two hours.
    pub fn ingest_radar(&self, window: &mut RadarWindow, records: &[RadarRecord]) -> usize {
        window.ingest(records, self.clock.now())
    }

    /// Parses a `{"radar": [...]}` payload into `window` and returns the nowcast table.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] for payloads that are not in the expected shape.
    pub fn ingest_radar_json(
        &self,
        window: &mut RadarWindow,
        payload: &str,
    ) -> Result<ForecastTable, DigestError> {
        let records = parse_radar_response(payload)?;
        self.ingest_radar(window, &records);
        Ok(window.forecast())
    }

    /// Whether the configured radar poll interval leaves gaps the window has to
    /// bridge by rotating.
    pub fn needs_radar_rotation(&self) -> bool {
        needs_rotation(self.config.radar_poll_interval())
    }
}
