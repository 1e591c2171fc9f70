mod aggregation;
mod clock;
mod config;
mod engine;
mod enrich;
mod error;
mod icons;
mod radar;
mod solar;
mod types;
mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, MinSamples};
pub use engine::WeatherEngine;
pub use enrich::{apparent_temperature, observation_record, wind_bearing_text, Enricher};
pub use error::{ConfigError, DigestError};

pub use aggregation::{
    aggregate_bucket, rule_for, split_day_night, AggregationRule, BucketContext, BucketKind,
    DailySummary, DayNightAggregate, HourlyAggregator, Total,
};
pub use icons::{
    classify_bucket, classify_reading, AlternateIcon, BucketStats, Classification, DayPart, Icon,
    PossibleRainWindow, Reading,
};
pub use radar::{
    drive_rotation, needs_rotation, parse_radar_response, ForecastEntry, ForecastTable,
    RadarFrame, RadarGrid, RadarRecord, RadarStats, RadarWindow, HORIZONS, ROTATION_PERIOD,
    UNOBSERVED, WINDOW_CAPACITY,
};
pub use solar::estimator::PvEstimator;
pub use solar::panel::{InverterGroup, PvSystem, SolarPanel};
pub use solar::sun::{SpaSun, SunPosition, SunPositionProvider, SunTimes};

pub use types::condition::Condition;
pub use types::location::LatLon;
pub use types::observation::{parse_current_response, parse_weather_response, Field, HourlyObservation};
pub use types::record::Record;
