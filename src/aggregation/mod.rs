//! Daily and day/night aggregation of hourly observations.

pub mod daily;
pub mod day_night;
pub mod policy;

pub use daily::{DailySummary, HourlyAggregator};
pub use day_night::{split_day_night, DayNightAggregate};
pub use policy::{aggregate_bucket, rule_for, AggregationRule, BucketContext, BucketKind, Total};
