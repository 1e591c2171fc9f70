use crate::aggregation::day_night::{split_day_night, DayNightAggregate};
use crate::aggregation::policy::{aggregate_bucket, BucketContext, BucketKind};
use crate::config::EngineConfig;
use crate::solar::estimator::PvEstimator;
use crate::solar::sun::SunPositionProvider;
use crate::types::observation::HourlyObservation;
use crate::types::record::Record;
use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Local hour at which the homogenized solar totals are taken.
pub const HOMOGENIZATION_HOUR: u32 = 5;

/// Aggregate of one calendar day, relative to today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Days from today's local date; negative for past days.
    pub offset: i64,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub fields: Record,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub day: DayNightAggregate,
    pub night: DayNightAggregate,
}

/// Groups hourly observations into calendar days and aggregates each day.
#[derive(Debug)]
pub struct HourlyAggregator<'a, S: ?Sized> {
    config: &'a EngineConfig,
    sun: &'a S,
}

impl<'a, S: SunPositionProvider + ?Sized> HourlyAggregator<'a, S> {
    pub fn new(config: &'a EngineConfig, sun: &'a S) -> Self {
        Self { config, sun }
    }

    fn local_date(&self, time: DateTime<Utc>) -> NaiveDate {
        time.with_timezone(&self.config.timezone).date_naive()
    }

    /// Buckets observations by local-date offset from `now`, keeping input order in each.
    pub fn group_by_day<'o>(
        &self,
        observations: &'o [HourlyObservation],
        now: DateTime<Utc>,
    ) -> BTreeMap<i64, Vec<&'o HourlyObservation>> {
        let today = self.local_date(now);
        let mut buckets: BTreeMap<i64, Vec<&HourlyObservation>> = BTreeMap::new();
        for obs in observations {
            let offset = (self.local_date(obs.timestamp) - today).num_days();
            buckets.entry(offset).or_default().push(obs);
        }
        buckets
    }

    /// One summary per day offset present in `observations`, ordered by offset.
    pub fn aggregate(&self, observations: &[HourlyObservation], now: DateTime<Utc>) -> Vec<DailySummary> {
        let estimator = PvEstimator::new(self.sun, self.config.location, &self.config.pv);
        let homogenize =
            now.with_timezone(&self.config.timezone).hour() == HOMOGENIZATION_HOUR;
        let today = self.local_date(now);

        let summaries: Vec<DailySummary> = self
            .group_by_day(observations, now)
            .into_iter()
            .map(|(offset, hours)| {
                let date = today + TimeDelta::days(offset);
                self.summarize(offset, date, &hours, &estimator, homogenize)
            })
            .collect();
        debug!(
            "Aggregated {} observation(s) into {} daily summaries",
            observations.len(),
            summaries.len()
        );
        summaries
    }

    fn context<'c>(
        &'c self,
        kind: BucketKind,
        estimator: &'c PvEstimator<'c, S>,
        homogenize: bool,
    ) -> BucketContext<'c, S> {
        let min_samples = match kind {
            BucketKind::Daily => self.config.min_samples.daily,
            BucketKind::Day | BucketKind::Night => self.config.min_samples.day_night,
        };
        BucketContext {
            kind,
            min_samples,
            app_id: &self.config.app_id,
            estimator,
            solar_scale: self.config.solar_input_scale,
            homogenize,
        }
    }

    fn summarize(
        &self,
        offset: i64,
        date: NaiveDate,
        hours: &[&HourlyObservation],
        estimator: &PvEstimator<'_, S>,
        homogenize: bool,
    ) -> DailySummary {
        let location = self.config.location;
        let fields = aggregate_bucket(hours, &self.context(BucketKind::Daily, estimator, homogenize));

        let times = self.sun.times(date, location.lat(), location.lon());
        if times.is_none() {
            warn!("No sunrise or sunset on {date}, splitting day and night by sun altitude");
        }
        let (day_hours, night_hours) = split_day_night(hours, times, self.sun, location);
        let day = DayNightAggregate {
            day: true,
            fields: aggregate_bucket(&day_hours, &self.context(BucketKind::Day, estimator, false)),
        };
        let night = DayNightAggregate {
            day: false,
            fields: aggregate_bucket(
                &night_hours,
                &self.context(BucketKind::Night, estimator, false),
            ),
        };

        DailySummary {
            offset,
            date,
            fields,
            sunrise: times.map(|t| t.sunrise),
            sunset: times.map(|t| t.sunset),
            day,
            night,
        }
    }
}
