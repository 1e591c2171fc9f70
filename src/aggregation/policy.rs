//! Per-field aggregation rules and their evaluation over one bucket of hours.
//!
//! Every [`Field`] maps to exactly one [`AggregationRule`]; [`aggregate_bucket`]
//! evaluates the whole table for a bucket and writes a flat [`Record`].

use crate::icons::{classify_bucket, Classification};
use crate::solar::estimator::PvEstimator;
use crate::solar::sun::SunPositionProvider;
use crate::types::observation::{Field, HourlyObservation};
use crate::types::record::Record;
use crate::utils::{max, mean, median, min, mode, present, round_to};
use log::trace;

/// How a bucket value is reduced next to its `_min`/`_max` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Total {
    Sum,
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationRule {
    /// Value of the first hour.
    Identity,
    /// `{field}_min`, `{field}_max` and a `{field}` total.
    MinMax {
        zero_fill: bool,
        total: Total,
        decimals: u32,
    },
    /// Plain sum, `null` when no hour has a value.
    Sum { decimals: u32 },
    /// `{field}_median` plus a mean gated by the bucket's minimum sample count.
    MedianMean { zero_fill: bool, decimals: u32 },
    /// Sum plus the PV estimate (`solar_estimate`) and the homogenized snapshots.
    Solar { decimals: u32 },
    /// Most frequent value; `night_to_day` rewrites a `-night` winner in daytime buckets.
    Mode { night_to_day: bool },
}

/// The aggregation table.
pub fn rule_for(field: Field) -> AggregationRule {
    use AggregationRule::*;
    match field {
        Field::Timestamp | Field::SourceId => Identity,
        Field::Precipitation => MinMax {
            zero_fill: true,
            total: Total::Sum,
            decimals: 1,
        },
        Field::WindSpeed => MinMax {
            zero_fill: true,
            total: Total::Mean,
            decimals: 1,
        },
        Field::Temperature => MinMax {
            zero_fill: false,
            total: Total::Mean,
            decimals: 1,
        },
        Field::Sunshine => Sum { decimals: 1 },
        Field::Solar => Solar { decimals: 3 },
        Field::WindDirection
        | Field::CloudCover
        | Field::RelativeHumidity
        | Field::PressureMsl
        | Field::Visibility
        | Field::WindGustDirection => MedianMean {
            zero_fill: false,
            decimals: 0,
        },
        Field::DewPoint => MedianMean {
            zero_fill: false,
            decimals: 1,
        },
        Field::WindGustSpeed | Field::PrecipitationProbability | Field::PrecipitationProbability6h => {
            MedianMean {
                zero_fill: true,
                decimals: 1,
            }
        }
        Field::Condition => Mode {
            night_to_day: false,
        },
        Field::Icon => Mode { night_to_day: true },
    }
}

/// Which slice of a day a bucket covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Daily,
    Day,
    Night,
}

impl BucketKind {
    /// Day flag handed to the bucket icon classifier.
    pub fn is_day(self) -> Option<bool> {
        match self {
            BucketKind::Daily => None,
            BucketKind::Day => Some(true),
            BucketKind::Night => Some(false),
        }
    }

    pub fn is_daytime(self) -> bool {
        self != BucketKind::Night
    }
}

/// Everything besides the hours that evaluating the table needs.
#[derive(Debug)]
pub struct BucketContext<'a, S: ?Sized> {
    pub kind: BucketKind,
    pub min_samples: usize,
    pub app_id: &'a str,
    pub estimator: &'a PvEstimator<'a, S>,
    /// Factor turning the `solar` column into Wh/m².
    pub solar_scale: f64,
    /// Emit `solar_forHomoran` / `solar_estimateForHomoran` (daily bucket, local hour 05).
    pub homogenize: bool,
}

fn column(hours: &[&HourlyObservation], field: Field, zero_fill: bool) -> Vec<Option<f64>> {
    hours
        .iter()
        .map(|obs| match field.number(obs) {
            None if zero_fill => Some(0.0),
            value => value,
        })
        .collect()
}

fn sum(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum())
}

fn rounded(value: Option<f64>, decimals: u32) -> Option<f64> {
    value.map(|v| round_to(v, decimals))
}

fn sibling(field: Field, suffix: &str) -> String {
    format!("{}_{suffix}", field.name())
}

/// Aggregates one bucket of hours (in hour order) into a flat record.
///
/// An empty bucket produces the same keys, all `null`.
pub fn aggregate_bucket<S>(hours: &[&HourlyObservation], ctx: &BucketContext<'_, S>) -> Record
where
    S: SunPositionProvider + ?Sized,
{
    let mut record = Record::new();
    for field in Field::ALL {
        apply_rule(&mut record, field, rule_for(field), hours, ctx);
    }

    let classification = (!hours.is_empty()).then(|| classify(hours, ctx.kind));
    record.insert_text(
        "icon_special",
        classification.map(|c| c.icon.to_string()).as_deref(),
    );
    record.insert_text(
        "iconUrl",
        classification.map(|c| c.asset_path(ctx.app_id)).as_deref(),
    );
    trace!(
        "Aggregated {:?} bucket of {} hour(s) into {} keys",
        ctx.kind,
        hours.len(),
        record.len()
    );
    record
}

fn classify(hours: &[&HourlyObservation], kind: BucketKind) -> Classification {
    let conditions: Vec<Option<&str>> = hours.iter().map(|o| o.condition.as_deref()).collect();
    let wind: Vec<Option<f64>> = hours.iter().map(|o| o.wind_speed).collect();
    let cloud: Vec<Option<f64>> = hours.iter().map(|o| o.cloud_cover).collect();
    classify_bucket(&conditions, &wind, &cloud, kind.is_day())
}

fn apply_rule<S>(
    record: &mut Record,
    field: Field,
    rule: AggregationRule,
    hours: &[&HourlyObservation],
    ctx: &BucketContext<'_, S>,
) where
    S: SunPositionProvider + ?Sized,
{
    let name = field.name();
    match rule {
        AggregationRule::Identity => {
            let first = hours.first();
            match field {
                Field::Timestamp => record.insert_time(name, first.map(|o| o.timestamp)),
                _ => record.insert_integer(name, first.and_then(|o| o.source_id)),
            }
        }
        AggregationRule::MinMax {
            zero_fill,
            total,
            decimals,
        } => {
            let values = present(&column(hours, field, zero_fill));
            record.insert_number(sibling(field, "min"), min(&values));
            record.insert_number(sibling(field, "max"), max(&values));
            let total = match total {
                Total::Sum => sum(&values),
                Total::Mean => mean(&values),
            };
            record.insert_number(name, rounded(total, decimals));
        }
        AggregationRule::Sum { decimals } => {
            let values = present(&column(hours, field, false));
            record.insert_number(name, rounded(sum(&values), decimals));
        }
        AggregationRule::MedianMean {
            zero_fill,
            decimals,
        } => {
            let values = present(&column(hours, field, zero_fill));
            record.insert_number(sibling(field, "median"), rounded(median(&values), decimals));
            let average = if values.len() > ctx.min_samples {
                mean(&values)
            } else {
                None
            };
            record.insert_number(name, rounded(average, decimals));
        }
        AggregationRule::Solar { decimals } => {
            let total = rounded(sum(&present(&column(hours, field, false))), decimals);
            let estimate = solar_estimate(hours, ctx);
            record.insert_number(name, total);
            record.insert_number("solar_estimate", estimate);
            if ctx.homogenize && ctx.kind == BucketKind::Daily {
                record.insert_number("solar_forHomoran", total);
                record.insert_number("solar_estimateForHomoran", estimate);
            }
        }
        AggregationRule::Mode { night_to_day } => {
            let winner = mode(hours.iter().filter_map(|o| field.text(o)));
            let winner = winner.map(|value| match value.strip_suffix("-night") {
                Some(base) if night_to_day && ctx.kind.is_daytime() => format!("{base}-day"),
                _ => value.to_string(),
            });
            record.insert_text(name, winner.as_deref());
        }
    }
}

/// Sum of the hourly PV estimates in Wh, `null` when no hour reports solar input.
fn solar_estimate<S>(hours: &[&HourlyObservation], ctx: &BucketContext<'_, S>) -> Option<f64>
where
    S: SunPositionProvider + ?Sized,
{
    let estimates: Vec<f64> = hours
        .iter()
        .filter_map(|obs| {
            obs.solar
                .map(|solar| ctx.estimator.hourly(solar * ctx.solar_scale, obs.timestamp))
        })
        .collect();
    rounded(sum(&estimates), 1)
}
