use crate::radar::frame::{RadarFrame, UNOBSERVED};
use crate::radar::grid::{cumulative_max, RadarGrid};
use crate::types::record::Record;
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};

/// Minutes covered by one radar frame.
pub const FRAME_MINUTES: u32 = 5;

/// Look-ahead horizons of the nowcast, in minutes.
pub const HORIZONS: [u32; 7] = [5, 10, 15, 30, 45, 60, 90];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastEntry {
    pub minutes: u32,
    /// Largest per-frame maximum within the horizon, mm per 5 minutes.
    pub max: f64,
    /// Largest single-cell total over the horizon, mm.
    pub cumulative_max: f64,
}

impl ForecastEntry {
    pub fn key(&self) -> String {
        format!("next_{:02}min", self.minutes)
    }

    pub fn sum_key(&self) -> String {
        format!("next_{:02}min_sum", self.minutes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    entries: Vec<ForecastEntry>,
}

/// Number of frames needed to cover `minutes`.
fn frames_for(minutes: u32) -> usize {
    minutes.div_ceil(FRAME_MINUTES) as usize
}

impl ForecastTable {
    /// Builds the table from frames and raw grids, both ordered by ascending timestamp.
    pub fn compute(frames: &[RadarFrame], raw: &[RadarGrid]) -> Self {
        let entries = HORIZONS
            .iter()
            .map(|&minutes| {
                let k = frames_for(minutes);
                let max = frames
                    .iter()
                    .take(k)
                    .map(|f| OrderedFloat(f.max()))
                    .max()
                    .map_or(UNOBSERVED, OrderedFloat::into_inner);
                let cumulative_max = cumulative_max(raw.iter().take(k)).unwrap_or(UNOBSERVED);
                ForecastEntry {
                    minutes,
                    max,
                    cumulative_max,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.entries
    }

    pub fn get(&self, minutes: u32) -> Option<&ForecastEntry> {
        self.entries.iter().find(|e| e.minutes == minutes)
    }

    /// Flat record with `next_05min`, `next_05min_sum`, ... keys.
    pub fn to_record(&self) -> Record {
        let mut record = Record::default();
        for entry in &self.entries {
            record.insert_number(entry.key(), Some(entry.max));
            record.insert_number(entry.sum_key(), Some(entry.cumulative_max));
        }
        record
    }
}

impl Serialize for ForecastTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}
