use crate::radar::forecast::{ForecastTable, FRAME_MINUTES};
use crate::radar::frame::{RadarFrame, RadarRecord};
use crate::radar::grid::RadarGrid;
use crate::types::record::Record;
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, trace};

/// How far ahead of `now` radar frames are kept, in minutes.
pub const WINDOW_HORIZON_MINUTES: i64 = 120;
/// Most frames a window holds: one per 5-minute slot of the horizon.
pub const WINDOW_CAPACITY: usize = (WINDOW_HORIZON_MINUTES / FRAME_MINUTES as i64) as usize;

/// Rolling two-hour window of radar frames and their raw grids.
///
/// Frames and raw grids share their front: the `i`-th raw grid belongs to the
/// `i`-th frame. Frames appended by [`RadarWindow::rotate`] have no raw grid.
#[derive(Debug, Clone, Default)]
pub struct RadarWindow {
    frames: Vec<RadarFrame>,
    raw: Vec<RadarGrid>,
}

impl RadarWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the window with the records timestamped in `[now, now + 2h)`.
    ///
    /// The end is exclusive so a full feed fills exactly [`WINDOW_CAPACITY`] slots.
    /// Returns the number of frames kept.
    pub fn ingest(&mut self, records: &[RadarRecord], now: DateTime<Utc>) -> usize {
        let end = now + TimeDelta::minutes(WINDOW_HORIZON_MINUTES);
        let mut kept: Vec<(RadarFrame, RadarGrid)> = records
            .iter()
            .filter(|r| r.timestamp >= now && r.timestamp < end)
            .map(|r| {
                let grid = RadarGrid::from_json(&r.precipitation_5);
                (RadarFrame::observed(r, &grid, now), grid)
            })
            .collect();
        kept.sort_by_key(|(frame, _)| frame.timestamp);

        debug!(
            "Radar ingest kept {} of {} records for {now}",
            kept.len(),
            records.len()
        );
        (self.frames, self.raw) = kept.into_iter().unzip();
        self.frames.len()
    }

    /// Advances the window by one frame.
    ///
    /// Drops the oldest frame and, if any frames remain, appends an unobserved one
    /// five minutes after the newest. Returns whether rotation should continue.
    pub fn rotate(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.frames.remove(0);
        if !self.raw.is_empty() {
            self.raw.remove(0);
        }
        let Some(last) = self.frames.last() else {
            debug!("Radar window ran empty");
            return false;
        };
        let placeholder =
            RadarFrame::unobserved(last, TimeDelta::minutes(i64::from(FRAME_MINUTES)));
        trace!(
            "Rotated radar window, placeholder at {}",
            placeholder.timestamp
        );
        self.frames.push(placeholder);
        true
    }

    pub fn forecast(&self) -> ForecastTable {
        ForecastTable::compute(&self.frames, &self.raw)
    }

    pub fn frames(&self) -> &[RadarFrame] {
        &self.frames
    }

    pub fn raw_grids(&self) -> &[RadarGrid] {
        &self.raw
    }

    /// Frames as flat records, sentinel statistics written as `-1`.
    pub fn records(&self) -> Vec<Record> {
        self.frames.iter().map(RadarFrame::to_record).collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
