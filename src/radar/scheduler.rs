use crate::radar::forecast::FRAME_MINUTES;
use crate::radar::window::RadarWindow;
use log::debug;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Period between two rotations of a radar window.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(FRAME_MINUTES as u64 * 60);

/// Whether the window has to be advanced locally between two radar fetches.
pub fn needs_rotation(poll_interval: Duration) -> bool {
    poll_interval > ROTATION_PERIOD
}

/// Rotates `window` once per `period` until it reports that it ran empty.
///
/// The first rotation happens one `period` after the call. Returns the number of
/// rotations performed. Drop the future to stop early, e.g. when a fresh radar
/// response is about to be ingested.
pub async fn drive_rotation(window: &mut RadarWindow, period: Duration) -> usize {
    if window.is_empty() {
        return 0;
    }
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut rotations = 0;
    loop {
        ticker.tick().await;
        rotations += 1;
        if !window.rotate() {
            debug!("Radar rotation stopped after {rotations} rotation(s)");
            return rotations;
        }
    }
}
