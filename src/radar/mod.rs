//! Radar nowcast: a rolling two-hour window of 5-minute precipitation frames.

pub mod forecast;
pub mod frame;
pub mod grid;
pub mod scheduler;
pub mod window;

pub use forecast::{ForecastEntry, ForecastTable, HORIZONS};
pub use frame::{parse_radar_response, RadarFrame, RadarRecord, UNOBSERVED};
pub use grid::{RadarGrid, RadarStats};
pub use scheduler::{drive_rotation, needs_rotation, ROTATION_PERIOD};
pub use window::{RadarWindow, WINDOW_CAPACITY};
