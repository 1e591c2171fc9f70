//! Rule-based weather icon classification.
//!
//! Both classifiers are pure functions and produce two keys: a general [`Icon`] and an
//! [`AlternateIcon`] that names an asset file with finer "possibly-…" variants.

pub mod bucket;
pub mod keys;
pub mod single;
pub mod thresholds;

pub use bucket::{classify_bucket, BucketStats};
pub use keys::{AlternateIcon, Classification, DayPart, Icon};
pub use single::{classify_reading, Reading};
pub use thresholds::PossibleRainWindow;
