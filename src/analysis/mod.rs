//! Analysis module - time-range filtering and summary statistics

mod downsample;
mod statistics;
mod window;

pub use downsample::{downsample, BucketPoint};
pub use statistics::{compute_statistics, MetricSummary};
pub use window::{filter_by_window, filter_by_window_at, TimeWindow};
