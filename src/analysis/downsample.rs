//! Interval downsampling for chart series
//!
//! The raw loggers sample every few seconds; charts over a day or more want
//! 5-minute, hourly, or daily buckets instead. Buckets are aligned to the
//! Unix epoch so the same interval always produces the same bucket edges.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::{Metric, Reading};

/// Mean of one metric over one aligned time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketPoint {
    /// Inclusive start of the bucket.
    pub bucket_start: DateTime<Utc>,
    /// Arithmetic mean of the usable samples in the bucket.
    pub average: f64,
}

/// Averages `metric` over consecutive `bucket`-sized intervals. Empty
/// buckets are omitted, malformed samples are skipped, and the output is
/// ordered by bucket start. A non-positive bucket yields nothing.
pub fn downsample(readings: &[Reading], metric: Metric, bucket: Duration) -> Vec<BucketPoint> {
    let bucket_secs = bucket.num_seconds();
    if bucket_secs <= 0 {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut current: Option<(i64, f64, usize)> = None;

    for reading in readings {
        let Some(value) = metric.value_of(reading) else {
            continue;
        };
        let start = reading.timestamp.timestamp().div_euclid(bucket_secs) * bucket_secs;

        match current.as_mut() {
            Some((bucket_start, sum, count)) if *bucket_start == start => {
                *sum += value;
                *count += 1;
            }
            _ => {
                flush(&mut points, current.take());
                current = Some((start, value, 1));
            }
        }
    }
    flush(&mut points, current);

    points
}

fn flush(points: &mut Vec<BucketPoint>, bucket: Option<(i64, f64, usize)>) {
    let Some((start, sum, count)) = bucket else {
        return;
    };
    if let Some(bucket_start) = DateTime::<Utc>::from_timestamp(start, 0) {
        points.push(BucketPoint {
            bucket_start,
            average: sum / count as f64,
        });
    }
}
