//! Summary statistics for one metric over one filtered window

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::telemetry::{Metric, Reading};

/// Quick-stats block shown next to a chart. All four figures come from the
/// same filtered window, never mixed across windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Value of the last usable reading in the window, unrounded.
    pub current: f64,
    /// Arithmetic mean, rounded to one decimal place.
    pub average: f64,
    /// Minimum, rounded to one decimal place.
    pub min: f64,
    /// Maximum, rounded to one decimal place.
    pub max: f64,
}

/// Computes current/average/min/max for `metric` over `readings`, in
/// sequence order. Readings whose selected field is missing or non-finite
/// are skipped.
///
/// Zero usable samples is reported as [`EngineError::EmptyInput`] rather
/// than a numeric sentinel, so callers can tell "no data" from a window
/// that legitimately averaged to zero.
pub fn compute_statistics(
    readings: &[Reading],
    metric: Metric,
) -> Result<MetricSummary, EngineError> {
    let values: Vec<f64> = readings.iter().filter_map(|r| metric.value_of(r)).collect();

    let Some(&current) = values.last() else {
        return Err(EngineError::EmptyInput);
    };

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in &values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }

    Ok(MetricSummary {
        current,
        average: round1(sum / values.len() as f64),
        min: round1(min),
        max: round1(max),
    })
}

/// One decimal place, matching the dashboard's quick-stats display.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
