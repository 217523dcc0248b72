//! Engine error taxonomy

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by the telemetry engine.
///
/// Sensor data is inherently unreliable, so every variant here is a
/// partial-degradation signal: a failed statistics call or cache recompute
/// never poisons other plants, other metrics, or the stored cache entry.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Statistics were requested over zero usable samples. Reported
    /// explicitly so callers can tell "no data" apart from a legitimate
    /// zero reading.
    #[error("no usable readings for the requested metric")]
    EmptyInput,

    /// The CO2 data source failed during a recompute. The cache keeps its
    /// last known value and the entry stays stale.
    #[error("CO2 data source unavailable: {0}")]
    UpstreamUnavailable(#[from] anyhow::Error),

    /// A reading is missing a usable numeric value for a field. Scan paths
    /// skip the field instead of raising this; it exists for callers that
    /// need strict, single-reading access.
    #[error("reading at {timestamp} has no usable `{field}` value")]
    MalformedReading {
        /// Name of the offending field.
        field: &'static str,
        /// Timestamp of the offending reading.
        timestamp: DateTime<Utc>,
    },
}
