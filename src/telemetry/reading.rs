// Copyright (c) 2026 decarbonator project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/decarbonator/decarbonator-rs

//! Raw sensor readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One sample for one plant at one instant.
///
/// Produced by the ingestion source, read-only to the engine. Fields arrive
/// as upstream JSON with camelCase keys; a missing or non-numeric field
/// deserializes to `None` and is skipped per-field downstream rather than
/// failing the whole scan. Readings for a plant form a sequence ordered by
/// non-decreasing timestamp; duplicate timestamps are treated as consecutive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Sample instant. ISO-8601 with timezone offset on the wire,
    /// e.g. `2025-11-21T20:00:00+07:00`.
    pub timestamp: DateTime<Utc>,

    /// O2 level in percent.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub o2: Option<f64>,

    /// Air temperature in degrees Celsius.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature: Option<f64>,

    /// Relative humidity in percent.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub humidity: Option<f64>,

    /// Soil moisture in percent.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub soil_moisture: Option<f64>,

    /// Illuminance in lux.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub light: Option<f64>,
}

impl Reading {
    /// Creates an empty reading at `timestamp` with no field values set.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            o2: None,
            temperature: None,
            humidity: None,
            soil_moisture: None,
            light: None,
        }
    }
}

/// Accepts any JSON value for a sensor field and keeps only finite numbers.
/// The WISE loggers occasionally emit blanks or placeholder strings mid-file.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()))
}
