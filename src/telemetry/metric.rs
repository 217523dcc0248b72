//! Metric selection

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Reading;
use crate::error::EngineError;

/// Which reading field a chart or summary analyzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// O2 level.
    O2,
    /// Air temperature.
    Temperature,
    /// Relative humidity.
    Humidity,
    /// Soil moisture.
    SoilMoisture,
    /// Illuminance.
    Light,
}

impl Metric {
    /// All selectable metrics, in display order.
    pub const ALL: [Metric; 5] = [
        Metric::O2,
        Metric::Temperature,
        Metric::Humidity,
        Metric::SoilMoisture,
        Metric::Light,
    ];

    /// Display label. Informational only, never used by the algorithms.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::O2 => "O2 Level",
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::SoilMoisture => "Soil Moisture",
            Metric::Light => "Light",
        }
    }

    /// Display unit. Informational only.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::O2 => "%",
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::SoilMoisture => "%",
            Metric::Light => "lux",
        }
    }

    /// Extracts this metric's value from a reading. Missing and non-finite
    /// values come back as `None`; every scan path skips those samples.
    pub fn value_of(&self, reading: &Reading) -> Option<f64> {
        let value = match self {
            Metric::O2 => reading.o2,
            Metric::Temperature => reading.temperature,
            Metric::Humidity => reading.humidity,
            Metric::SoilMoisture => reading.soil_moisture,
            Metric::Light => reading.light,
        };
        value.filter(|v| v.is_finite())
    }

    /// Strict variant of [`value_of`](Self::value_of) for callers that need
    /// a single reading's value or an explicit error.
    pub fn require_value(&self, reading: &Reading) -> Result<f64, EngineError> {
        self.value_of(reading).ok_or(EngineError::MalformedReading {
            field: self.field_name(),
            timestamp: reading.timestamp,
        })
    }

    fn field_name(&self) -> &'static str {
        match self {
            Metric::O2 => "o2",
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::SoilMoisture => "soilMoisture",
            Metric::Light => "light",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.unit())
    }
}
