//! Registered plants and their reading sequences

use serde::{Deserialize, Serialize};

use super::Reading;

/// A monitored plant: identity, static metadata, and its owned reading
/// sequence. Created by registration upstream; the engine never mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Botanical species.
    pub species: String,
    /// Image URL or path, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Health label as reported upstream ("Good", "Needs water", ...).
    #[serde(default)]
    pub health: Option<String>,
    /// Last-watered marker, freeform upstream text.
    #[serde(default)]
    pub last_watered: Option<String>,
    /// Reading sequence, ordered by non-decreasing timestamp.
    #[serde(default)]
    pub readings: Vec<Reading>,
}

impl Plant {
    /// Creates a plant with no metadata or readings.
    pub fn new(id: &str, name: &str, species: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            species: species.to_string(),
            image: None,
            health: None,
            last_watered: None,
            readings: Vec::new(),
        }
    }

    /// The most recent reading, if any.
    pub fn latest_reading(&self) -> Option<&Reading> {
        self.readings.last()
    }
}
