//! Detection module - threshold crossings and the sortable action log

mod detector;
mod log;

pub use detector::detect_actions;
pub use log::{sort_actions, ActionLog, SortDirection, SortField};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discrete event inferred from a threshold crossing between two
/// consecutive readings. Produced, never mutated; recomputed from the
/// source sequence on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Id of the plant whose stream triggered the event.
    pub plant_id: String,
    /// Plant display name, carried so the log can sort by it without
    /// consulting the registry.
    pub plant_name: String,
    /// What crossed the threshold.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Timestamp of the reading that triggered the event.
    pub timestamp: DateTime<Utc>,
    /// Signed delta that crossed the threshold.
    pub magnitude: f64,
}

/// Kind of threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Lux jumped by at least the on-threshold.
    LightOn,
    /// Lux dropped by at least the off-threshold.
    LightOff,
    /// Humidity moved by at least the spike threshold in either direction.
    HumiditySpike,
}

impl ActionType {
    /// Human-readable label for log display.
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::LightOn => "Grow light on",
            ActionType::LightOff => "Grow light off",
            ActionType::HumiditySpike => "Humidity spike",
        }
    }
}
