// Copyright (c) 2026 decarbonator project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/decarbonator/decarbonator-rs

//! Threshold-based event detection
//!
//! Raw sensor noise would produce an event per sample; the detector only
//! reacts to deltas between adjacent readings that clear a configured
//! threshold, with separate light on/off thresholds for hysteresis.

use tracing::debug;

use super::{Action, ActionType};
use crate::config::DetectionConfig;
use crate::telemetry::{Metric, Plant, Reading};

/// Scans `readings` in timestamp order and emits an action for every
/// threshold crossing between adjacent pairs.
///
/// The only state carried between steps is the previous reading, so the
/// scan is idempotent: re-running over the same sequence reproduces the
/// same action set. Sequences of length 0 or 1 yield nothing. A reading
/// missing a field skips that field's rule for its pairs only; the scan
/// never fails.
pub fn detect_actions(plant: &Plant, readings: &[Reading], config: &DetectionConfig) -> Vec<Action> {
    let mut actions = Vec::new();

    for pair in readings.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);

        if let (Some(before), Some(after)) = (
            Metric::Humidity.value_of(prev),
            Metric::Humidity.value_of(cur),
        ) {
            let delta = after - before;
            // Boundary counts as a crossing.
            if delta.abs() >= config.humidity_spike_threshold {
                actions.push(action(plant, ActionType::HumiditySpike, cur, delta));
            }
        }

        if let (Some(before), Some(after)) =
            (Metric::Light.value_of(prev), Metric::Light.value_of(cur))
        {
            let delta = after - before;
            // On and off are mutually exclusive per pair: the deltas have
            // opposite signs.
            if delta >= config.lux_on_threshold {
                actions.push(action(plant, ActionType::LightOn, cur, delta));
            } else if delta <= -config.lux_off_threshold {
                actions.push(action(plant, ActionType::LightOff, cur, delta));
            }
        }
    }

    debug!("{}: {} actions detected", plant.name, actions.len());
    actions
}

fn action(plant: &Plant, action_type: ActionType, trigger: &Reading, magnitude: f64) -> Action {
    Action {
        plant_id: plant.id.clone(),
        plant_name: plant.name.clone(),
        action_type,
        timestamp: trigger.timestamp,
        magnitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 21, 20, 0, 0).unwrap()
    }

    fn plant() -> Plant {
        Plant::new("p-1", "Monstera", "Monstera deliciosa")
    }

    fn config() -> DetectionConfig {
        DetectionConfig {
            humidity_spike_threshold: 8.0,
            lux_on_threshold: 200.0,
            lux_off_threshold: 200.0,
        }
    }

    fn light_seq(values: &[f64]) -> Vec<Reading> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut r = Reading::new(base() + Duration::hours(i as i64));
                r.light = Some(v);
                r
            })
            .collect()
    }

    fn humidity_seq(values: &[f64]) -> Vec<Reading> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut r = Reading::new(base() + Duration::hours(i as i64));
                r.humidity = Some(v);
                r
            })
            .collect()
    }

    #[test]
    fn test_light_on_crossing() {
        let readings = light_seq(&[100.0, 350.0]);
        let actions = detect_actions(&plant(), &readings, &config());

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, ActionType::LightOn);
        assert_eq!(actions[0].timestamp, readings[1].timestamp);
        assert_eq!(actions[0].magnitude, 250.0);
    }

    #[test]
    fn test_light_off_crossing_has_negative_magnitude() {
        let readings = light_seq(&[350.0, 50.0]);
        let actions = detect_actions(&plant(), &readings, &config());

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, ActionType::LightOff);
        assert_eq!(actions[0].magnitude, -300.0);
    }

    #[test]
    fn test_threshold_boundary_counts_as_crossing() {
        let readings = light_seq(&[100.0, 300.0]);
        let actions = detect_actions(&plant(), &readings, &config());
        assert_eq!(actions.len(), 1);

        let below = light_seq(&[100.0, 299.9]);
        assert!(detect_actions(&plant(), &below, &config()).is_empty());
    }

    #[test]
    fn test_humidity_spike_threshold() {
        let spiking = humidity_seq(&[60.0, 70.0]);
        let actions = detect_actions(&plant(), &spiking, &config());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, ActionType::HumiditySpike);
        assert_eq!(actions[0].magnitude, 10.0);

        let quiet = humidity_seq(&[60.0, 65.0]);
        assert!(detect_actions(&plant(), &quiet, &config()).is_empty());
    }

    #[test]
    fn test_downward_humidity_spike_keeps_sign() {
        let readings = humidity_seq(&[70.0, 60.0]);
        let actions = detect_actions(&plant(), &readings, &config());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].magnitude, -10.0);
    }

    #[test]
    fn test_short_sequences_yield_nothing() {
        assert!(detect_actions(&plant(), &[], &config()).is_empty());
        assert!(detect_actions(&plant(), &light_seq(&[500.0]), &config()).is_empty());
    }

    #[test]
    fn test_idempotent_over_same_sequence() {
        let mut readings = light_seq(&[100.0, 350.0, 80.0, 320.0]);
        for (i, r) in readings.iter_mut().enumerate() {
            r.humidity = Some(60.0 + (i as f64) * 9.0);
        }

        let first = detect_actions(&plant(), &readings, &config());
        let second = detect_actions(&plant(), &readings, &config());
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_missing_field_skips_that_rule_only() {
        let mut readings = light_seq(&[100.0, 350.0]);
        readings[0].humidity = None;
        readings[1].humidity = Some(90.0);

        let actions = detect_actions(&plant(), &readings, &config());
        // No humidity pair to diff, but the light rule still fires.
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, ActionType::LightOn);
    }
}
