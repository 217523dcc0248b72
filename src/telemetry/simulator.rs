// Copyright (c) 2026 decarbonator project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/decarbonator/decarbonator-rs

//! Plant simulator for demo/testing

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::prelude::*;
use rand_distr::Normal;
use std::f64::consts::PI;
use uuid::Uuid;

use super::{Plant, Reading};
use crate::config::SimulatorConfig;

/// Generates plausible diurnal reading sequences for demo mode, so the
/// pipeline can run without a greenhouse attached.
pub struct PlantSimulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl PlantSimulator {
    /// Creates a simulator seeded from entropy.
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a simulator with a fixed seed for reproducible runs.
    pub fn with_seed(config: SimulatorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produces a registered plant with a full simulated reading history
    /// ending at the current instant.
    pub fn plant(&mut self, name: &str, species: &str) -> Plant {
        let mut plant = Plant::new(&Uuid::new_v4().to_string(), name, species);
        plant.health = Some("Good".to_string());
        plant.last_watered = Some("2 days ago".to_string());
        plant.readings = self.readings(Utc::now());
        plant
    }

    /// Generates the reading sequence, ordered oldest to newest.
    fn readings(&mut self, end: DateTime<Utc>) -> Vec<Reading> {
        let step_mins = self.config.sample_interval_mins.max(1);
        let count = (self.config.span_hours as usize * 60) / step_mins as usize;

        let mut soil: f64 = self.rng.gen_range(40.0..55.0);
        let mut readings = Vec::with_capacity(count + 1);

        for i in (0..=count).rev() {
            let ts = end - Duration::minutes(step_mins as i64 * i as i64);

            // Hour-of-day drives the daylight curve; grow lights add a hard
            // step on top of it in the evening.
            let hour = ts.hour() as f64 + ts.minute() as f64 / 60.0;
            let daylight = ((hour - 6.0) / 12.0 * PI).sin().max(0.0);
            let grow_light = if (18.0..22.0).contains(&hour) { 300.0 } else { 0.0 };
            let light = daylight * 400.0
                + grow_light
                + self.rng.sample::<f64, _>(Normal::new(0.0, 10.0).unwrap());

            let temperature =
                22.0 + daylight * 4.0 + self.rng.sample::<f64, _>(Normal::new(0.0, 0.4).unwrap());
            let humidity =
                70.0 - daylight * 8.0 + self.rng.sample::<f64, _>(Normal::new(0.0, 1.5).unwrap());
            let o2 =
                20.9 + daylight * 0.6 + self.rng.sample::<f64, _>(Normal::new(0.0, 0.15).unwrap());

            // Soil dries slowly and jumps on the occasional watering.
            soil -= self.rng.gen_range(0.0..0.15);
            if self.rng.gen::<f64>() < 0.005 {
                soil = self.rng.gen_range(55.0..70.0);
            }

            let mut reading = Reading::new(ts);
            reading.o2 = Some(o2);
            reading.temperature = Some(temperature);
            reading.humidity = Some(humidity.clamp(0.0, 100.0));
            reading.soil_moisture = Some(soil.clamp(0.0, 100.0));
            reading.light = Some(light.max(0.0));
            readings.push(reading);
        }

        readings
    }
}
