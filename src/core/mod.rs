//! Core module - wires config, the plant registry, and the CO2 cache

mod engine;

pub use engine::{Engine, RegistryCo2Source};
