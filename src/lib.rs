// Copyright (c) 2026 decarbonator project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/decarbonator/decarbonator-rs

//! Decarbonator - Plant Environmental Telemetry Engine
//!
//! Turns raw, noisy, continuously-sampled plant sensor streams (O2,
//! temperature, humidity, soil moisture, light) into consumable output:
//! time-range-filtered summary statistics for charts, a derived sortable
//! log of discrete actions inferred from threshold crossings, and a
//! cheaply-queryable cached CO2 total with explicit refresh semantics.
//!
//! # Architecture
//!
//! ```text
//! per-plant readings ──► TimeRangeFilter ──► MetricStatistics ──► charts
//!          │
//!          └──► EventDetector ──► ActionLog (stable multi-key sort)
//!
//! Co2Source ──► Co2AggregateCache (single-flight refresh) ──► summaries
//! ```
//!
//! Everything except the cache is a pure, synchronous transform; the cache
//! is the one piece of shared mutable state and its upstream fetch is the
//! engine's only suspension point.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod analysis;
pub mod co2;
pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod telemetry;

// Re-exports for convenience
pub use analysis::{
    compute_statistics, downsample, filter_by_window, filter_by_window_at, BucketPoint,
    MetricSummary, TimeWindow,
};
pub use co2::{CacheState, Co2AggregateCache, Co2CacheEntry, Co2Source};
pub use config::Config;
pub use crate::core::Engine;
pub use detection::{
    detect_actions, sort_actions, Action, ActionLog, ActionType, SortDirection, SortField,
};
pub use error::EngineError;
pub use telemetry::{Metric, Plant, PlantSimulator, Reading};

/// Decarbonator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decarbonator name
pub const NAME: &str = "Decarbonator";
