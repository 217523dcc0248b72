// Copyright (c) 2026 decarbonator project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/decarbonator/decarbonator-rs

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Application version
    pub version: String,

    /// Log level
    pub log_level: String,

    /// Enable demo mode (simulated plants)
    pub demo_mode: bool,

    /// Event detection thresholds
    pub detection: DetectionConfig,

    /// CO2 cache policy
    pub cache: CacheConfig,

    /// Demo simulator settings
    pub simulator: SimulatorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Decarbonator".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            demo_mode: true,
            detection: DetectionConfig::default(),
            cache: CacheConfig::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            // Create parent directories
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("decarbonator"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Thresholds for the event detector. Explicit configuration rather than
/// embedded constants, so tests can sweep them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Absolute humidity change (percentage points) between consecutive
    /// readings that counts as a spike.
    pub humidity_spike_threshold: f64,

    /// Lux increase between consecutive readings that reads as the grow
    /// light switching on.
    pub lux_on_threshold: f64,

    /// Lux decrease that reads as the grow light switching off. Kept
    /// separate from the on-threshold for hysteresis.
    pub lux_off_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            humidity_spike_threshold: 8.0,
            lux_on_threshold: 200.0,
            lux_off_threshold: 150.0,
        }
    }
}

/// CO2 cache policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age in seconds before a fresh entry counts as stale on the
    /// next read. `None` disables time-based expiry.
    pub max_age_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        // The production feed updates roughly every five minutes.
        Self {
            max_age_secs: Some(300),
        }
    }
}

/// Demo simulator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Hours of history to generate per plant
    pub span_hours: u32,

    /// Minutes between samples
    pub sample_interval_mins: u32,

    /// Number of simulated plants
    pub plants: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            span_hours: 24,
            sample_interval_mins: 10,
            plants: 2,
        }
    }
}
