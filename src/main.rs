// Copyright (c) 2026 decarbonator project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/decarbonator/decarbonator-rs

//! Decarbonator - Plant Environmental Telemetry Engine
//!
//! Headless demo runner: simulates a few plants, derives summary statistics
//! and the action log from their reading streams, and exercises the CO2
//! cache. The dashboard that renders all of this lives elsewhere and only
//! consumes the engine's output.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use decarbonator::{
    Config, Engine, Metric, PlantSimulator, SortField, TimeWindow, VERSION,
};

/// Decarbonator - Plant Environmental Telemetry Engine
#[derive(Parser, Debug)]
#[command(name = "decarbonator")]
#[command(author = "Decarbonator Project")]
#[command(version = VERSION)]
#[command(about = "Derives chart statistics, action logs, and CO2 totals from plant telemetry")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Number of simulated plants
    #[arg(long)]
    plants: Option<usize>,

    /// Hours of simulated history per plant
    #[arg(long)]
    hours: Option<u32>,

    /// Random seed for reproducible demo data
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Decarbonator v{} - Plant Environmental Telemetry Engine", VERSION);

    // Load or create configuration
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if let Some(plants) = args.plants {
        config.simulator.plants = plants;
    }
    if let Some(hours) = args.hours {
        config.simulator.span_hours = hours;
    }

    info!("Configuration loaded from {:?}", config_path);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_demo(config, args.seed))
}

/// Simulates plants and walks the whole derivation pipeline once.
async fn run_demo(config: Config, seed: Option<u64>) -> Result<()> {
    const NAMES: [(&str, &str); 4] = [
        ("Monstera", "Monstera deliciosa"),
        ("Basil", "Ocimum basilicum"),
        ("Aloe", "Aloe vera"),
        ("Fiddle-Leaf Fig", "Ficus lyrata"),
    ];

    let config = Arc::new(config);
    let engine = Engine::new(config.clone());

    let mut sim = match seed {
        Some(seed) => PlantSimulator::with_seed(config.simulator.clone(), seed),
        None => PlantSimulator::new(config.simulator.clone()),
    };
    for i in 0..config.simulator.plants {
        let (name, species) = NAMES[i % NAMES.len()];
        engine.register_plant(sim.plant(name, species));
    }

    // Per-plant quick stats over the 6-hour preset
    for plant in engine.plants() {
        info!("--- {} ({}) ---", plant.name, plant.species);
        for metric in Metric::ALL {
            match engine.statistics(&plant, metric, TimeWindow::LastHours(6)) {
                Ok(summary) => info!(
                    "{:>18}: current {:.1} {} (avg {:.1}, min {:.1}, max {:.1})",
                    metric.label(),
                    summary.current,
                    metric.unit(),
                    summary.average,
                    summary.min,
                    summary.max
                ),
                Err(err) => info!("{:>18}: {}", metric.label(), err),
            }
        }
    }

    // Action log, newest first, then re-sorted by plant name
    let mut log = engine.build_action_log();
    info!("Action log ({} entries):", log.len());
    for action in log.view().iter().take(10) {
        info!(
            "  {}  {:<16} {:<15} delta {:.1}",
            action.timestamp.format("%H:%M"),
            action.plant_name,
            action.action_type.label(),
            action.magnitude
        );
    }
    let (field, direction) = log.toggle_sort(SortField::PlantName);
    info!("Re-sorted by {:?} {:?}", field, direction);

    // CO2 cache round trip
    let total = engine.co2_total().await?;
    info!("Total CO2 absorbed: {:.1} ppm (computed)", total);
    let cached = engine.co2_total().await?;
    info!("Total CO2 absorbed: {:.1} ppm (cached)", cached);
    engine.co2_invalidate().await;
    let recomputed = engine.co2_total().await?;
    info!("Total CO2 absorbed: {:.1} ppm (after invalidate)", recomputed);
    let refreshed = engine.co2_refresh().await?;
    info!("Total CO2 absorbed: {:.1} ppm (forced refresh)", refreshed);

    Ok(())
}
