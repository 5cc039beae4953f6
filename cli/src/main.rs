//! Group outings command line
//!
//! Loads a scenario (the bundled demo unless `--scenario` is given), hands
//! every child the starting pocket money, replays the scripted actions and
//! prints the resulting group schedule.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use group_outings_core::{Simulation, SimulationConfig};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Scenario used when no file is given
const DEMO_SCENARIO: &str = include_str!("../../scenarios/demo.json");

#[derive(Parser, Debug, Default)]
#[command(name = "group-outings")]
#[command(about = "Replay a children's group outing scenario and print the schedule")]
struct Options {
    /// Scenario JSON file (default: bundled demo)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Starting pocket money for every child (try 300, 400, 500)
    #[arg(long)]
    wallet: Option<i64>,

    /// Print the schedule as JSON
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=info)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(options: &Options) -> Result<SimulationConfig> {
    let raw = match &options.scenario {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?,
        None => DEMO_SCENARIO.to_string(),
    };

    let mut config = SimulationConfig::from_json(&raw)?;
    if let Some(wallet) = options.wallet {
        config.starting_wallet = wallet;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let options = Options::parse();
    init_tracing();

    let config = load_config(&options)?;
    info!(
        group = %config.group_name,
        starting_wallet = config.starting_wallet,
        "loaded scenario"
    );

    let mut simulation = Simulation::new(config)?;
    let summary = simulation.run();
    for rejected in &summary.rejected {
        warn!(action = %rejected.action, reason = %rejected.reason, "not applied");
    }

    let report = simulation.report()?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}
