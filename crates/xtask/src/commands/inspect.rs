//! Read and inspect dungeon snapshots
//!
//! Snapshots are RON files written by `xtask play --save`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use dungeon_core::DungeonState;

use crate::utils;

/// Read and inspect a dungeon snapshot
#[derive(Parser)]
pub struct Inspect {
    /// Snapshot RON file to read
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (player, goals, entity counts)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        if !self.snapshot.exists() {
            anyhow::bail!("Snapshot not found: {}", self.snapshot.display());
        }

        let state = utils::load_snapshot(&self.snapshot)?;

        println!(
            "{} {}",
            style("Snapshot:").bold().cyan(),
            self.snapshot.display()
        );
        println!();

        match self.format {
            OutputFormat::Summary => utils::print_summary(&state),
            OutputFormat::Json => print_json(&state)?,
            OutputFormat::Debug => println!("{:#?}", state),
        }

        Ok(())
    }
}

fn print_json(state: &DungeonState) -> Result<()> {
    let json =
        serde_json::to_string_pretty(state).context("Failed to serialize dungeon to JSON")?;
    println!("{}", json);
    Ok(())
}
