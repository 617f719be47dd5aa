//! Development tasks for the dungeon workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Play};

/// Development tasks for the dungeon workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the dungeon engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a scripted sequence of commands against a scenario
    Play(Play),

    /// Inspect a saved dungeon snapshot
    Inspect(Inspect),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for DUNGEON_CONFIG and RUST_LOG)
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    }
}
