//! Development tasks for the combo workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Replay, Toggles};

/// Development tasks for the combo workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the combo engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay a RON scenario and print every resolution
    Replay(Replay),

    /// List the toggles a job registers and whether they are enabled
    Toggles(Toggles),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for COMBO_* variables)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay(cmd) => cmd.execute(),
        Command::Toggles(cmd) => cmd.execute(),
    }
}
