//! Command-line interface for strictly_simon.

use clap::{Parser, Subcommand};

/// Strictly Simon - repeat the growing sequence
#[derive(Parser, Debug)]
#[command(name = "strictly_simon")]
#[command(about = "Turn-based memory game in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game configuration
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Fixed random seed (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively: Enter starts, type symbol names to answer
    Play,

    /// Run a scripted player against a virtual clock and print the transcript
    Demo {
        /// Rounds to complete
        #[arg(short, long, default_value = "5")]
        rounds: u32,

        /// Answer the first symbol of this level wrongly
        #[arg(long)]
        mistake_at: Option<u32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
