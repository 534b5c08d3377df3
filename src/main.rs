//! Strictly Simon - CLI
//!
//! Interactive and scripted modes of the memory game.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_simon::{
    DemoPlan, GameConfig, RoundController, TerminalCommand, TerminalUi, TokioTimers, parse_line,
    play_scripted,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing();

    let config = load_config(cli.config.as_deref())?.with_seed(cli.seed);

    match cli.command {
        Command::Play => run_play(config).await,
        Command::Demo {
            rounds,
            mistake_at,
            json,
        } => run_demo(config, DemoPlan { rounds, mistake_at }, json),
    }
}

/// Logs go to stderr so they never interleave with the game's status lines.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,strictly_simon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[instrument]
fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig> {
    match path {
        Some(path) => Ok(GameConfig::from_file(path)?),
        None => {
            info!("No config file given, using classic settings");
            Ok(GameConfig::default())
        }
    }
}

/// Runs the interactive game.
///
/// Player input and timer fires are serialized onto one loop, so the
/// controller only ever sees one event at a time.
#[instrument(skip(config))]
async fn run_play(config: GameConfig) -> Result<()> {
    let (timers, mut fired_rx) = TokioTimers::new();
    let mut game = RoundController::new(
        config.symbol_set()?,
        config.generator(),
        timers,
        TerminalUi::stdout(config.flash_timing()),
        config.timing(),
    );

    let names: Vec<&str> = game.symbols().iter().map(|s| s.name()).collect();
    println!("Press ENTER to start. Answer with: {}", names.join(", "));
    println!("Type 'status' to inspect the game, 'quit' to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                for command in parse_line(&line, game.symbols()) {
                    match command {
                        TerminalCommand::Input(event) => game.handle_input(event),
                        TerminalCommand::Status => {
                            println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
                        }
                        TerminalCommand::Quit => return Ok(()),
                    }
                }
            }
            Some(fired) = fired_rx.recv() => game.on_timer(fired),
        }
    }

    Ok(())
}

/// Runs a scripted player and prints what the game showed.
#[instrument(skip(config))]
fn run_demo(config: GameConfig, plan: DemoPlan, json: bool) -> Result<()> {
    let report = play_scripted(&config, plan)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for event in report.transcript() {
        println!("{}", event);
    }
    println!("Highest level reached: {}", report.highest_level());
    Ok(())
}
