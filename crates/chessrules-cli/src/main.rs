//! chessrules - two players, one terminal.
//!
//! Reads coordinate moves from stdin, validates them with the rules engine,
//! and prints the board and game state after every move. Engine diagnostics
//! go to stderr through `tracing`.

mod command;
mod config;
mod console;
mod render;

use chessrules_engine::{Board, TracingSink};
use clap::Parser;
use config::Config;
use console::Console;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Play chess at the terminal with full rules checking.
#[derive(Parser)]
#[command(name = "chessrules")]
#[command(about = "Play chess at the terminal with full rules checking")]
struct Args {
    /// Path to the configuration file (defaults to ./chessrules.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, overriding the configuration file (e.g. "warn", "chessrules=debug")
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let filter = args.log_level.as_deref().unwrap_or(&config.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting chessrules");
    if let Some(path) = &args.config {
        tracing::info!("Config: {:?}", path);
    }

    let board = Board::with_diagnostics(Arc::new(TracingSink));
    let mut console = Console::new(board, config.display);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    console.run(stdin.lock(), &mut stdout)?;

    tracing::info!("Leaving chessrules");
    Ok(())
}
