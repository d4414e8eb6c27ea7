//! Gem Hunters CLI - play the game in a terminal or print generated boards.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Gem Hunters - a two-player gem hunting game on a 6x6 grid
#[derive(Parser, Debug)]
#[command(name = "gem-hunters")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game (two players sharing one keyboard)
    Play {
        /// Random seed for the board (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Interactive frontend: line or tui
        #[arg(short, long, default_value = "line")]
        ui: cli::UiMode,

        /// Play these symbols headlessly instead of reading the keyboard
        #[arg(short, long)]
        moves: Option<String>,

        /// Player names, comma separated (default: P1,P2)
        #[arg(short, long, value_delimiter = ',')]
        names: Option<Vec<String>>,

        /// Summary format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Write logs to this file instead of stderr
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print a generated board layout
    Board {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            seed,
            ui,
            moves,
            names,
            format,
            log_file,
        } => cli::init_logging(log_file.as_deref())
            .and_then(|()| cli::play::execute(seed, ui, moves, names, format)),

        Commands::Board { seed, format } => {
            cli::init_logging(None).and_then(|()| cli::board::execute(seed, format))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
