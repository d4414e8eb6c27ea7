//! Play command implementation.

use super::output::{JsonGameSummary, format_text};
use super::{CliError, OutputFormat, UiMode, resolve_seed, terminal, tui};
use gem_hunters::{Game, ScriptedInput, TextView, play};
use std::io;
use tracing::info;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the terminal fails or the summary cannot be written.
pub(crate) fn execute(
    seed: Option<u64>,
    ui: UiMode,
    moves: Option<String>,
    names: Option<Vec<String>>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let seed = resolve_seed(seed);

    let mut game = Game::with_seed(seed);
    if let Some(names) = names {
        let [one, two] = <[String; 2]>::try_from(names)
            .map_err(|n| CliError::new(format!("Expected 2 player names, got {}", n.len())))?;
        game = game.with_names(one, two);
    }

    let outcome = match moves {
        Some(moves) => {
            info!(symbols = moves.len(), "playing scripted moves");
            // Keep stdout clean for the JSON summary
            match format {
                OutputFormat::Text => {
                    let stdout = io::stdout();
                    play(&mut game, &mut ScriptedInput::new(&moves), &mut TextView::new(stdout.lock()))?
                }
                OutputFormat::Json => {
                    play(&mut game, &mut ScriptedInput::new(&moves), &mut TextView::new(io::sink()))?
                }
            }
        }
        None => match ui {
            UiMode::Line => terminal::run(&mut game)?,
            UiMode::Tui => tui::run(&mut game)?,
        },
    };

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_text(seed, &game, outcome));
        }
        OutputFormat::Json => {
            let summary = JsonGameSummary::from_game(seed, &game, outcome);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
