//! Board command implementation.

use super::output::{JsonBoard, format_board};
use super::{CliError, OutputFormat, resolve_seed};
use gem_hunters::{Board, SeededRng};

/// Execute the board command.
///
/// # Errors
///
/// Returns an error if the JSON output cannot be encoded.
pub(crate) fn execute(seed: Option<u64>, format: OutputFormat) -> Result<(), CliError> {
    let seed = resolve_seed(seed);
    let board = Board::generate(&mut SeededRng::new(seed));

    match format {
        OutputFormat::Text => print!("{}", format_board(seed, &board)),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&JsonBoard::from_board(seed, &board))?
            );
        }
    }

    Ok(())
}
