//! Error types for turn processing and board layouts.

use derive_more::{Display, Error};

use crate::game::{Cell, Direction, PlayerSlot, Position};

/// Why a turn was rejected.
///
/// None of these are fatal: the session reports them and asks the same
/// player again without consuming a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum TurnError {
    /// The input symbol is not one of `U`, `D`, `L`, `R`.
    #[display("Invalid input. Use U, D, L, R keys to move.")]
    InvalidDirectionSymbol(#[error(not(source))] char),
    /// The target cell is off the board or holds an obstacle.
    #[display("Invalid move. Try again.")]
    IllegalMove {
        /// Player who attempted the move.
        player: PlayerSlot,
        /// Requested direction.
        direction: Direction,
    },
    /// The turn limit has been reached; the game accepts no more moves.
    #[display("The game is over.")]
    GameOver,
}

/// Result of processing a single turn.
pub type TurnResult<T> = Result<T, TurnError>;

/// Errors building a board from a layout or placing cell contents.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LayoutError {
    /// The layout does not have exactly six non-blank rows.
    #[display("layout must have 6 rows, found {rows}")]
    WrongRowCount {
        /// Number of rows found.
        rows: usize,
    },
    /// A row does not have exactly six cells.
    #[display("row {row} must have 6 cells, found {cells}")]
    WrongRowLength {
        /// Offending row (0-based).
        row: usize,
        /// Cells found in that row.
        cells: usize,
    },
    /// A token is not one of `-`, `G`, `O`, `P1`, `P2`.
    #[display("unknown cell {token:?} at {position}")]
    UnknownToken {
        /// The unrecognised token.
        token: String,
        /// Where it was found.
        position: Position,
    },
    /// A player marker appears somewhere other than that player's start cell.
    #[display("{cell} marker at {position} is not on its start cell")]
    MisplacedMarker {
        /// The marker found.
        cell: Cell,
        /// Where it was found.
        position: Position,
    },
    /// The cell already holds something, or is reserved for a player.
    #[display("cell {position} is not free")]
    Occupied {
        /// The offending cell.
        position: Position,
    },
    /// Only gems and obstacles can be placed on the board.
    #[display("{cell} cannot be placed on the board")]
    NotPlaceable {
        /// The rejected cell contents.
        cell: Cell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_error_messages() {
        assert_eq!(
            TurnError::InvalidDirectionSymbol('x').to_string(),
            "Invalid input. Use U, D, L, R keys to move."
        );
        let illegal = TurnError::IllegalMove {
            player: PlayerSlot::One,
            direction: Direction::Up,
        };
        assert_eq!(illegal.to_string(), "Invalid move. Try again.");
    }

    #[test]
    fn test_layout_error_display() {
        let err = LayoutError::Occupied {
            position: Position::PLAYER_ONE_START,
        };
        assert_eq!(err.to_string(), "cell (0, 0) is not free");
    }
}
