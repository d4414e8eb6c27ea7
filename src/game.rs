//! Game layer for Gem Hunters.
//!
//! Implements the rules of the game:
//! - Positions and directions on the 6x6 grid
//! - Board with gems and obstacles
//! - Players and their gem counts
//! - Turn processing and the end condition

mod board;
mod invariants;
mod player;
mod position;
mod state;

pub use board::{Board, CELL_COUNT, Cell, GemFound, Markers, Render};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use player::{Player, PlayerSlot};
pub use position::{Direction, Position};
pub use state::{Announcement, Game, Outcome, TurnReport, TurnStatus};

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 6;

/// Accepted turns before the game ends.
pub const MAX_TURNS: u32 = 30;

/// Gems scattered on a fresh board.
pub const GEM_COUNT: u32 = 5;

/// Obstacles scattered on a fresh board.
pub const OBSTACLE_COUNT: u32 = 8;
