//! Player state management.

use std::fmt;

use serde::Serialize;

use crate::game::{Cell, Direction, Position};

/// Which of the two seats a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerSlot {
    /// Moves first, starts top-left.
    One,
    /// Moves second, starts bottom-right.
    Two,
}

impl PlayerSlot {
    /// Both slots in turn order.
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Index into per-player arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// The other slot.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Board marker for this player.
    #[must_use]
    pub const fn marker(self) -> Cell {
        match self {
            PlayerSlot::One => Cell::Player1,
            PlayerSlot::Two => Cell::Player2,
        }
    }

    /// Cell this player starts on.
    #[must_use]
    pub const fn start(self) -> Position {
        match self {
            PlayerSlot::One => Position::PLAYER_ONE_START,
            PlayerSlot::Two => Position::PLAYER_TWO_START,
        }
    }

    /// The slot whose turn it is after `turns_taken` accepted moves.
    #[must_use]
    pub const fn for_turn(turns_taken: u32) -> Self {
        if turns_taken % 2 == 0 {
            PlayerSlot::One
        } else {
            PlayerSlot::Two
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSlot::One => f.write_str("Player 1"),
            PlayerSlot::Two => f.write_str("Player 2"),
        }
    }
}

/// State for a single player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    slot: PlayerSlot,
    name: String,
    position: Position,
    gems: u32,
}

impl Player {
    /// Create a player on its start cell with no gems.
    ///
    /// The default name is the slot's marker (`P1`/`P2`).
    #[must_use]
    pub fn new(slot: PlayerSlot) -> Self {
        Self::named(slot, slot.marker().to_string())
    }

    /// Create a player with a custom display name.
    pub fn named(slot: PlayerSlot, name: impl Into<String>) -> Self {
        Self {
            slot,
            name: name.into(),
            position: slot.start(),
            gems: 0,
        }
    }

    /// Seat this player occupies.
    #[must_use]
    pub const fn slot(&self) -> PlayerSlot {
        self.slot
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Gems collected so far.
    #[must_use]
    pub const fn gems(&self) -> u32 {
        self.gems
    }

    /// Move one cell in `direction`.
    ///
    /// No validation happens here; the board must approve the move first.
    pub fn apply_move(&mut self, direction: Direction) {
        self.position.move_toward(direction);
    }

    /// Credit one collected gem.
    pub(crate) fn add_gem(&mut self) {
        self.gems += 1;
    }
}
