//! Game state management: turn order, scoring and the end condition.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{TurnError, TurnResult};
use crate::game::{
    Board, Direction, GemFound, MAX_TURNS, Markers, Player, PlayerSlot, Position, Render,
    assert_invariants,
};
use crate::rng::{RandomSource, SeededRng};

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// One player collected strictly more gems.
    Winner(PlayerSlot),
    /// Both players collected the same number of gems.
    Tie,
}

impl Outcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(self, slot: PlayerSlot) -> bool {
        self == Outcome::Winner(slot)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(slot) => write!(f, "{slot} ({}) wins!", slot.marker()),
            Outcome::Tie => f.write_str("It's a tie!"),
        }
    }
}

/// Final result as announced to the players, with their display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    /// Final result.
    pub outcome: Outcome,
    /// Player names, indexed by slot.
    pub names: [String; 2],
}

impl Announcement {
    /// Pair an outcome with the names it is announced with.
    #[must_use]
    pub const fn new(outcome: Outcome, names: [String; 2]) -> Self {
        Self { outcome, names }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Winner(slot) => write!(f, "{slot} ({}) wins!", self.names[slot.index()]),
            Outcome::Tie => f.write_str("It's a tie!"),
        }
    }
}

/// What happened during an accepted turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Who moved.
    pub player: PlayerSlot,
    /// Direction moved.
    pub direction: Direction,
    /// Cell before the move.
    pub from: Position,
    /// Cell after the move.
    pub to: Position,
    /// Gem picked up on arrival, if any.
    pub gem: Option<GemFound>,
    /// Accepted turns so far, this one included.
    pub turns_taken: u32,
}

/// Turn and score summary shown before each move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnStatus {
    /// Accepted turns so far.
    pub turns_taken: u32,
    /// Turn limit.
    pub max_turns: u32,
    /// Whose turn it is.
    pub current: PlayerSlot,
    /// Player names, indexed by slot.
    pub names: [String; 2],
    /// Gem counts, indexed by slot.
    pub gems: [u32; 2],
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [one, two] = &self.names;
        writeln!(f, "Current turn: {}", self.names[self.current.index()])?;
        write!(
            f,
            "Gems collected: {} ({one}) - {} ({two})",
            self.gems[0], self.gems[1]
        )
    }
}

/// Complete game state.
///
/// Owns the board and both players. Player 1 moves on even turn counts,
/// Player 2 on odd ones; only accepted moves advance the count.
#[derive(Debug, Clone)]
pub struct Game {
    /// Gems and obstacles.
    pub(crate) board: Board,
    /// Both players, indexed by [`PlayerSlot::index`].
    pub(crate) players: [Player; 2],
    /// Accepted turns so far.
    pub(crate) total_turns: u32,
    /// Player who moved last; their marker shows on a shared cell.
    pub(crate) last_mover: PlayerSlot,
}

impl Game {
    /// Start a game on a freshly generated board.
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::with_board(Board::generate(rng))
    }

    /// Start a game on a board generated from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        info!(seed, "starting game");
        Self::new(&mut SeededRng::new(seed))
    }

    /// Start a game on a prepared board, players on their start cells.
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            players: [Player::new(PlayerSlot::One), Player::new(PlayerSlot::Two)],
            total_turns: 0,
            last_mover: PlayerSlot::One,
        }
    }

    /// Give both players display names.
    ///
    /// Intended for a fresh game: players are reset to their start cells.
    #[must_use]
    pub fn with_names(mut self, one: impl Into<String>, two: impl Into<String>) -> Self {
        self.players = [
            Player::named(PlayerSlot::One, one),
            Player::named(PlayerSlot::Two, two),
        ];
        self
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Both players, Player 1 first.
    #[must_use]
    pub const fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// A player by slot.
    #[must_use]
    pub const fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    /// Accepted turns so far.
    #[must_use]
    pub const fn total_turns(&self) -> u32 {
        self.total_turns
    }

    /// Accepted turns left before the game ends.
    #[must_use]
    pub const fn turns_remaining(&self) -> u32 {
        MAX_TURNS.saturating_sub(self.total_turns)
    }

    /// Whose turn it is.
    #[must_use]
    pub const fn current_slot(&self) -> PlayerSlot {
        PlayerSlot::for_turn(self.total_turns)
    }

    /// The player whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> &Player {
        self.player(self.current_slot())
    }

    /// Where the player markers currently sit.
    #[must_use]
    pub fn markers(&self) -> Markers {
        Markers::new(
            self.player(PlayerSlot::One).position(),
            self.player(PlayerSlot::Two).position(),
        )
        .with_on_top(self.last_mover)
    }

    /// Lazy snapshot of the board with both markers overlaid.
    #[must_use]
    pub fn render(&self) -> Render<'_> {
        self.board.render(self.markers())
    }

    /// Check if the turn limit has been reached.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.total_turns >= MAX_TURNS
    }

    /// Play one turn from a raw input symbol.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::InvalidDirectionSymbol`] for anything other than
    /// `U`, `D`, `L`, `R` (any case), otherwise as [`Game::process_turn`].
    pub fn process_symbol(&mut self, symbol: char) -> TurnResult<TurnReport> {
        if self.is_game_over() {
            return Err(TurnError::GameOver);
        }
        let direction = Direction::try_from(symbol).inspect_err(|_| {
            debug!(?symbol, "rejected input symbol");
        })?;
        self.process_turn(direction)
    }

    /// Move the current player one cell in `direction`.
    ///
    /// Validates against the board, moves the player, collects any gem on the
    /// new cell and advances the turn count. A rejected move changes nothing
    /// and the same player moves again.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::IllegalMove`] if the target is off the board or an
    /// obstacle, and [`TurnError::GameOver`] once the turn limit is reached.
    pub fn process_turn(&mut self, direction: Direction) -> TurnResult<TurnReport> {
        if self.is_game_over() {
            return Err(TurnError::GameOver);
        }

        let slot = self.current_slot();
        let player = &mut self.players[slot.index()];

        if !self.board.is_valid_move(player, direction) {
            debug!(player = player.name(), %direction, "rejected move");
            return Err(TurnError::IllegalMove {
                player: slot,
                direction,
            });
        }

        let from = player.position();
        player.apply_move(direction);
        let gem = self.board.collect_gem(player);
        let to = player.position();

        self.total_turns += 1;
        self.last_mover = slot;
        debug!(
            player = self.players[slot.index()].name(),
            %from,
            %to,
            turn = self.total_turns,
            "move accepted"
        );

        assert_invariants(self);

        if self.is_game_over() {
            info!(outcome = %self.standings(), "game over");
        }

        Ok(TurnReport {
            player: slot,
            direction,
            from,
            to,
            gem,
            turns_taken: self.total_turns,
        })
    }

    /// Compare the current gem counts.
    #[must_use]
    pub fn standings(&self) -> Outcome {
        let one = self.player(PlayerSlot::One).gems();
        let two = self.player(PlayerSlot::Two).gems();

        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerSlot::One),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerSlot::Two),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// The final result, once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_game_over().then(|| self.standings())
    }

    /// Current standings with the players' display names.
    #[must_use]
    pub fn announcement(&self) -> Announcement {
        Announcement::new(self.standings(), self.names())
    }

    /// Player display names, indexed by slot.
    #[must_use]
    pub fn names(&self) -> [String; 2] {
        self.players.each_ref().map(|p| p.name().to_string())
    }

    /// Turn and score summary for display.
    #[must_use]
    pub fn status(&self) -> TurnStatus {
        TurnStatus {
            turns_taken: self.total_turns,
            max_turns: MAX_TURNS,
            current: self.current_slot(),
            names: self.names(),
            gems: self.players.each_ref().map(Player::gems),
        }
    }
}
