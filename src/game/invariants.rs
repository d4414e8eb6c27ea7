//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger in a correctly implemented game. They are
//! checked after every accepted turn in debug builds.

use crate::game::{Cell, Game, MAX_TURNS, Player, PlayerSlot};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(game: &Game) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = game.board();

    if game.total_turns() > MAX_TURNS {
        violations.push(InvariantViolation {
            message: format!(
                "Turn count {} exceeds limit {MAX_TURNS}",
                game.total_turns()
            ),
        });
    }

    // Every placed gem is either still on the board or in someone's pocket
    let collected: u32 = game.players().iter().map(Player::gems).sum();
    if board.gems_remaining() + collected != board.gems_placed() {
        violations.push(InvariantViolation {
            message: format!(
                "Gem accounting: {} on board + {collected} collected != {} placed",
                board.gems_remaining(),
                board.gems_placed()
            ),
        });
    }

    if board.obstacle_count() != board.obstacles_placed() {
        violations.push(InvariantViolation {
            message: format!(
                "Obstacle count {} differs from {} placed",
                board.obstacle_count(),
                board.obstacles_placed()
            ),
        });
    }

    for player in game.players() {
        match board.get(player.position()) {
            Cell::Obstacle => violations.push(InvariantViolation {
                message: format!(
                    "{} is standing on an obstacle at {}",
                    player.name(),
                    player.position()
                ),
            }),
            Cell::Gem => violations.push(InvariantViolation {
                message: format!(
                    "{} left a gem uncollected at {}",
                    player.name(),
                    player.position()
                ),
            }),
            Cell::Empty | Cell::Player1 | Cell::Player2 => {}
        }
    }

    let stored_markers = board.positions_of(Cell::Player1).count()
        + board.positions_of(Cell::Player2).count();
    if stored_markers > 0 {
        violations.push(InvariantViolation {
            message: format!("Board stores {stored_markers} player marker(s)"),
        });
    }

    // Snapshot shows each player once, or one marker for a shared cell
    let shown = |cell: Cell| game.render().filter(|&(_, c)| c == cell).count();
    let shared = game.player(PlayerSlot::One).position() == game.player(PlayerSlot::Two).position();
    let expected = if shared { 1 } else { 2 };
    let markers = shown(Cell::Player1) + shown(Cell::Player2);
    if markers != expected {
        violations.push(InvariantViolation {
            message: format!("Snapshot shows {markers} player markers, expected {expected}"),
        });
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(game: &Game) {
    let violations = check_invariants(game);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_game: &Game) {}
