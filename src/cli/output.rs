//! Output formatting utilities for CLI.

use gem_hunters::game::{Board, Cell, Markers, Position};
use gem_hunters::session::write_board;
use gem_hunters::{Announcement, Game, Outcome, PlayerSlot};
use serde::Serialize;
use std::fmt::Write as _;

/// JSON-serializable game summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameSummary {
    /// Random seed used.
    pub(super) seed: u64,
    /// Whether the turn limit was reached.
    pub(super) completed: bool,
    /// Winner slot (1 or 2), null on a tie or an unfinished game.
    pub(super) winner: Option<u8>,
    /// Outcome message, null if the game was abandoned.
    pub(super) result: Option<String>,
    /// Accepted turns.
    pub(super) turns_played: u32,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerSummary>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerSummary {
    /// Player slot (1 or 2).
    pub(super) slot: u8,
    /// Display name.
    pub(super) name: String,
    /// Gems collected.
    pub(super) gems: u32,
    /// Final position.
    pub(super) position: Position,
}

fn slot_number(slot: PlayerSlot) -> u8 {
    match slot {
        PlayerSlot::One => 1,
        PlayerSlot::Two => 2,
    }
}

impl JsonGameSummary {
    /// Create from a finished or abandoned game.
    pub(super) fn from_game(seed: u64, game: &Game, outcome: Option<Outcome>) -> Self {
        Self {
            seed,
            completed: outcome.is_some(),
            winner: match outcome {
                Some(Outcome::Winner(slot)) => Some(slot_number(slot)),
                Some(Outcome::Tie) | None => None,
            },
            result: outcome.map(|outcome| Announcement::new(outcome, game.names()).to_string()),
            turns_played: game.total_turns(),
            players: game
                .players()
                .iter()
                .map(|p| JsonPlayerSummary {
                    slot: slot_number(p.slot()),
                    name: p.name().to_string(),
                    gems: p.gems(),
                    position: p.position(),
                })
                .collect(),
        }
    }
}

/// Format a game summary as human-readable text.
pub(super) fn format_text(seed: u64, game: &Game, outcome: Option<Outcome>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {seed})");
    match outcome {
        Some(outcome) => {
            let announcement = Announcement::new(outcome, game.names());
            let _ = writeln!(output, "  Result: {announcement}");
        }
        None => {
            let _ = writeln!(output, "  Result: abandoned");
        }
    }
    let _ = writeln!(output, "  Turns: {}\n", game.total_turns());

    for player in game.players() {
        let _ = writeln!(
            output,
            "  {}: {} gem(s) ({}) at {}",
            player.slot(),
            player.gems(),
            player.name(),
            player.position()
        );
    }

    output
}

/// JSON-serializable board layout.
#[derive(Debug, Serialize)]
pub(super) struct JsonBoard {
    /// Random seed used.
    pub(super) seed: u64,
    /// Cell symbols, one row per entry, players on their start cells.
    pub(super) rows: Vec<Vec<&'static str>>,
    /// Gem positions.
    pub(super) gems: Vec<Position>,
    /// Obstacle positions.
    pub(super) obstacles: Vec<Position>,
}

impl JsonBoard {
    /// Create from a freshly generated board.
    pub(super) fn from_board(seed: u64, board: &Board) -> Self {
        let cells: Vec<&'static str> = board
            .render(Markers::starting())
            .map(|(_, cell)| cell.symbol())
            .collect();

        Self {
            seed,
            rows: cells
                .chunks(usize::from(gem_hunters::game::BOARD_SIZE))
                .map(<[_]>::to_vec)
                .collect(),
            gems: board.positions_of(Cell::Gem).collect(),
            obstacles: board.positions_of(Cell::Obstacle).collect(),
        }
    }
}

/// Format a board layout as text, one row per line.
pub(super) fn format_board(seed: u64, board: &Board) -> String {
    let mut rows = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_board(&mut rows, &mut board.render(Markers::starting()));

    format!("Board (seed: {seed})\n{}", String::from_utf8_lossy(&rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gem_hunters::{ScriptedInput, TextView, play};

    fn finished_game() -> Game {
        let board = Board::parse(
            "P1 G - - - -
             -  - - - - -
             -  - - - - -
             -  - - - - -
             -  - - - - -
             -  - - - - P2",
        )
        .unwrap();
        let mut game = Game::with_board(board);
        let script = format!("RU{}", "LDRU".repeat(7));
        play(
            &mut game,
            &mut ScriptedInput::new(&script),
            &mut TextView::new(std::io::sink()),
        )
        .unwrap();
        game
    }

    #[test]
    fn test_json_summary() {
        let game = finished_game();
        let summary = JsonGameSummary::from_game(9, &game, game.outcome());
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["seed"], 9);
        assert_eq!(json["completed"], true);
        assert_eq!(json["winner"], 1);
        assert_eq!(json["result"], "Player 1 (P1) wins!");
        assert_eq!(json["turns_played"], 30);
        assert_eq!(json["players"][0]["gems"], 1);
        assert_eq!(json["players"][1]["position"]["y"], 4);
    }

    #[test]
    fn test_text_summary() {
        let game = finished_game();
        let text = format_text(9, &game, game.outcome());

        assert!(text.starts_with("Game Result (seed: 9)\n"));
        assert!(text.contains("Result: Player 1 (P1) wins!"));
        assert!(text.contains("Player 1: 1 gem(s) (P1)"));
    }

    #[test]
    fn test_summary_uses_player_names() {
        let board = Board::parse(
            "P1 G - - - -
             -  - - - - -
             -  - - - - -
             -  - - - - -
             -  - - - - -
             -  - - - - P2",
        )
        .unwrap();
        let mut game = Game::with_board(board).with_names("Ada", "Grace");
        let script = format!("RU{}", "LDRU".repeat(7));
        play(
            &mut game,
            &mut ScriptedInput::new(&script),
            &mut TextView::new(std::io::sink()),
        )
        .unwrap();

        let summary = JsonGameSummary::from_game(9, &game, game.outcome());
        assert_eq!(summary.result.as_deref(), Some("Player 1 (Ada) wins!"));
        assert!(format_text(9, &game, game.outcome()).contains("Result: Player 1 (Ada) wins!"));
    }

    #[test]
    fn test_abandoned_summary() {
        let game = Game::with_seed(3);
        let summary = JsonGameSummary::from_game(3, &game, None);
        assert!(!summary.completed);
        assert_eq!(summary.winner, None);
        assert!(format_text(3, &game, None).contains("abandoned"));
    }

    #[test]
    fn test_board_outputs() {
        let board = Board::generate(&mut gem_hunters::SeededRng::new(5));
        let json = JsonBoard::from_board(5, &board);
        assert_eq!(json.rows.len(), 6);
        assert_eq!(json.rows[0][0], "P1");
        assert_eq!(json.rows[5][5], "P2");
        assert_eq!(json.gems.len(), 5);
        assert_eq!(json.obstacles.len(), 8);

        let text = format_board(5, &board);
        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().nth(1).unwrap().starts_with("P1 "));
    }
}
