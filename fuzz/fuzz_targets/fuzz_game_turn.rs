#![no_main]

//! Full game fuzzer.
//!
//! Generates a board from a scripted or seeded random source, then feeds an
//! arbitrary stream of input symbols through the session loop. Checks that
//! turn accounting and the game invariants survive any input.

use arbitrary::Arbitrary;
use gem_hunters::game::{Board, Cell, MAX_TURNS, Position, check_invariants};
use gem_hunters::{
    Game, GameEvent, GameView, Outcome, ScriptedInput, ScriptedRng, SeededRng, TurnError, play,
};
use libfuzzer_sys::fuzz_target;

/// How the board is generated.
#[derive(Arbitrary, Debug)]
enum BoardSource {
    /// `ChaCha8` stream from a seed.
    Seeded(u64),
    /// Replay these draws (may collide repeatedly).
    Scripted(Vec<u8>),
}

/// Structured input for full game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    board: BoardSource,
    /// Raw input symbols, valid or not.
    symbols: Vec<char>,
}

/// Counts accepted and rejected turns.
#[derive(Default)]
struct CountingView {
    accepted: u32,
    rejected: u32,
    outcome: Option<Outcome>,
}

impl GameView for CountingView {
    fn board(&mut self, cells: &mut dyn Iterator<Item = (Position, Cell)>) -> std::io::Result<()> {
        assert_eq!(cells.count(), 36);
        Ok(())
    }

    fn status(&mut self, _status: &gem_hunters::game::TurnStatus) -> std::io::Result<()> {
        Ok(())
    }

    fn event(&mut self, event: &GameEvent) -> std::io::Result<()> {
        match event {
            GameEvent::Moved(_) => self.accepted += 1,
            GameEvent::Rejected(err) => {
                assert_ne!(*err, TurnError::GameOver, "loop kept going after game over");
                self.rejected += 1;
            }
            GameEvent::GameOver(announcement) => self.outcome = Some(announcement.outcome),
            GameEvent::GemFound(_) => {}
        }
        Ok(())
    }
}

fuzz_target!(|input: GameInput| {
    // Cap values to avoid excessive runtime
    let symbols: String = input.symbols.into_iter().take(200).collect();

    let board = match input.board {
        BoardSource::Seeded(seed) => Board::generate(&mut SeededRng::new(seed)),
        BoardSource::Scripted(draws) => {
            Board::generate(&mut ScriptedRng::new(draws.into_iter().map(usize::from)))
        }
    };

    let mut game = Game::with_board(board);
    let violations = check_invariants(&game);
    assert!(violations.is_empty(), "Invariants violated at start: {violations:?}");

    let mut view = CountingView::default();
    let outcome = play(&mut game, &mut ScriptedInput::new(&symbols), &mut view)
        .expect("in-memory boundaries cannot fail");

    assert_eq!(game.total_turns(), view.accepted);
    assert!(game.total_turns() <= MAX_TURNS);
    assert_eq!(outcome, view.outcome);
    assert_eq!(outcome.is_some(), game.is_game_over());

    let violations = check_invariants(&game);
    assert!(violations.is_empty(), "Invariants violated at end: {violations:?}");
});
