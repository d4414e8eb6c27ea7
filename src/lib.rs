// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Gem Hunters: a two-player, turn-based gem hunting game on a 6×6 grid.
//!
//! Players take turns moving one cell up, down, left or right, collecting
//! gems and avoiding obstacles. After 30 accepted moves the player holding
//! more gems wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Frontends (line, TUI, scripted)   │
//! ├─────────────────────────────────────┤
//! │   Session loop (InputSource/View)   │
//! ├─────────────────────────────────────┤
//! │   Game rules (Board, Player, Game)  │
//! ├─────────────────────────────────────┤
//! │   RandomSource (seeded, scripted)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! ```
//! use gem_hunters::{Game, ScriptedInput, TextView, play};
//!
//! let mut game = Game::with_seed(7);
//! let mut view = TextView::new(Vec::new());
//! let outcome = play(&mut game, &mut ScriptedInput::new("RL"), &mut view).unwrap();
//!
//! // Input ran out before the turn limit
//! assert_eq!(outcome, None);
//! ```

pub mod error;
pub mod game;
pub mod rng;
pub mod session;

pub use error::{LayoutError, TurnError, TurnResult};

// Re-export key types at crate root for convenience
pub use game::{Announcement, Board, Cell, Direction, Game, Outcome, Player, PlayerSlot, Position};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use session::{GameEvent, GameView, InputSource, ScriptedInput, TextView, play};
