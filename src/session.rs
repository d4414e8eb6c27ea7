//! The game loop and its input/output boundaries.
//!
//! [`play`] is the only place that talks to the outside world. It asks an
//! [`InputSource`] for one symbol per turn and reports everything through a
//! [`GameView`]. Terminal frontends live in the binary; [`ScriptedInput`] and
//! [`TextView`] cover tests and headless runs.

use std::fmt;
use std::io::{self, Write};

use tracing::info;

use crate::error::TurnError;
use crate::game::{
    Announcement, BOARD_SIZE, Cell, Game, GemFound, Outcome, Position, TurnReport, TurnStatus,
};

/// Supplies one input symbol per request.
pub trait InputSource {
    /// Block until the next symbol is available.
    ///
    /// Returns `Ok(None)` when the player quits or input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying device.
    fn next_symbol(&mut self) -> io::Result<Option<char>>;
}

/// Receives everything a player should see.
pub trait GameView {
    /// Show the board, one `(position, cell)` pair per cell in row-major order.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the output device.
    fn board(&mut self, cells: &mut dyn Iterator<Item = (Position, Cell)>) -> io::Result<()>;

    /// Show whose turn it is and the scores.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the output device.
    fn status(&mut self, status: &TurnStatus) -> io::Result<()>;

    /// Report something that happened.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the output device.
    fn event(&mut self, event: &GameEvent) -> io::Result<()>;
}

/// Something the players should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was accepted.
    Moved(TurnReport),
    /// A gem was picked up.
    GemFound(GemFound),
    /// The input was rejected; the same player goes again.
    Rejected(TurnError),
    /// The turn limit was reached.
    GameOver(Announcement),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Moved(report) => write!(
                f,
                "{} moved {} to {}",
                report.player, report.direction, report.to
            ),
            GameEvent::GemFound(gem) => write!(f, "{gem}"),
            GameEvent::Rejected(err) => write!(f, "{err}"),
            GameEvent::GameOver(announcement) => write!(f, "Game over!\n{announcement}"),
        }
    }
}

/// Run the game loop until the turn limit or until input runs out.
///
/// Each iteration shows the board and status, reads one symbol and reports
/// the result. Rejected input is reported and the same player is asked
/// again. Returns the outcome, or `None` if the input ended first.
///
/// # Errors
///
/// Returns the first I/O error from either boundary.
pub fn play<I, V>(game: &mut Game, input: &mut I, view: &mut V) -> io::Result<Option<Outcome>>
where
    I: InputSource + ?Sized,
    V: GameView + ?Sized,
{
    while !game.is_game_over() {
        view.board(&mut game.render())?;
        view.status(&game.status())?;

        let Some(symbol) = input.next_symbol()? else {
            info!(turns = game.total_turns(), "input closed, ending game early");
            return Ok(None);
        };

        match game.process_symbol(symbol) {
            Ok(mut report) => {
                let gem = report.gem.take();
                view.event(&GameEvent::Moved(report))?;
                if let Some(gem) = gem {
                    view.event(&GameEvent::GemFound(gem))?;
                }
            }
            Err(err) => view.event(&GameEvent::Rejected(err))?,
        }
    }

    let announcement = game.announcement();
    let outcome = announcement.outcome;
    view.board(&mut game.render())?;
    view.event(&GameEvent::GameOver(announcement))?;
    Ok(Some(outcome))
}

/// Input replayed from a fixed string of symbols.
///
/// Whitespace is skipped. Returns `None` once the script is used up.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    symbols: Vec<char>,
    cursor: usize,
}

impl ScriptedInput {
    /// Create a script from a string such as `"RRDDL"`.
    #[must_use]
    pub fn new(script: &str) -> Self {
        Self {
            symbols: script.chars().filter(|c| !c.is_whitespace()).collect(),
            cursor: 0,
        }
    }

    /// Symbols not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.symbols.len() - self.cursor
    }
}

impl InputSource for ScriptedInput {
    fn next_symbol(&mut self) -> io::Result<Option<char>> {
        let symbol = self.symbols.get(self.cursor).copied();
        if symbol.is_some() {
            self.cursor += 1;
        }
        Ok(symbol)
    }
}

/// Write the board as text, one row per line.
///
/// Each cell is its symbol followed by a space: `P1 - G - - - `.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_board<W: Write + ?Sized>(
    out: &mut W,
    cells: &mut dyn Iterator<Item = (Position, Cell)>,
) -> io::Result<()> {
    for (position, cell) in cells {
        write!(out, "{cell} ")?;
        if position.x() + 1 == BOARD_SIZE {
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Plain-text view writing to any [`Write`] sink.
#[derive(Debug)]
pub struct TextView<W> {
    out: W,
}

impl<W: Write> TextView<W> {
    /// Wrap a writer.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Borrow the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Unwrap the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GameView for TextView<W> {
    fn board(&mut self, cells: &mut dyn Iterator<Item = (Position, Cell)>) -> io::Result<()> {
        write_board(&mut self.out, cells)
    }

    fn status(&mut self, status: &TurnStatus) -> io::Result<()> {
        writeln!(self.out, "{status}")
    }

    fn event(&mut self, event: &GameEvent) -> io::Result<()> {
        writeln!(self.out, "{event}")?;
        self.out.flush()
    }
}
