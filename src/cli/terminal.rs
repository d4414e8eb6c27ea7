//! Line frontend: redraws the board as text and reads one key per turn.

use super::keys;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use gem_hunters::game::{Cell, Position, TurnStatus};
use gem_hunters::session::write_board;
use gem_hunters::{Game, GameEvent, GameView, InputSource, Outcome, play};
use std::io::{self, Write};

/// Keeps the terminal in raw mode until dropped.
#[derive(Debug)]
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Reads single key presses from the keyboard.
///
/// Raw mode is only held while waiting for a key, so normal output in
/// between keeps its line endings.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn next_symbol(&mut self) -> io::Result<Option<char>> {
        let _raw = RawMode::enable()?;
        keys::read_symbol()
    }
}

/// Clears the screen before each board and keeps the latest notices
/// visible underneath it.
#[derive(Debug)]
pub(super) struct ScreenView<W: Write> {
    out: W,
    notices: Vec<String>,
}

impl<W: Write> ScreenView<W> {
    pub(super) fn new(out: W) -> Self {
        Self {
            out,
            notices: Vec::new(),
        }
    }
}

impl<W: Write> GameView for ScreenView<W> {
    fn board(&mut self, cells: &mut dyn Iterator<Item = (Position, Cell)>) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        write_board(&mut self.out, cells)?;
        writeln!(self.out)?;
        for notice in self.notices.drain(..) {
            writeln!(self.out, "{notice}")?;
        }
        self.out.flush()
    }

    fn status(&mut self, status: &TurnStatus) -> io::Result<()> {
        writeln!(self.out, "{status}")?;
        writeln!(
            self.out,
            "Turn {}/{} - move with U, D, L, R or the arrow keys (Esc quits)",
            status.turns_taken + 1,
            status.max_turns
        )?;
        self.out.flush()
    }

    fn event(&mut self, event: &GameEvent) -> io::Result<()> {
        match event {
            // Final board is already on screen
            GameEvent::GameOver(_) => {
                writeln!(self.out, "{event}")?;
                self.out.flush()
            }
            GameEvent::Moved(_) | GameEvent::GemFound(_) | GameEvent::Rejected(_) => {
                self.notices.push(event.to_string());
                Ok(())
            }
        }
    }
}

/// Play on the terminal with the line frontend.
pub(super) fn run(game: &mut Game) -> io::Result<Option<Outcome>> {
    let stdout = io::stdout();
    let mut view = ScreenView::new(stdout.lock());
    play(game, &mut KeyboardInput, &mut view)
}
