//! Keyboard mapping shared by the interactive frontends.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;

/// What a key press means to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyAction {
    /// Feed this symbol to the game.
    Symbol(char),
    /// Stop playing.
    Quit,
    /// Not a game key.
    Ignore,
}

/// Map a key press to a game action.
///
/// Arrow keys become `U`/`D`/`L`/`R`; other characters pass through so the
/// game can reject them. Esc and Ctrl-C quit.
pub(super) fn action_for(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'd'))
    {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Up => KeyAction::Symbol('U'),
        KeyCode::Down => KeyAction::Symbol('D'),
        KeyCode::Left => KeyAction::Symbol('L'),
        KeyCode::Right => KeyAction::Symbol('R'),
        KeyCode::Char(c) => KeyAction::Symbol(c),
        _ => KeyAction::Ignore,
    }
}

/// Block until a key press maps to a symbol or a quit.
///
/// Raw mode must already be enabled.
pub(super) fn read_symbol() -> io::Result<Option<char>> {
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match action_for(key) {
                KeyAction::Symbol(c) => return Ok(Some(c)),
                KeyAction::Quit => return Ok(None),
                KeyAction::Ignore => {}
            }
        }
    }
}

/// Block until any key is pressed.
pub(super) fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_map_to_directions() {
        assert_eq!(action_for(press(KeyCode::Up)), KeyAction::Symbol('U'));
        assert_eq!(action_for(press(KeyCode::Down)), KeyAction::Symbol('D'));
        assert_eq!(action_for(press(KeyCode::Left)), KeyAction::Symbol('L'));
        assert_eq!(action_for(press(KeyCode::Right)), KeyAction::Symbol('R'));
    }

    #[test]
    fn test_characters_pass_through() {
        assert_eq!(action_for(press(KeyCode::Char('u'))), KeyAction::Symbol('u'));
        assert_eq!(action_for(press(KeyCode::Char('x'))), KeyAction::Symbol('x'));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(press(KeyCode::Esc)), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_c), KeyAction::Quit);
        assert_eq!(action_for(press(KeyCode::Enter)), KeyAction::Ignore);
    }
}
