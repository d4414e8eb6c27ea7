//! Full-screen TUI frontend.

use super::CliError;
use super::keys;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gem_hunters::game::{BOARD_SIZE, Cell, Position, TurnStatus};
use gem_hunters::{Announcement, Game, GameEvent, GameView, InputSource, Outcome, PlayerSlot, play};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{self, stdout};

/// Notices kept on screen.
const MAX_NOTICES: usize = 8;

/// Keys are read while the whole session holds raw mode.
#[derive(Debug, Default, Clone, Copy)]
struct TuiInput;

impl InputSource for TuiInput {
    fn next_symbol(&mut self) -> io::Result<Option<char>> {
        keys::read_symbol()
    }
}

/// What the screen currently shows.
#[derive(Debug, Default)]
struct App {
    cells: Vec<(Position, Cell)>,
    status: Option<TurnStatus>,
    notices: Vec<String>,
    announcement: Option<Announcement>,
}

impl App {
    fn push_notice(&mut self, notice: String) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }
}

/// Redraws the whole screen on every update.
struct TuiView<B: Backend> {
    terminal: Terminal<B>,
    app: App,
}

impl<B: Backend> TuiView<B> {
    fn redraw(&mut self) -> io::Result<()> {
        let app = &self.app;
        self.terminal.draw(|f| ui(f, app))?;
        Ok(())
    }
}

impl<B: Backend> GameView for TuiView<B> {
    fn board(&mut self, cells: &mut dyn Iterator<Item = (Position, Cell)>) -> io::Result<()> {
        self.app.cells = cells.collect();
        self.redraw()
    }

    fn status(&mut self, status: &TurnStatus) -> io::Result<()> {
        self.app.status = Some(status.clone());
        self.redraw()
    }

    fn event(&mut self, event: &GameEvent) -> io::Result<()> {
        if let GameEvent::GameOver(announcement) = event {
            self.app.announcement = Some(announcement.clone());
        }
        self.app.push_notice(event.to_string());
        self.redraw()
    }
}

/// Play a game in the full-screen TUI.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn.
pub(super) fn run(game: &mut Game) -> Result<Option<Outcome>, CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut view = TuiView {
        terminal,
        app: App::default(),
    };

    let result = play(game, &mut TuiInput, &mut view).and_then(|outcome| {
        if outcome.is_some() {
            keys::wait_for_key()?;
        }
        Ok(outcome)
    });

    // Restore terminal
    disable_raw_mode()?;
    execute!(view.terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(result?)
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board and players
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(u16::from(BOARD_SIZE) * 3 + 4),
            Constraint::Min(20),
        ])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(main_chunks[1]);

    render_players(f, side_chunks[0], app);
    render_notices(f, side_chunks[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = match (&app.status, &app.announcement) {
        (_, Some(announcement)) => format!(" Gem Hunters | GAME OVER | {announcement} "),
        (Some(status), None) => format!(
            " Gem Hunters | Turn {}/{} | {} to move ",
            status.turns_taken + 1,
            status.max_turns,
            status.names[status.current.index()]
        ),
        (None, None) => " Gem Hunters ".to_string(),
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .cells
        .chunks(usize::from(BOARD_SIZE))
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&(_, cell)| Span::styled(format!("{:<3}", cell.symbol()), cell_style(cell)))
                .collect();
            Line::from(spans)
        })
        .collect();

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board, area);
}

fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Player1 => Style::default()
            .fg(player_color(PlayerSlot::One))
            .add_modifier(Modifier::BOLD),
        Cell::Player2 => Style::default()
            .fg(player_color(PlayerSlot::Two))
            .add_modifier(Modifier::BOLD),
        Cell::Gem => Style::default().fg(Color::Yellow),
        Cell::Obstacle => Style::default().fg(Color::DarkGray),
        Cell::Empty => Style::default().fg(Color::Gray),
    }
}

fn player_color(slot: PlayerSlot) -> Color {
    match slot {
        PlayerSlot::One => Color::Red,
        PlayerSlot::Two => Color::Blue,
    }
}

fn render_players(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    if let Some(status) = &app.status {
        for slot in PlayerSlot::BOTH {
            let marker = if slot == status.current && app.announcement.is_none() {
                "> "
            } else {
                "  "
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{slot} "),
                    Style::default()
                        .fg(player_color(slot))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "({})  Gems: {}",
                    status.names[slot.index()],
                    status.gems[slot.index()]
                )),
            ]));
        }
    }

    let players = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Players "));

    f.render_widget(players, area);
}

fn render_notices(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .notices
        .iter()
        .flat_map(|notice| notice.lines())
        .map(|line| Line::from(line.to_string()))
        .collect();

    let notices = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Log "))
        .wrap(Wrap { trim: false });

    f.render_widget(notices, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.announcement.is_some() {
        " Press any key to exit "
    } else {
        " [U/D/L/R or arrows] Move  [Esc] Quit "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gem_hunters::{Board, ScriptedInput};
    use ratatui::backend::TestBackend;

    fn screen_text(view: &TuiView<TestBackend>) -> String {
        let buffer = view.terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draws_board_and_scores() {
        let board = Board::parse(
            "P1 G - - - -
             -  - - - - -
             -  - O - - -
             -  - - - - -
             -  - - - - -
             -  - - - - P2",
        )
        .unwrap();
        let mut game = Game::with_board(board);
        let terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut view = TuiView {
            terminal,
            app: App::default(),
        };

        play(&mut game, &mut ScriptedInput::new("R"), &mut view).unwrap();
        let text = screen_text(&view);

        assert!(text.contains("Turn 2/30"));
        assert!(text.contains("Gems: 1"));
        assert!(text.contains("P1 found a gem!"));
        assert!(text.contains("O"));
    }

    #[test]
    fn test_notice_history_is_bounded() {
        let mut app = App::default();
        for i in 0..20 {
            app.push_notice(format!("notice {i}"));
        }
        assert_eq!(app.notices.len(), MAX_NOTICES);
        assert_eq!(app.notices[0], "notice 12");
    }
}
