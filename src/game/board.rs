//! Board cells, random setup, move legality and gem pickup.
//!
//! The board stores only what does not move: gems and obstacles. Player
//! markers are overlaid from a [`Markers`] value whenever the board is
//! queried or rendered, so they always mirror the players' positions.

use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::LayoutError;
use crate::game::{BOARD_SIZE, Direction, GEM_COUNT, OBSTACLE_COUNT, Player, PlayerSlot, Position};
use crate::rng::RandomSource;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Rejected draws tolerated for one placement before falling back to a scan.
const MAX_PLACEMENT_RETRIES: u32 = 1000;

/// What currently occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    /// Nothing here.
    Empty,
    /// Player 1's marker.
    Player1,
    /// Player 2's marker.
    Player2,
    /// A gem waiting to be collected.
    Gem,
    /// Impassable.
    Obstacle,
}

impl Cell {
    /// Text form used by snapshots and layouts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "-",
            Cell::Player1 => "P1",
            Cell::Player2 => "P2",
            Cell::Gem => "G",
            Cell::Obstacle => "O",
        }
    }

    /// Parse the text form produced by [`Cell::symbol`].
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Cell::Empty),
            "P1" => Some(Cell::Player1),
            "P2" => Some(Cell::Player2),
            "G" => Some(Cell::Gem),
            "O" => Some(Cell::Obstacle),
            _ => None,
        }
    }

    /// Whether a player may step onto this cell.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Cell::Obstacle)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Where the two player markers sit.
///
/// When both players stand on the same cell, `on_top` decides which marker
/// that cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    player_one: Position,
    player_two: Position,
    on_top: PlayerSlot,
}

impl Markers {
    /// Markers at the given positions, Player 1 on top when they coincide.
    #[must_use]
    pub const fn new(player_one: Position, player_two: Position) -> Self {
        Self {
            player_one,
            player_two,
            on_top: PlayerSlot::One,
        }
    }

    /// Both markers on their start cells.
    #[must_use]
    pub const fn starting() -> Self {
        Self::new(Position::PLAYER_ONE_START, Position::PLAYER_TWO_START)
    }

    /// Choose which marker a shared cell shows.
    #[must_use]
    pub const fn with_on_top(mut self, slot: PlayerSlot) -> Self {
        self.on_top = slot;
        self
    }

    /// Position of a player's marker.
    #[must_use]
    pub const fn position(&self, slot: PlayerSlot) -> Position {
        match slot {
            PlayerSlot::One => self.player_one,
            PlayerSlot::Two => self.player_two,
        }
    }

    /// The player whose marker shows at `position`, if any.
    #[must_use]
    pub fn occupant(&self, position: Position) -> Option<PlayerSlot> {
        match (self.player_one == position, self.player_two == position) {
            (true, true) => Some(self.on_top),
            (true, false) => Some(PlayerSlot::One),
            (false, true) => Some(PlayerSlot::Two),
            (false, false) => None,
        }
    }
}

/// Notification that a player picked up a gem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GemFound {
    /// Who collected it.
    pub player: PlayerSlot,
    /// Their display name.
    pub name: String,
    /// Where the gem was.
    pub position: Position,
    /// The player's gem count after pickup.
    pub total: u32,
}

impl fmt::Display for GemFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} found a gem!", self.name)
    }
}

/// The 6×6 game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Static cell contents in row-major order (never a player marker).
    cells: Vec<Cell>,
    /// Gems placed during setup.
    gems_placed: u32,
    /// Obstacles placed during setup.
    obstacles_placed: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with every cell empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: vec![Cell::Empty; CELL_COUNT],
            gems_placed: 0,
            obstacles_placed: 0,
        }
    }

    /// Set up a fresh board.
    ///
    /// The players' start cells are reserved first, then [`GEM_COUNT`] gems
    /// and [`OBSTACLE_COUNT`] obstacles are dropped on random cells. Each
    /// placement draws a row, then a column, and draws again whenever the
    /// cell is already taken.
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut board = Self::empty();
        board.scatter(Cell::Gem, GEM_COUNT, rng);
        board.scatter(Cell::Obstacle, OBSTACLE_COUNT, rng);
        debug!(
            gems = board.gems_placed,
            obstacles = board.obstacles_placed,
            "board generated"
        );
        board
    }

    /// Drop `count` copies of `cell` on random free cells.
    fn scatter<R: RandomSource + ?Sized>(&mut self, cell: Cell, count: u32, rng: &mut R) {
        let size = usize::from(BOARD_SIZE);

        for _ in 0..count {
            let mut rejected = 0u32;
            let target = loop {
                let row = rng.next_in_range(size) % size;
                let col = rng.next_in_range(size) % size;
                let Some(candidate) = Position::from_index(row * size + col) else {
                    continue;
                };

                if self.is_free(candidate) {
                    break Some(candidate);
                }

                rejected += 1;
                if rejected >= MAX_PLACEMENT_RETRIES {
                    let fallback = self.first_free_after(candidate);
                    warn!(
                        %cell,
                        rejected,
                        ?fallback,
                        "random placement kept hitting occupied cells, scanning for a free one"
                    );
                    break fallback;
                }
            };

            match target {
                Some(position) => self.put(position, cell),
                None => {
                    warn!(%cell, "no free cell left");
                    return;
                }
            }
        }
    }

    /// Whether setup may still place something at `position`.
    fn is_free(&self, position: Position) -> bool {
        self.get(position) == Cell::Empty && Markers::starting().occupant(position).is_none()
    }

    /// First free cell after `position` in row-major order, wrapping around.
    fn first_free_after(&self, position: Position) -> Option<Position> {
        (1..=CELL_COUNT)
            .filter_map(|offset| Position::from_index((position.index() + offset) % CELL_COUNT))
            .find(|&candidate| self.is_free(candidate))
    }

    fn put(&mut self, position: Position, cell: Cell) {
        self.cells[position.index()] = cell;
        match cell {
            Cell::Gem => self.gems_placed += 1,
            Cell::Obstacle => self.obstacles_placed += 1,
            Cell::Empty | Cell::Player1 | Cell::Player2 => {}
        }
    }

    /// Place a gem or obstacle on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns an error if `cell` is not a gem or obstacle, or if the target
    /// cell is taken or is a player's start cell.
    pub fn place(&mut self, position: Position, cell: Cell) -> Result<(), LayoutError> {
        if !matches!(cell, Cell::Gem | Cell::Obstacle) {
            return Err(LayoutError::NotPlaceable { cell });
        }
        if !self.is_free(position) {
            return Err(LayoutError::Occupied { position });
        }
        self.put(position, cell);
        Ok(())
    }

    /// Build a board from six rows of six whitespace-separated cells.
    ///
    /// Accepts the snapshot format: `-`, `G`, `O`, and `P1`/`P2` on their
    /// start cells. Blank lines are ignored.
    ///
    /// ```
    /// use gem_hunters::game::{Board, Cell, Position};
    ///
    /// let board = Board::parse(
    ///     "P1 G - - - -
    ///      -  O - - - -
    ///      -  - - - - -
    ///      -  - - - - -
    ///      -  - - - - -
    ///      -  - - - - P2",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(board.get(Position::new(1, 0).unwrap()), Cell::Gem);
    /// assert_eq!(board.get(Position::new(1, 1).unwrap()), Cell::Obstacle);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error for a wrong shape, unknown tokens, misplaced player
    /// markers, or gems/obstacles on start cells.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != usize::from(BOARD_SIZE) {
            return Err(LayoutError::WrongRowCount { rows: rows.len() });
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != usize::from(BOARD_SIZE) {
                return Err(LayoutError::WrongRowLength {
                    row,
                    cells: tokens.len(),
                });
            }

            for (col, token) in tokens.into_iter().enumerate() {
                let Some(position) = Position::from_index(row * usize::from(BOARD_SIZE) + col)
                else {
                    continue;
                };
                match Cell::from_symbol(token) {
                    Some(Cell::Empty) => {}
                    Some(cell @ (Cell::Gem | Cell::Obstacle)) => board.place(position, cell)?,
                    // Markers are derived from player positions, not stored
                    Some(Cell::Player1) if position == PlayerSlot::One.start() => {}
                    Some(Cell::Player2) if position == PlayerSlot::Two.start() => {}
                    Some(cell @ (Cell::Player1 | Cell::Player2)) => {
                        return Err(LayoutError::MisplacedMarker { cell, position });
                    }
                    None => {
                        return Err(LayoutError::UnknownToken {
                            token: token.to_string(),
                            position,
                        });
                    }
                }
            }
        }

        Ok(board)
    }

    /// Stored contents of a cell: empty, gem or obstacle.
    #[must_use]
    pub fn get(&self, position: Position) -> Cell {
        self.cells[position.index()]
    }

    /// What a cell shows once player markers are overlaid.
    #[must_use]
    pub fn occupant(&self, position: Position, markers: &Markers) -> Cell {
        markers
            .occupant(position)
            .map_or_else(|| self.get(position), PlayerSlot::marker)
    }

    /// Whether `player` may move one cell in `direction`.
    ///
    /// The target must be on the board and not an obstacle. A cell holding
    /// the other player is a legal target. Nothing is mutated.
    #[must_use]
    pub fn is_valid_move(&self, player: &Player, direction: Direction) -> bool {
        player
            .position()
            .step(direction)
            .is_some_and(|target| self.get(target).is_passable())
    }

    /// Pick up the gem under `player`, if there is one.
    ///
    /// Credits the player, empties the cell and returns the notification.
    /// Calling it again on the same cell does nothing.
    pub fn collect_gem(&mut self, player: &mut Player) -> Option<GemFound> {
        let position = player.position();
        if self.get(position) != Cell::Gem {
            return None;
        }

        self.cells[position.index()] = Cell::Empty;
        player.add_gem();
        info!(player = player.name(), %position, total = player.gems(), "gem collected");

        Some(GemFound {
            player: player.slot(),
            name: player.name().to_string(),
            position,
            total: player.gems(),
        })
    }

    /// Snapshot every cell in row-major order with markers overlaid.
    ///
    /// The iterator is lazy and yields exactly [`CELL_COUNT`] items once.
    #[must_use]
    pub fn render(&self, markers: Markers) -> Render<'_> {
        Render {
            board: self,
            markers,
            next: 0,
        }
    }

    /// Cells holding `cell` as stored contents.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&position| self.get(position) == cell)
    }

    /// Gems still on the board.
    #[must_use]
    pub fn gems_remaining(&self) -> u32 {
        count_u32(self.positions_of(Cell::Gem))
    }

    /// Obstacles on the board.
    #[must_use]
    pub fn obstacle_count(&self) -> u32 {
        count_u32(self.positions_of(Cell::Obstacle))
    }

    /// Gems placed during setup, collected or not.
    #[must_use]
    pub const fn gems_placed(&self) -> u32 {
        self.gems_placed
    }

    /// Obstacles placed during setup.
    #[must_use]
    pub const fn obstacles_placed(&self) -> u32 {
        self.obstacles_placed
    }
}

fn count_u32(iter: impl Iterator<Item = Position>) -> u32 {
    iter.fold(0, |n, _| n + 1)
}

/// Lazy row-major snapshot of the board. See [`Board::render`].
#[derive(Debug, Clone)]
pub struct Render<'a> {
    board: &'a Board,
    markers: Markers,
    next: usize,
}

impl Iterator for Render<'_> {
    type Item = (Position, Cell);

    fn next(&mut self) -> Option<Self::Item> {
        let position = Position::from_index(self.next)?;
        self.next += 1;
        Some((position, self.board.occupant(position, &self.markers)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CELL_COUNT.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Render<'_> {}

impl FusedIterator for Render<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SeededRng};

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y).unwrap()
    }

    const LAYOUT: &str = "
        P1 G - - - -
        O  - - - - -
        -  - G - - -
        -  - - O - -
        -  - - - - -
        -  - - - G P2
    ";

    #[test]
    fn test_generate_counts() {
        for seed in 0..50 {
            let board = Board::generate(&mut SeededRng::new(seed));
            assert_eq!(board.gems_remaining(), GEM_COUNT);
            assert_eq!(board.obstacle_count(), OBSTACLE_COUNT);
            assert_eq!(board.gems_placed(), GEM_COUNT);
            assert_eq!(board.obstacles_placed(), OBSTACLE_COUNT);
            assert_eq!(board.get(Position::PLAYER_ONE_START), Cell::Empty);
            assert_eq!(board.get(Position::PLAYER_TWO_START), Cell::Empty);
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let a = Board::generate(&mut SeededRng::new(99));
        let b = Board::generate(&mut SeededRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_scripted_layout() {
        // Draws are (row, col) pairs. (0, 0) and (5, 5) are player cells
        // and get redrawn; (0, 1) repeats and gets redrawn as well.
        let mut rng = ScriptedRng::new([
            0, 0, // P1 start, rejected
            0, 1, // gem
            0, 1, // taken, rejected
            1, 0, // gem
            2, 2, // gem
            3, 3, // gem
            5, 5, // P2 start, rejected
            4, 4, // gem
            1, 1, 1, 2, 1, 3, 1, 4, 1, 5, 2, 0, 2, 1, 2, 3, // obstacles
        ]);
        let board = Board::generate(&mut rng);

        for gem in [pos(1, 0), pos(0, 1), pos(2, 2), pos(3, 3), pos(4, 4)] {
            assert_eq!(board.get(gem), Cell::Gem, "expected gem at {gem}");
        }
        for obstacle in [
            pos(1, 1),
            pos(2, 1),
            pos(3, 1),
            pos(4, 1),
            pos(5, 1),
            pos(0, 2),
            pos(1, 2),
            pos(3, 2),
        ] {
            assert_eq!(board.get(obstacle), Cell::Obstacle, "expected obstacle at {obstacle}");
        }
        assert_eq!(rng.draws(), 2 * (5 + 3 + 8));
    }

    #[test]
    fn test_generate_with_stuck_rng_terminates() {
        // Always draws the P1 start cell; placement falls back to scanning.
        let board = Board::generate(&mut ScriptedRng::new([0]));
        assert_eq!(board.gems_remaining(), GEM_COUNT);
        assert_eq!(board.obstacle_count(), OBSTACLE_COUNT);
        assert_eq!(board.get(pos(1, 0)), Cell::Gem);
    }

    #[test]
    fn test_parse_layout() {
        let board = Board::parse(LAYOUT).unwrap();
        assert_eq!(board.get(pos(1, 0)), Cell::Gem);
        assert_eq!(board.get(pos(0, 1)), Cell::Obstacle);
        assert_eq!(board.gems_remaining(), 3);
        assert_eq!(board.obstacle_count(), 2);
        assert_eq!(board.get(Position::PLAYER_ONE_START), Cell::Empty);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Board::parse("- - - - - -"),
            Err(LayoutError::WrongRowCount { rows: 1 })
        );

        let short_row = LAYOUT.replacen("O  - - - - -", "O - -", 1);
        assert_eq!(
            Board::parse(&short_row),
            Err(LayoutError::WrongRowLength { row: 1, cells: 3 })
        );

        let unknown = LAYOUT.replacen("O  - - - - -", "O  - X - - -", 1);
        assert!(matches!(
            Board::parse(&unknown),
            Err(LayoutError::UnknownToken { .. })
        ));

        let misplaced = LAYOUT.replacen("O  - - - - -", "O  - P2 - - -", 1);
        assert_eq!(
            Board::parse(&misplaced),
            Err(LayoutError::MisplacedMarker {
                cell: Cell::Player2,
                position: pos(2, 1),
            })
        );

        let blocked_start = LAYOUT.replacen("P1 G", "G G", 1);
        assert_eq!(
            Board::parse(&blocked_start),
            Err(LayoutError::Occupied {
                position: Position::PLAYER_ONE_START,
            })
        );
    }

    #[test]
    fn test_place_rules() {
        let mut board = Board::empty();
        assert!(board.place(pos(2, 2), Cell::Obstacle).is_ok());
        assert_eq!(
            board.place(pos(2, 2), Cell::Gem),
            Err(LayoutError::Occupied { position: pos(2, 2) })
        );
        assert_eq!(
            board.place(pos(3, 3), Cell::Player1),
            Err(LayoutError::NotPlaceable { cell: Cell::Player1 })
        );
        assert_eq!(
            board.place(Position::PLAYER_TWO_START, Cell::Gem),
            Err(LayoutError::Occupied {
                position: Position::PLAYER_TWO_START,
            })
        );
    }

    #[test]
    fn test_is_valid_move() {
        let board = Board::parse(LAYOUT).unwrap();
        let p1 = Player::new(PlayerSlot::One);

        assert!(!board.is_valid_move(&p1, Direction::Up));
        assert!(!board.is_valid_move(&p1, Direction::Left));
        assert!(!board.is_valid_move(&p1, Direction::Down)); // obstacle
        assert!(board.is_valid_move(&p1, Direction::Right)); // gem
    }

    #[test]
    fn test_move_onto_other_player_is_valid() {
        let board = Board::empty();
        let mut p1 = Player::new(PlayerSlot::One);
        for _ in 0..5 {
            p1.apply_move(Direction::Right);
        }
        for _ in 0..4 {
            p1.apply_move(Direction::Down);
        }
        // P2 sits directly below at (5, 5)
        assert!(board.is_valid_move(&p1, Direction::Down));
    }

    #[test]
    fn test_collect_gem_once() {
        let mut board = Board::parse(LAYOUT).unwrap();
        let mut p1 = Player::new(PlayerSlot::One);
        p1.apply_move(Direction::Right);

        let found = board.collect_gem(&mut p1).unwrap();
        assert_eq!(found.player, PlayerSlot::One);
        assert_eq!(found.total, 1);
        assert_eq!(found.to_string(), "P1 found a gem!");

        assert!(board.collect_gem(&mut p1).is_none());
        assert_eq!(p1.gems(), 1);
        assert_eq!(board.get(pos(1, 0)), Cell::Empty);
        assert_eq!(board.gems_placed(), 3);
    }

    #[test]
    fn test_collect_gem_on_empty_cell() {
        let mut board = Board::parse(LAYOUT).unwrap();
        let mut p2 = Player::new(PlayerSlot::Two);
        assert!(board.collect_gem(&mut p2).is_none());
        assert_eq!(p2.gems(), 0);
    }

    #[test]
    fn test_render_snapshot() {
        let board = Board::parse(LAYOUT).unwrap();
        let mut snapshot = board.render(Markers::starting());
        assert_eq!(snapshot.len(), CELL_COUNT);

        assert_eq!(snapshot.next(), Some((pos(0, 0), Cell::Player1)));
        assert_eq!(snapshot.next(), Some((pos(1, 0), Cell::Gem)));
        assert_eq!(snapshot.len(), CELL_COUNT - 2);

        let rest: Vec<_> = snapshot.by_ref().collect();
        assert_eq!(rest.len(), CELL_COUNT - 2);
        assert_eq!(rest.last(), Some(&(pos(5, 5), Cell::Player2)));
        assert_eq!(snapshot.next(), None);
    }

    #[test]
    fn test_shared_cell_shows_top_marker() {
        let board = Board::empty();
        let shared = pos(3, 3);
        let markers = Markers::new(shared, shared);

        assert_eq!(board.occupant(shared, &markers), Cell::Player1);
        let markers = markers.with_on_top(PlayerSlot::Two);
        assert_eq!(board.occupant(shared, &markers), Cell::Player2);
        assert_eq!(markers.position(PlayerSlot::One), shared);
    }
}
