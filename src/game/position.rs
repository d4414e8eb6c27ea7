//! Board coordinates and movement directions.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::TurnError;
use crate::game::BOARD_SIZE;

/// A cell coordinate on the board.
///
/// `x` is the column and `y` the row. Both always stay in `0..BOARD_SIZE`;
/// the fields are private so no mutation can leave the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Player 1's starting cell (top-left corner).
    pub const PLAYER_ONE_START: Self = Self { x: 0, y: 0 };

    /// Player 2's starting cell (bottom-right corner).
    pub const PLAYER_TWO_START: Self = Self {
        x: BOARD_SIZE - 1,
        y: BOARD_SIZE - 1,
    };

    /// Create a position, or `None` if it lies outside the board.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Column.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Row.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Row-major index of this cell.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_SIZE as usize + self.x as usize
    }

    /// Position for a row-major index, or `None` past the last cell.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        let size = usize::from(BOARD_SIZE);
        let x = u8::try_from(index % size).ok()?;
        let y = u8::try_from(index / size).ok()?;
        Self::new(x, y)
    }

    /// Iterate over every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Position { x, y }))
    }

    /// The neighbouring cell in `direction`, or `None` if it would leave the board.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up if self.y > 0 => Some(Self { x: self.x, y: self.y - 1 }),
            Direction::Down if self.y + 1 < BOARD_SIZE => Some(Self { x: self.x, y: self.y + 1 }),
            Direction::Left if self.x > 0 => Some(Self { x: self.x - 1, y: self.y }),
            Direction::Right if self.x + 1 < BOARD_SIZE => Some(Self { x: self.x + 1, y: self.y }),
            _ => None,
        }
    }

    /// Move one cell in `direction`, staying put at the edge of the board.
    pub fn move_toward(&mut self, direction: Direction) {
        if let Some(next) = self.step(direction) {
            *self = next;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// Decoding goes through `Position::new` so off-board cells are rejected
impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            x: u8,
            y: u8,
        }

        let Raw { x, y } = Raw::deserialize(deserializer)?;
        Position::new(x, y)
            .ok_or_else(|| de::Error::custom(format_args!("({x}, {y}) is off the board")))
    }
}

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All directions, in `U`, `D`, `L`, `R` order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The input symbol for this direction.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = TurnError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol.to_ascii_uppercase() {
            'U' => Ok(Direction::Up),
            'D' => Ok(Direction::Down),
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            _ => Err(TurnError::InvalidDirectionSymbol(symbol)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(0, 0).is_some());
        assert!(Position::new(5, 5).is_some());
        assert!(Position::new(6, 0).is_none());
        assert!(Position::new(0, 6).is_none());
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let pos: Position = serde_json::from_str(r#"{"x":5,"y":2}"#).unwrap();
        assert_eq!(pos, Position::new(5, 2).unwrap());

        let err = serde_json::from_str::<Position>(r#"{"x":9,"y":9}"#).unwrap_err();
        assert!(err.to_string().contains("(9, 9) is off the board"));
        assert!(serde_json::from_str::<Position>(r#"{"x":0,"y":6}"#).is_err());
    }

    #[test]
    fn test_serialize_roundtrip_through_new() {
        let corner = Position::PLAYER_TWO_START;
        let json = serde_json::to_string(&corner).unwrap();
        assert_eq!(json, r#"{"x":5,"y":5}"#);
        assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), corner);
    }

    #[test]
    fn test_step_at_edges() {
        let corner = Position::PLAYER_ONE_START;
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Right), Position::new(1, 0));
        assert_eq!(corner.step(Direction::Down), Position::new(0, 1));

        let far = Position::PLAYER_TWO_START;
        assert_eq!(far.step(Direction::Down), None);
        assert_eq!(far.step(Direction::Right), None);
    }

    #[test]
    fn test_move_clamps() {
        let mut pos = Position::PLAYER_ONE_START;
        pos.move_toward(Direction::Up);
        pos.move_toward(Direction::Left);
        assert_eq!(pos, Position::PLAYER_ONE_START);

        for _ in 0..10 {
            pos.move_toward(Direction::Right);
        }
        assert_eq!(pos, Position::new(5, 0).unwrap());
    }

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in Position::all().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), Some(pos));
        }
        assert_eq!(Position::all().count(), 36);
        assert_eq!(Position::from_index(36), None);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::try_from('U'), Ok(Direction::Up));
        assert_eq!(Direction::try_from('d'), Ok(Direction::Down));
        assert_eq!(Direction::try_from('l'), Ok(Direction::Left));
        assert_eq!(Direction::try_from('R'), Ok(Direction::Right));
        assert_eq!(
            Direction::try_from('x'),
            Err(TurnError::InvalidDirectionSymbol('x'))
        );

        for direction in Direction::ALL {
            assert_eq!(Direction::try_from(direction.symbol()), Ok(direction));
        }
    }
}
