//! Cell states, grid coordinates and compass directions.

use std::fmt;

/// State of a single city cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Road,
    Hub,
    /// House with its placement id (1-based, unique per map)
    House(u32),
}

impl Cell {
    /// Token used in the text map dump.
    pub fn token(&self) -> String {
        match self {
            Cell::Road => "-1".to_string(),
            Cell::Hub => "-2".to_string(),
            Cell::Empty => "0".to_string(),
            Cell::House(id) => id.to_string(),
        }
    }

    /// Inverse of [`Cell::token`]. Returns `None` for anything not produced by it.
    pub fn from_token(token: &str) -> Option<Cell> {
        match token.trim() {
            "-1" => Some(Cell::Road),
            "-2" => Some(Cell::Hub),
            "0" => Some(Cell::Empty),
            other => match other.parse::<u32>() {
                Ok(id) if id > 0 && id.to_string() == other => Some(Cell::House(id)),
                _ => None,
            },
        }
    }

    pub fn house_id(&self) -> Option<u32> {
        match self {
            Cell::House(id) => Some(*id),
            _ => None,
        }
    }

    /// Anything but empty ground can be walked on by a courier.
    pub fn is_walkable(&self) -> bool {
        !matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Grid coordinate. Signed so that stepping off the edge is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring coordinate one step in `dir`.
    pub fn step(self, dir: Direction) -> Coord {
        let (dr, dc) = dir.delta();
        Coord::new(self.row + dr, self.col + dc)
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Axis-aligned unit direction. Row grows southwards, column eastwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Enumeration order used for every scan and tie-break.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// (row delta, col delta)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// The two directions at right angles, in enumeration order.
    pub fn perpendicular(self) -> [Direction; 2] {
        if self.is_vertical() {
            [Direction::East, Direction::West]
        } else {
            [Direction::North, Direction::South]
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::East => write!(f, "east"),
            Direction::West => write!(f, "west"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_map_back_to_cell_class() {
        for cell in [Cell::Empty, Cell::Road, Cell::Hub, Cell::House(1), Cell::House(317)] {
            assert_eq!(Cell::from_token(&cell.token()), Some(cell));
        }
        assert_eq!(Cell::from_token("-3"), None);
        assert_eq!(Cell::from_token("house"), None);
        assert_eq!(Cell::from_token(""), None);
    }

    #[test]
    fn test_house_tokens_must_be_canonical() {
        assert_eq!(Cell::from_token("12"), Some(Cell::House(12)));
        assert_eq!(Cell::from_token("+5"), None);
        assert_eq!(Cell::from_token("007"), None);
        assert_eq!(Cell::from_token("-0"), None);
    }

    #[test]
    fn test_step_and_perpendicular() {
        let origin = Coord::new(5, 5);
        assert_eq!(origin.step(Direction::North), Coord::new(4, 5));
        assert_eq!(origin.step(Direction::East), Coord::new(5, 6));
        assert_eq!(Direction::South.perpendicular(), [Direction::East, Direction::West]);
        assert_eq!(Direction::West.perpendicular(), [Direction::North, Direction::South]);
    }
}
