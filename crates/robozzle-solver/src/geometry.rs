//! Headings and grid coordinates.
//!
//! Directions form a 4-cycle ordered North, West, South, East: rotating by
//! +1 is a left turn and by -1 a right turn.

use serde::{Deserialize, Serialize};

/// Robot heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    West,
    South,
    East,
}

impl Direction {
    /// All headings in rotation order (counter-clockwise).
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::South,
        Direction::East,
    ];

    /// Position of this heading in [`Direction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::West => 1,
            Direction::South => 2,
            Direction::East => 3,
        }
    }

    /// Rotate by `amount` quarter turns; positive is counter-clockwise.
    pub fn rotate(self, amount: i32) -> Direction {
        let len = Self::ALL.len() as i32;
        let index = (self.index() as i32 + amount).rem_euclid(len);
        Self::ALL[index as usize]
    }

    pub fn turn_left(self) -> Direction {
        self.rotate(1)
    }

    pub fn turn_right(self) -> Direction {
        self.rotate(-1)
    }

    /// `(d_row, d_col)` of one step in this heading.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
        }
    }
}

/// Position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring coordinate one step towards `direction`.
    pub fn step(self, direction: Direction) -> Coord {
        let (d_row, d_col) = direction.offset();
        Coord::new(self.row + d_row, self.col + d_col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Coord::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_turns() {
        assert_eq!(Direction::North.turn_left(), Direction::West);
        assert_eq!(Direction::West.turn_left(), Direction::South);
        assert_eq!(Direction::South.turn_left(), Direction::East);
        assert_eq!(Direction::East.turn_left(), Direction::North);

        assert_eq!(Direction::North.turn_right(), Direction::East);
        assert_eq!(Direction::East.turn_right(), Direction::South);
        assert_eq!(Direction::South.turn_right(), Direction::West);
        assert_eq!(Direction::West.turn_right(), Direction::North);
    }

    #[test]
    fn test_rotation_group() {
        for d in Direction::ALL {
            assert_eq!(d.rotate(4), d);
            assert_eq!(d.rotate(-4), d);
            assert_eq!(d.turn_right().turn_left(), d);
            assert_eq!(d.turn_left().turn_right(), d);
            assert_eq!(d.turn_right().turn_right().turn_right().turn_right(), d);
            assert_eq!(d.rotate(-1), d.rotate(3));
        }
    }

    #[test]
    fn test_step_follows_offset() {
        let origin = Coord::new(2, 2);
        assert_eq!(origin.step(Direction::North), Coord::new(1, 2));
        assert_eq!(origin.step(Direction::West), Coord::new(2, 1));
        assert_eq!(origin.step(Direction::South), Coord::new(3, 2));
        assert_eq!(origin.step(Direction::East), Coord::new(2, 3));
    }
}
