//! Board, robot and goal state that a program runs against.
//!
//! Every type here is a plain value: `Clone` on a [`GameState`] gives a fully
//! independent copy, which is how the interpreter keeps each run private.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::geometry::{Coord, Direction};

/// Tile color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Color> {
        match letter {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Rectangular grid of tiles; `None` marks an impassable tile.
///
/// Tiles are stored row-major in a single vector. The shape never changes
/// after construction, only tile colors do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Option<Color>>,
}

impl Board {
    /// Build a board from rows of equal width.
    pub fn from_rows(rows: Vec<Vec<Option<Color>>>) -> Result<Self, LevelError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(LevelError::EmptyBoard);
        }
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);

        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            tiles.extend(cells);
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        if coord.row < 0 || coord.col < 0 {
            return None;
        }
        let (row, col) = (coord.row as usize, coord.col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Whether `coord` lies inside the grid (passable or not).
    pub fn contains(&self, coord: Coord) -> bool {
        self.index_of(coord).is_some()
    }

    /// Color under `coord`, or `None` when off the board or impassable.
    pub fn color_at(&self, coord: Coord) -> Option<Color> {
        self.index_of(coord).and_then(|i| self.tiles[i])
    }

    pub fn is_passable(&self, coord: Coord) -> bool {
        self.color_at(coord).is_some()
    }

    /// Paint a passable tile. Returns `true` only if its color changed.
    pub fn recolor(&mut self, coord: Coord, color: Color) -> bool {
        let Some(tile) = self.index_of(coord).map(|i| &mut self.tiles[i]) else {
            return false;
        };
        match tile {
            Some(current) if *current != color => {
                *current = color;
                true
            }
            _ => false,
        }
    }
}

/// Parses the text board format: one line per row, `R`/`G`/`B` for colored
/// tiles and a space for an impassable tile.
impl FromStr for Board {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split('\n')
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, c)| match c {
                        ' ' => Ok(None),
                        _ => Color::from_letter(c).map(Some).ok_or(LevelError::UnknownCell {
                            row,
                            col,
                            found: c,
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_rows(rows)
    }
}

/// Robot position and heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Robot {
    pub position: Coord,
    pub direction: Direction,
}

impl Robot {
    pub fn new(position: Coord, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// Goals not yet collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalSet {
    remaining: HashSet<Coord>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coord: Coord) -> bool {
        self.remaining.insert(coord)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.remaining.contains(&coord)
    }

    /// Collect the goal at `coord`, if there is one.
    pub fn collect(&mut self, coord: Coord) -> bool {
        self.remaining.remove(&coord)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.remaining.iter().copied()
    }
}

impl FromIterator<Coord> for GoalSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            remaining: iter.into_iter().collect(),
        }
    }
}

/// Everything a program can observe or change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub robot: Robot,
    pub goals: GoalSet,
}

impl GameState {
    pub fn new(board: Board, robot: Robot, goals: GoalSet) -> Self {
        Self { board, robot, goals }
    }

    /// Color of the tile under the robot.
    pub fn current_color(&self) -> Option<Color> {
        self.board.color_at(self.robot.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> GameState {
        let board: Board = "   \nBBB\n   ".parse().unwrap();
        let robot = Robot::new(Coord::new(1, 0), Direction::East);
        let goals = [Coord::new(1, 2)].into_iter().collect();
        GameState::new(board, robot, goals)
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "RG \n BB".parse().unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert_eq!(board.color_at(Coord::new(0, 0)), Some(Color::Red));
        assert_eq!(board.color_at(Coord::new(0, 1)), Some(Color::Green));
        assert_eq!(board.color_at(Coord::new(0, 2)), None);
        assert_eq!(board.color_at(Coord::new(1, 0)), None);
        assert!(board.contains(Coord::new(1, 0)));
        assert!(!board.contains(Coord::new(2, 0)));
        assert!(!board.contains(Coord::new(0, -1)));
        assert_eq!(board.color_at(Coord::new(-1, 0)), None);
    }

    #[test]
    fn test_parse_board_rejects_ragged_rows() {
        let err = "BBB\nBB".parse::<Board>().unwrap_err();
        assert!(matches!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_parse_board_rejects_unknown_cell() {
        let err = "BXB".parse::<Board>().unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownCell {
                row: 0,
                col: 1,
                found: 'X'
            }
        ));
    }

    #[test]
    fn test_recolor_reports_change() {
        let mut board: Board = "R ".parse().unwrap();
        assert!(!board.recolor(Coord::new(0, 0), Color::Red));
        assert!(board.recolor(Coord::new(0, 0), Color::Blue));
        assert_eq!(board.color_at(Coord::new(0, 0)), Some(Color::Blue));
        // Impassable and off-board tiles never take paint.
        assert!(!board.recolor(Coord::new(0, 1), Color::Blue));
        assert!(!board.recolor(Coord::new(5, 5), Color::Blue));
    }

    #[test]
    fn test_clone_is_independent() {
        let source = corridor();
        let mut copy = source.clone();

        copy.board.recolor(Coord::new(1, 1), Color::Red);
        copy.robot.position = Coord::new(1, 1);
        copy.robot.direction = Direction::North;
        copy.goals.collect(Coord::new(1, 2));

        assert_eq!(source.board.color_at(Coord::new(1, 1)), Some(Color::Blue));
        assert_eq!(source.robot.position, Coord::new(1, 0));
        assert_eq!(source.robot.direction, Direction::East);
        assert!(source.goals.contains(Coord::new(1, 2)));
        assert_eq!(source, corridor());

        let mut source = source;
        source.goals.insert(Coord::new(1, 1));
        assert!(!copy.goals.contains(Coord::new(1, 1)));
    }
}
