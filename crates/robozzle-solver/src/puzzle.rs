//! Puzzle definitions and the JSON level format they load from.
//!
//! The core only consumes a [`PuzzleDefinition`]; everything that can be
//! wrong with level input is caught here and reported as a [`LevelError`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alphabet::build_alphabet;
use crate::enumerator::ProgramSpace;
use crate::error::{LevelError, ProgramError};
use crate::geometry::{Coord, Direction};
use crate::program::{Instruction, Program};
use crate::world::{Board, Color, GameState, GoalSet, Robot};

/// Everything needed to search for a solution.
#[derive(Debug, Clone)]
pub struct PuzzleDefinition {
    pub initial_state: GameState,
    /// Slot bound per function; its length is the function count.
    pub function_lengths: Vec<usize>,
    pub paintable_colors: Vec<Color>,
}

impl PuzzleDefinition {
    pub fn function_count(&self) -> usize {
        self.function_lengths.len()
    }

    pub fn alphabet(&self) -> Vec<Instruction> {
        build_alphabet(self.function_count(), &self.paintable_colors)
    }

    pub fn program_space(&self) -> ProgramSpace {
        ProgramSpace::new(self.function_lengths.clone(), self.alphabet())
    }

    /// Check that `program` has the declared shape.
    pub fn check_program(&self, program: &Program) -> Result<(), ProgramError> {
        program.check(&self.function_lengths)
    }
}

/// Robot placement as written in a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotStart {
    pub row: i32,
    pub col: i32,
    pub direction: Direction,
}

/// A level as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    /// One string per row: `R`, `G`, `B` or a space for impassable.
    pub board: Vec<String>,
    pub robot: RobotStart,
    /// `[row, col]` pairs.
    pub goals: Vec<(i32, i32)>,
    pub function_lengths: Vec<usize>,
    #[serde(default)]
    pub paintable_colors: Vec<Color>,
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Human-readable label for logs.
    pub fn label(&self) -> String {
        match (&self.id, &self.title) {
            (Some(id), Some(title)) => format!("#{id} {title}"),
            (Some(id), None) => format!("#{id}"),
            (None, Some(title)) => title.clone(),
            (None, None) => "untitled".to_string(),
        }
    }

    /// Validate and convert into the form the solver consumes.
    pub fn to_definition(&self) -> Result<PuzzleDefinition, LevelError> {
        let board: Board = self.board.join("\n").parse()?;

        let start = Coord::new(self.robot.row, self.robot.col);
        if !board.is_passable(start) {
            return Err(LevelError::RobotOffBoard(start));
        }

        let goals: GoalSet = self
            .goals
            .iter()
            .map(|&goal| {
                let goal = Coord::from(goal);
                if board.is_passable(goal) {
                    Ok(goal)
                } else {
                    Err(LevelError::GoalOffBoard(goal))
                }
            })
            .collect::<Result<_, _>>()?;

        if self.function_lengths.is_empty() {
            return Err(LevelError::NoFunctions);
        }

        Ok(PuzzleDefinition {
            initial_state: GameState::new(board, Robot::new(start, self.robot.direction), goals),
            function_lengths: self.function_lengths.clone(),
            paintable_colors: self.paintable_colors.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = r#"{
        "id": 7,
        "title": "Corridor",
        "board": ["   ", "BBB", "   "],
        "robot": { "row": 1, "col": 0, "direction": "east" },
        "goals": [[1, 2]],
        "functionLengths": [2, 3],
        "paintableColors": ["green"]
    }"#;

    #[test]
    fn test_load_level() {
        let level = Level::from_json(CORRIDOR).unwrap();
        assert_eq!(level.label(), "#7 Corridor");

        let definition = level.to_definition().unwrap();
        assert_eq!(definition.function_count(), 2);
        assert_eq!(definition.paintable_colors, vec![Color::Green]);
        assert_eq!(definition.alphabet().len(), 4 * (3 + 1 + 2));

        let state = &definition.initial_state;
        assert_eq!(state.robot, Robot::new(Coord::new(1, 0), Direction::East));
        assert_eq!(state.goals.len(), 1);
        assert!(state.goals.contains(Coord::new(1, 2)));
        assert_eq!(state.board.color_at(Coord::new(1, 1)), Some(Color::Blue));
        assert_eq!(state.board.color_at(Coord::new(0, 1)), None);
    }

    #[test]
    fn test_optional_fields_default() {
        let level = Level::from_json(
            r#"{"board": ["B"], "robot": {"row": 0, "col": 0, "direction": "north"},
                "goals": [], "functionLengths": [1]}"#,
        )
        .unwrap();
        assert_eq!(level.label(), "untitled");
        assert!(level.to_definition().unwrap().paintable_colors.is_empty());
    }

    #[test]
    fn test_rejects_bad_levels() {
        let mut level = Level::from_json(CORRIDOR).unwrap();
        level.robot.row = 0;
        assert!(matches!(
            level.to_definition(),
            Err(LevelError::RobotOffBoard(Coord { row: 0, col: 0 }))
        ));

        let mut level = Level::from_json(CORRIDOR).unwrap();
        level.goals.push((2, 2));
        assert!(matches!(
            level.to_definition(),
            Err(LevelError::GoalOffBoard(Coord { row: 2, col: 2 }))
        ));

        let mut level = Level::from_json(CORRIDOR).unwrap();
        level.function_lengths.clear();
        assert!(matches!(level.to_definition(), Err(LevelError::NoFunctions)));

        let mut level = Level::from_json(CORRIDOR).unwrap();
        level.board[2] = "  ".to_string();
        assert!(matches!(
            level.to_definition(),
            Err(LevelError::RaggedRow { row: 2, .. })
        ));

        assert!(matches!(
            Level::from_json("{\"board\": 3}"),
            Err(LevelError::Json(_))
        ));
    }

    #[test]
    fn test_check_program_against_definition() {
        let definition = Level::from_json(CORRIDOR).unwrap().to_definition().unwrap();
        let fits: Program = "[ forward, F2 ] + [ ]".parse().unwrap();
        assert_eq!(definition.check_program(&fits), Ok(()));

        let too_long: Program = "[ forward, forward, forward ] + [ ]".parse().unwrap();
        assert!(definition.check_program(&too_long).is_err());
    }
}
