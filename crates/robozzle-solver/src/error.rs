//! Error types.
//!
//! Gameplay outcomes (falling off, running out of instructions, looping) are
//! never errors; see [`crate::executor::Outcome`]. The types here cover a
//! malformed program handed to the interpreter and malformed level input.

use thiserror::Error;

use crate::geometry::Coord;

/// A program that does not fit the puzzle it is run against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("call to F{} but the program declares {} function(s)", .function + 1, .declared)]
    UnknownFunction { function: usize, declared: usize },

    #[error("program has {found} function(s), puzzle declares {expected}")]
    FunctionCount { expected: usize, found: usize },

    #[error("F{} has {} slots, bound is {}", .function + 1, .length, .bound)]
    FunctionTooLong {
        function: usize,
        length: usize,
        bound: usize,
    },
}

/// Level input rejected by the loader.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("board has no rows")]
    EmptyBoard,

    #[error("inconsistent row length: expected {expected}, but got {found} (row {row})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell character {found:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, found: char },

    #[error("robot starts at ({}, {}) which is not a passable tile", .0.row, .0.col)]
    RobotOffBoard(Coord),

    #[error("goal at ({}, {}) is not on a passable tile", .0.row, .0.col)]
    GoalOffBoard(Coord),

    #[error("level declares no functions")]
    NoFunctions,

    #[error("cannot read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Program text that does not follow the pretty-printed form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseProgramError {
    #[error("function {0:?} is not wrapped in '[' and ']'")]
    Unbracketed(String),

    #[error("unknown color {0:?}")]
    UnknownColor(String),

    #[error("unknown instruction {0:?}")]
    UnknownInstruction(String),
}
