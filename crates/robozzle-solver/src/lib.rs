//! Program search for Robozzle puzzles.
//!
//! A robot on a colored grid must collect every goal by running a small
//! program of guarded move/turn/paint/call instructions. This crate provides
//! the interpreter that runs one candidate program and the exhaustive solver
//! that enumerates every program within a puzzle's length bounds until one
//! of them works.

pub mod alphabet;
pub mod enumerator;
pub mod error;
pub mod executor;
pub mod geometry;
pub mod logging;
pub mod program;
pub mod puzzle;
pub mod solver;
pub mod trace;
pub mod world;

// Re-export main types
pub use alphabet::build_alphabet;
pub use enumerator::{enumerate, Candidates, Cursor, ProgramSpace};
pub use error::{LevelError, ParseProgramError, ProgramError};
pub use executor::{run, run_traced, verify_solution, Outcome};
pub use geometry::{Coord, Direction};
pub use program::{Function, Instruction, Operation, Program};
pub use puzzle::{Level, PuzzleDefinition, RobotStart};
pub use solver::{solve, solve_with, SolveReport, SolveResult, SolverConfig};
pub use trace::{NoTrace, TraceSink, TracingSink};
pub use world::{Board, Color, GameState, GoalSet, Robot};
