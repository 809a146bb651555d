//! Exhaustive search over the program space.
//!
//! Candidates are tried in enumeration order and the first one that solves
//! the puzzle wins. Every other outcome of a run just means "try the next
//! one". There is no pruning: if the search reports `Exhausted`, no program
//! within the declared bounds solves the puzzle.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ProgramError;
use crate::executor::run;
use crate::program::Program;
use crate::puzzle::PuzzleDefinition;

/// How often (in attempts) progress is logged and the clock is read.
const CHECK_INTERVAL: u64 = 4096;

/// Limits on a search. The default is unbounded.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Stop after this many failed candidates
    pub max_attempts: Option<u64>,
    /// Stop after roughly this much wall-clock time
    pub timeout: Option<Duration>,
    /// Enumeration index of the first candidate to try
    pub start_index: u128,
}

/// Result of the solver search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// A solving program; it sits at enumeration index
    /// `start_index + attempts`.
    Found { program: Program, attempts: u64 },
    /// Every candidate failed.
    Exhausted { attempts: u64 },
    /// A [`SolverConfig`] limit stopped the search; resume at `next_index`.
    LimitReached { attempts: u64, next_index: u128 },
}

impl SolveResult {
    /// Number of candidates that failed.
    pub fn attempts(&self) -> u64 {
        match self {
            SolveResult::Found { attempts, .. }
            | SolveResult::Exhausted { attempts }
            | SolveResult::LimitReached { attempts, .. } => *attempts,
        }
    }

    pub fn program(&self) -> Option<&Program> {
        match self {
            SolveResult::Found { program, .. } => Some(program),
            _ => None,
        }
    }
}

/// Summary suitable for printing as JSON
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    pub status: &'static str,
    pub attempts: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_index: Option<String>,
    pub time_elapsed_ms: u64,
}

impl SolveReport {
    pub fn new(result: &SolveResult, elapsed: Duration) -> Self {
        let (status, next_index) = match result {
            SolveResult::Found { .. } => ("found", None),
            SolveResult::Exhausted { .. } => ("exhausted", None),
            // u128 does not survive a round trip through JSON numbers.
            SolveResult::LimitReached { next_index, .. } => {
                ("limit_reached", Some(next_index.to_string()))
            }
        };
        Self {
            status,
            attempts: result.attempts(),
            program: result.program().map(ToString::to_string),
            next_index,
            time_elapsed_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Search the whole program space for a solution.
pub fn solve(definition: &PuzzleDefinition) -> Result<SolveResult, ProgramError> {
    solve_with(definition, &SolverConfig::default())
}

/// Search the program space under the limits in `config`.
pub fn solve_with(
    definition: &PuzzleDefinition,
    config: &SolverConfig,
) -> Result<SolveResult, ProgramError> {
    let space = definition.program_space();
    let start_time = Instant::now();
    let deadline = config.timeout.map(|timeout| start_time + timeout);

    info!(
        functions = definition.function_count(),
        alphabet = space.alphabet().len(),
        candidates = ?space.len(),
        start_index = %config.start_index,
        "starting search"
    );

    let mut cursor = space.starting_at(config.start_index);
    let mut attempts: u64 = 0;

    while let Some(candidate) = cursor.current() {
        if run(&definition.initial_state, candidate)?.is_solved() {
            info!(attempts, program = %candidate, "solution found");
            return Ok(SolveResult::Found {
                program: candidate.clone(),
                attempts,
            });
        }

        attempts += 1;
        cursor.advance();

        if config.max_attempts.is_some_and(|max| attempts >= max) {
            return Ok(limit_reached(attempts, cursor.index()));
        }

        if attempts % CHECK_INTERVAL == 0 {
            debug!(attempts, index = %cursor.index(), "searching");
            if deadline.is_some_and(|deadline| Instant::now() > deadline) {
                return Ok(limit_reached(attempts, cursor.index()));
            }
        }
    }

    info!(
        attempts,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "search space exhausted"
    );
    Ok(SolveResult::Exhausted { attempts })
}

fn limit_reached(attempts: u64, next_index: u128) -> SolveResult {
    info!(attempts, next_index = %next_index, "search limit reached");
    SolveResult::LimitReached {
        attempts,
        next_index,
    }
}
