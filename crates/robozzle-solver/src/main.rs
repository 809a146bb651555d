//! CLI entry point for the solver.
//!
//! Usage:
//!   robozzle-solver solve <level.json> [options]
//!   robozzle-solver run <level.json> "<program>" [--trace]
//!
//! Exit codes: 0 solved, 2 not solved (exhausted, limit reached or a failing
//! program), 1 on bad input.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use robozzle_solver::{
    logging, run_traced, solve_with, Level, NoTrace, Outcome, Program, PuzzleDefinition,
    SolveReport, SolveResult, SolverConfig, TracingSink,
};

const SOLVED: u8 = 0;
const INVALID: u8 = 1;
const UNSOLVED: u8 = 2;

#[derive(Parser)]
#[command(name = "robozzle-solver")]
#[command(about = "Exhaustive program search for Robozzle puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search every program within the level's bounds for a solution
    Solve {
        /// Path to level JSON file
        #[arg(value_name = "LEVEL")]
        level: PathBuf,

        /// Stop after this many failed candidates
        #[arg(long)]
        max_attempts: Option<u64>,

        /// Stop after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Enumeration index to start from
        #[arg(long, default_value = "0")]
        start_index: u128,
    },

    /// Run one program against a level
    Run {
        /// Path to level JSON file
        #[arg(value_name = "LEVEL")]
        level: PathBuf,

        /// Program text, e.g. "[ forward, F1 ] + [ (R)|left ]"
        #[arg(value_name = "PROGRAM")]
        program: String,

        /// Log every interpreter step at TRACE level
        #[arg(long)]
        trace: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunOutput {
    program: String,
    outcome: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = match &cli.command {
        Commands::Run { trace: true, .. } => "trace",
        _ => "warn",
    };
    logging::init(default_level);

    let code = match cli.command {
        Commands::Solve {
            level,
            max_attempts,
            timeout,
            start_index,
        } => {
            let config = SolverConfig {
                max_attempts,
                timeout: timeout.map(Duration::from_secs),
                start_index,
            };
            solve_command(&level, &config)
        }
        Commands::Run {
            level,
            program,
            trace,
        } => run_command(&level, &program, trace),
    };
    ExitCode::from(code)
}

fn load_definition(path: &Path) -> Option<PuzzleDefinition> {
    let loaded = Level::load(path).and_then(|level| {
        info!(puzzle = %level.label(), "loaded level");
        level.to_definition()
    });
    match loaded {
        Ok(definition) => Some(definition),
        Err(e) => {
            error!(path = %path.display(), "{e}");
            None
        }
    }
}

fn solve_command(path: &Path, config: &SolverConfig) -> u8 {
    let Some(definition) = load_definition(path) else {
        return INVALID;
    };

    let start_time = Instant::now();
    let result = match solve_with(&definition, config) {
        Ok(result) => result,
        Err(e) => {
            error!("{e}");
            return INVALID;
        }
    };

    print_json(&SolveReport::new(&result, start_time.elapsed()));
    match result {
        SolveResult::Found { .. } => SOLVED,
        SolveResult::Exhausted { .. } | SolveResult::LimitReached { .. } => UNSOLVED,
    }
}

fn run_command(path: &Path, text: &str, trace: bool) -> u8 {
    let Some(definition) = load_definition(path) else {
        return INVALID;
    };

    let program: Program = match text.parse() {
        Ok(program) => program,
        Err(e) => {
            error!("{e}");
            return INVALID;
        }
    };
    if let Err(e) = definition.check_program(&program) {
        error!("{e}");
        return INVALID;
    }

    let outcome = if trace {
        run_traced(&definition.initial_state, &program, &mut TracingSink)
    } else {
        run_traced(&definition.initial_state, &program, &mut NoTrace)
    };
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{e}");
            return INVALID;
        }
    };

    print_json(&RunOutput {
        program: program.to_string(),
        outcome: format!("{outcome:?}"),
    });
    if outcome == Outcome::Solved {
        SOLVED
    } else {
        UNSOLVED
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("failed to serialize output: {e}"),
    }
}
