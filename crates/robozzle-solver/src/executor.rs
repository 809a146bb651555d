//! Program execution engine.
//!
//! Programs run on an explicit stack of frames instead of host recursion, so
//! arbitrarily deep or cyclic calls cannot overflow the native stack. A frame
//! is the next instruction to run in some function. Before an instruction is
//! acted on, the frame for the instruction after it is pushed; a call pushed
//! while acting therefore finishes before the caller resumes, which is
//! exactly call/return.
//!
//! Non-termination is detected by fingerprinting (robot position, heading,
//! top frame). The machine is deterministic, so seeing a fingerprint twice
//! with the board unchanged in between means it will cycle forever. Any
//! recolor wipes the evidence. A program that flips a tile back and forth
//! every cycle therefore never trips the detector; that is accepted.

use std::collections::HashSet;

use smallvec::{smallvec, SmallVec};

use crate::error::ProgramError;
use crate::geometry::{Coord, Direction};
use crate::program::{Operation, Program};
use crate::trace::{emit, NoTrace, TraceSink};
use crate::world::GameState;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// All goals collected
    Solved,
    /// Robot stepped off the board or onto an impassable tile
    FellOff,
    /// Ran out of instructions with goals remaining
    Exhausted,
    /// Repeated a fingerprint without the board changing
    LoopDetected,
}

impl Outcome {
    pub fn is_solved(self) -> bool {
        self == Outcome::Solved
    }
}

/// A frame in the execution stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Frame {
    function: usize,
    instruction: usize,
}

impl Frame {
    fn new(function: usize, instruction: usize) -> Self {
        Self {
            function,
            instruction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Fingerprint {
    position: Coord,
    direction: Direction,
    frame: Frame,
}

/// Run `program` against a private copy of `initial`.
pub fn run(initial: &GameState, program: &Program) -> Result<Outcome, ProgramError> {
    run_traced(initial, program, &mut NoTrace)
}

/// [`run`], reporting each dispatched instruction, state change and the
/// final outcome to `sink`.
pub fn run_traced<S>(
    initial: &GameState,
    program: &Program,
    sink: &mut S,
) -> Result<Outcome, ProgramError>
where
    S: TraceSink + ?Sized,
{
    let mut state = initial.clone();
    let outcome = execute(&mut state, program, sink)?;
    emit(sink, || format!("outcome: {outcome:?}"));
    Ok(outcome)
}

fn execute<S>(
    state: &mut GameState,
    program: &Program,
    sink: &mut S,
) -> Result<Outcome, ProgramError>
where
    S: TraceSink + ?Sized,
{
    let mut stack: SmallVec<[Frame; 32]> = smallvec![Frame::new(0, 0)];
    let mut seen: HashSet<Fingerprint> = HashSet::new();
    let declared = program.function_count();

    while let Some(&frame) = stack.last() {
        if state.goals.is_empty() {
            return Ok(Outcome::Solved);
        }

        let fingerprint = Fingerprint {
            position: state.robot.position,
            direction: state.robot.direction,
            frame,
        };
        if !seen.insert(fingerprint) {
            return Ok(Outcome::LoopDetected);
        }

        stack.pop();

        let function = program
            .function(frame.function)
            .ok_or(ProgramError::UnknownFunction {
                function: frame.function,
                declared,
            })?;

        // Queue the return point before acting so nested calls run first.
        if frame.instruction + 1 < function.len() {
            stack.push(Frame::new(frame.function, frame.instruction + 1));
        }

        let Some(instruction) = function.get(frame.instruction) else {
            continue;
        };

        if !instruction.applies_on(state.current_color()) {
            emit(sink, || {
                format!(
                    "F{}[{}] {instruction}: skipped",
                    frame.function + 1,
                    frame.instruction
                )
            });
            continue;
        }

        emit(sink, || {
            format!("F{}[{}] {instruction}", frame.function + 1, frame.instruction)
        });

        match instruction.operation {
            Operation::Call(target) => {
                if target >= declared {
                    return Err(ProgramError::UnknownFunction {
                        function: target,
                        declared,
                    });
                }
                stack.push(Frame::new(target, 0));
            }

            Operation::Recolor(color) => {
                if state.board.recolor(state.robot.position, color) {
                    seen.clear();
                    emit(sink, || {
                        let Coord { row, col } = state.robot.position;
                        format!("  tile ({row}, {col}) -> {color}")
                    });
                }
            }

            Operation::TurnLeft => {
                state.robot.direction = state.robot.direction.turn_left();
                emit(sink, || format!("  facing {:?}", state.robot.direction));
            }

            Operation::TurnRight => {
                state.robot.direction = state.robot.direction.turn_right();
                emit(sink, || format!("  facing {:?}", state.robot.direction));
            }

            Operation::MoveForward => {
                let next = state.robot.position.step(state.robot.direction);
                if !state.board.is_passable(next) {
                    return Ok(Outcome::FellOff);
                }
                state.robot.position = next;
                emit(sink, || format!("  moved to ({}, {})", next.row, next.col));

                if state.goals.collect(next) {
                    emit(sink, || format!("  goal collected, {} left", state.goals.len()));
                    if state.goals.is_empty() {
                        return Ok(Outcome::Solved);
                    }
                }
            }
        }
    }

    Ok(Outcome::Exhausted)
}

/// Does the program solve the puzzle starting from `initial`?
pub fn verify_solution(initial: &GameState, program: &Program) -> bool {
    matches!(run(initial, program), Ok(Outcome::Solved))
}
