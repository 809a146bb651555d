//! Program representation and its text form.
//!
//! The text form is the one used in logs and test fixtures:
//! `[ forward, F1 ] + [ (R)|left, TO:G ]`. Guards render as `(<color>)|`,
//! calls are 1-based and an empty slot renders as `_`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseProgramError, ProgramError};
use crate::world::Color;

/// What an instruction does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    MoveForward,
    TurnLeft,
    TurnRight,
    Recolor(Color),
    /// Call a function by 0-based index.
    Call(usize),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::MoveForward => write!(f, "forward"),
            Operation::TurnLeft => write!(f, "left"),
            Operation::TurnRight => write!(f, "right"),
            Operation::Recolor(color) => write!(f, "TO:{color}"),
            Operation::Call(function) => write!(f, "F{}", function + 1),
        }
    }
}

/// A single instruction with optional color guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub operation: Operation,
    pub guard: Option<Color>,
}

impl Instruction {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            guard: None,
        }
    }

    pub fn guarded(operation: Operation, guard: Color) -> Self {
        Self {
            operation,
            guard: Some(guard),
        }
    }

    /// Check if this instruction applies on a tile of the given color
    pub fn applies_on(&self, tile_color: Option<Color>) -> bool {
        match self.guard {
            None => true,
            Some(guard) => tile_color == Some(guard),
        }
    }
}

impl From<Operation> for Instruction {
    fn from(operation: Operation) -> Self {
        Instruction::new(operation)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.guard {
            Some(guard) => write!(f, "({guard})|{}", self.operation),
            None => write!(f, "{}", self.operation),
        }
    }
}

impl FromStr for Instruction {
    type Err = ParseProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (guard, op) = match s.strip_prefix('(').and_then(|rest| rest.split_once(")|")) {
            Some((color, op)) => (Some(parse_color(color)?), op),
            None => (None, s),
        };

        let operation = match op {
            "forward" => Operation::MoveForward,
            "left" => Operation::TurnLeft,
            "right" => Operation::TurnRight,
            _ => {
                if let Some(color) = op.strip_prefix("TO:") {
                    Operation::Recolor(parse_color(color)?)
                } else if let Some(number) = op.strip_prefix('F') {
                    match number.parse::<usize>() {
                        Ok(n) if n >= 1 => Operation::Call(n - 1),
                        _ => return Err(ParseProgramError::UnknownInstruction(s.to_string())),
                    }
                } else {
                    return Err(ParseProgramError::UnknownInstruction(s.to_string()));
                }
            }
        };

        Ok(Instruction { operation, guard })
    }
}

fn parse_color(s: &str) -> Result<Color, ParseProgramError> {
    let mut chars = s.chars();
    match (chars.next().and_then(Color::from_letter), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(ParseProgramError::UnknownColor(s.to_string())),
    }
}

/// Ordered slots of one function; `None` is an empty slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Function {
    pub slots: Vec<Option<Instruction>>,
}

impl Function {
    pub fn new(slots: Vec<Option<Instruction>>) -> Self {
        Self { slots }
    }

    /// A function with every slot filled.
    pub fn from_instructions<I>(instructions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Instruction>,
    {
        Self {
            slots: instructions.into_iter().map(|i| Some(i.into())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Instruction at `index`; `None` for an empty slot or past the end.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.slots.iter().flatten()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.slots.is_empty() {
            return write!(f, "[ ]");
        }
        write!(f, "[ ")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Some(instruction) => write!(f, "{instruction}")?,
                None => write!(f, "_")?,
            }
        }
        write!(f, " ]")
    }
}

impl FromStr for Function {
    type Err = ParseProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| ParseProgramError::Unbracketed(s.trim().to_string()))?
            .trim();

        if body.is_empty() {
            return Ok(Function::default());
        }

        let slots = body
            .split(',')
            .map(|token| match token.trim() {
                "_" => Ok(None),
                token => token.parse::<Instruction>().map(Some),
            })
            .collect::<Result<Vec<_>, ParseProgramError>>()?;
        Ok(Function::new(slots))
    }
}

/// One function per declared index; index 0 is the entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    pub fn new(functions: Vec<Function>) -> Self {
        Self { functions }
    }

    /// A program with `count` functions, all without slots.
    pub fn empty(count: usize) -> Self {
        Self {
            functions: vec![Function::default(); count],
        }
    }

    pub fn function(&self, index: usize) -> Option<&Function> {
        self.functions.get(index)
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Count non-empty slots
    pub fn count_instructions(&self) -> usize {
        self.functions.iter().map(|f| f.instructions().count()).sum()
    }

    /// Check the program's shape against per-function length bounds and
    /// that every call targets a declared function.
    pub fn check(&self, bounds: &[usize]) -> Result<(), ProgramError> {
        if self.functions.len() != bounds.len() {
            return Err(ProgramError::FunctionCount {
                expected: bounds.len(),
                found: self.functions.len(),
            });
        }

        for (index, (function, &bound)) in self.functions.iter().zip(bounds).enumerate() {
            if function.len() > bound {
                return Err(ProgramError::FunctionTooLong {
                    function: index,
                    length: function.len(),
                    bound,
                });
            }
            for instruction in function.instructions() {
                if let Operation::Call(target) = instruction.operation {
                    if target >= self.functions.len() {
                        return Err(ProgramError::UnknownFunction {
                            function: target,
                            declared: self.functions.len(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{function}")?;
        }
        Ok(())
    }
}

impl FromStr for Program {
    type Err = ParseProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let functions = s
            .split(" + ")
            .map(str::parse::<Function>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Program::new(functions))
    }
}
