//! The closed set of instructions a puzzle allows.
//!
//! Order matters: it is the digit order of the program enumerator, so the
//! same inputs must always produce the same list.

use crate::program::{Instruction, Operation};
use crate::world::Color;

/// Guards in alphabet order; `None` is the unguarded variant.
const GUARDS: [Option<Color>; 4] = [Some(Color::Red), Some(Color::Green), Some(Color::Blue), None];

/// Build every legal instruction for a puzzle with `function_count`
/// functions that may paint with `paintable` colors.
///
/// For each guard (red, green, blue, unguarded): forward, left, right, one
/// recolor per paintable color in the given order, then one call per
/// function.
pub fn build_alphabet(function_count: usize, paintable: &[Color]) -> Vec<Instruction> {
    let mut alphabet = Vec::with_capacity(alphabet_size(function_count, paintable.len()));

    for guard in GUARDS {
        let operations = [Operation::MoveForward, Operation::TurnLeft, Operation::TurnRight]
            .into_iter()
            .chain(paintable.iter().map(|&color| Operation::Recolor(color)))
            .chain((0..function_count).map(Operation::Call));

        alphabet.extend(operations.map(|operation| Instruction { operation, guard }));
    }

    alphabet
}

/// Number of instructions [`build_alphabet`] returns.
pub fn alphabet_size(function_count: usize, paintable_count: usize) -> usize {
    GUARDS.len() * (3 + paintable_count + function_count)
}
