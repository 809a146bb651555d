//! Lazy enumeration of every candidate program.
//!
//! Each function independently ranges over all bodies of length `0..=bound`
//! drawn from the alphabet; a candidate picks one body per function. The
//! whole space is walked as a mixed-radix odometer: function 0 is the
//! fastest-moving digit, and within a function shorter bodies come first and
//! equal-length bodies follow alphabet order with the last slot moving
//! fastest.
//!
//! Every candidate has an index. A [`Cursor`] can start at any index and
//! yields exactly what skipping that many candidates from the start would.

use crate::program::{Function, Instruction, Program};

/// The candidate space for one puzzle.
#[derive(Debug, Clone)]
pub struct ProgramSpace {
    bounds: Vec<usize>,
    alphabet: Vec<Instruction>,
}

impl ProgramSpace {
    pub fn new(bounds: Vec<usize>, alphabet: Vec<Instruction>) -> Self {
        Self { bounds, alphabet }
    }

    pub fn bounds(&self) -> &[usize] {
        &self.bounds
    }

    pub fn alphabet(&self) -> &[Instruction] {
        &self.alphabet
    }

    /// Number of bodies one function with `bound` slots can take, or `None`
    /// if it does not fit in a `u128`.
    pub fn bodies_per_function(&self, bound: usize) -> Option<u128> {
        let radix = self.alphabet.len() as u128;
        let mut total: u128 = 0;
        let mut power: u128 = 1;
        for length in 0..=bound {
            total = total.checked_add(power)?;
            if length < bound {
                power = power.checked_mul(radix)?;
            }
        }
        Some(total)
    }

    /// Total number of candidate programs, or `None` on overflow.
    pub fn len(&self) -> Option<u128> {
        self.bounds.iter().try_fold(1u128, |total, &bound| {
            total.checked_mul(self.bodies_per_function(bound)?)
        })
    }

    /// Cursor at the first candidate (every function empty).
    pub fn iter(&self) -> Cursor<'_> {
        self.starting_at(0)
    }

    /// Cursor at candidate `index`. Past the end yields nothing.
    pub fn starting_at(&self, index: u128) -> Cursor<'_> {
        Cursor {
            space: self,
            odometer: Odometer::seek(self, index),
        }
    }

    /// Split a per-function body index into alphabet indices.
    fn body_digits(&self, mut body: u128) -> Vec<usize> {
        let radix = self.alphabet.len() as u128;
        let mut length = 0u32;
        let mut width: u128 = 1;
        while body >= width {
            body -= width;
            length += 1;
            width = radix.checked_pow(length).unwrap_or(u128::MAX);
        }

        let mut digits = vec![0; length as usize];
        for slot in digits.iter_mut().rev() {
            *slot = (body % radix) as usize;
            body /= radix;
        }
        digits
    }
}

impl IntoIterator for ProgramSpace {
    type Item = Program;
    type IntoIter = Candidates;

    fn into_iter(self) -> Candidates {
        let odometer = Odometer::seek(&self, 0);
        Candidates {
            space: self,
            odometer,
        }
    }
}

impl<'a> IntoIterator for &'a ProgramSpace {
    type Item = Program;
    type IntoIter = Cursor<'a>;

    fn into_iter(self) -> Cursor<'a> {
        self.iter()
    }
}

/// Per-function digits plus the program they spell, updated in place.
#[derive(Debug, Clone)]
struct Odometer {
    digits: Vec<Vec<usize>>,
    program: Program,
    index: u128,
    done: bool,
}

impl Odometer {
    fn seek(space: &ProgramSpace, index: u128) -> Self {
        let mut digits = Vec::with_capacity(space.bounds.len());
        let mut rest = index;

        for &bound in &space.bounds {
            let body = match space.bodies_per_function(bound) {
                Some(count) => {
                    let body = rest % count;
                    rest /= count;
                    body
                }
                // This digit alone outranges any u128 index.
                None => std::mem::take(&mut rest),
            };
            digits.push(space.body_digits(body));
        }

        let functions = digits
            .iter()
            .map(|body| Function::from_instructions(body.iter().map(|&d| space.alphabet[d])))
            .collect();

        Self {
            digits,
            program: Program::new(functions),
            index,
            done: rest > 0,
        }
    }

    fn current(&self) -> Option<&Program> {
        (!self.done).then_some(&self.program)
    }

    fn advance(&mut self, space: &ProgramSpace) {
        if self.done {
            return;
        }
        self.index += 1;

        for function in 0..self.digits.len() {
            if self.advance_function(space, function) {
                return;
            }
        }
        self.done = true;
    }

    /// Step one function's body; `false` means it wrapped to empty and the
    /// next function must carry.
    fn advance_function(&mut self, space: &ProgramSpace, function: usize) -> bool {
        let alphabet = &space.alphabet;
        let bound = space.bounds[function];
        let digits = &mut self.digits[function];
        let slots = &mut self.program.functions[function].slots;

        for position in (0..digits.len()).rev() {
            digits[position] += 1;
            if digits[position] < alphabet.len() {
                slots[position] = Some(alphabet[digits[position]]);
                return true;
            }
            digits[position] = 0;
            slots[position] = Some(alphabet[0]);
        }

        // Every body of this length is used up: grow by one slot, or wrap.
        if digits.len() < bound && !alphabet.is_empty() {
            digits.push(0);
            slots.push(Some(alphabet[0]));
            true
        } else {
            digits.clear();
            slots.clear();
            false
        }
    }
}

/// Walks a borrowed space from some index onward.
///
/// [`Cursor::current`] lends the candidate without cloning; the `Iterator`
/// impl clones each one out.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    space: &'a ProgramSpace,
    odometer: Odometer,
}

impl Cursor<'_> {
    /// The candidate under the cursor, or `None` once the space is done.
    pub fn current(&self) -> Option<&Program> {
        self.odometer.current()
    }

    /// Index of the candidate under the cursor.
    pub fn index(&self) -> u128 {
        self.odometer.index
    }

    /// Move to the next candidate.
    pub fn advance(&mut self) {
        self.odometer.advance(self.space);
    }
}

impl Iterator for Cursor<'_> {
    type Item = Program;

    fn next(&mut self) -> Option<Program> {
        let program = self.current()?.clone();
        self.advance();
        Some(program)
    }
}

/// Owning iterator over a whole space.
#[derive(Debug, Clone)]
pub struct Candidates {
    space: ProgramSpace,
    odometer: Odometer,
}

impl Iterator for Candidates {
    type Item = Program;

    fn next(&mut self) -> Option<Program> {
        let program = self.odometer.current()?.clone();
        self.odometer.advance(&self.space);
        Some(program)
    }
}

/// Lazily enumerate every candidate program for `bounds` over `alphabet`.
pub fn enumerate(bounds: &[usize], alphabet: &[Instruction]) -> Candidates {
    ProgramSpace::new(bounds.to_vec(), alphabet.to_vec()).into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::build_alphabet;
    use crate::program::Operation;

    fn tiny_alphabet(size: usize) -> Vec<Instruction> {
        [Operation::MoveForward, Operation::TurnLeft, Operation::TurnRight]
            .into_iter()
            .take(size)
            .map(Instruction::new)
            .collect()
    }

    #[test]
    fn test_single_slot_single_instruction() {
        let space = ProgramSpace::new(vec![1], tiny_alphabet(1));
        let all: Vec<String> = space.iter().map(|p| p.to_string()).collect();
        assert_eq!(all, vec!["[ ]", "[ forward ]"]);
        assert_eq!(space.len(), Some(2));
    }

    #[test]
    fn test_order_within_one_function() {
        let space = ProgramSpace::new(vec![2], tiny_alphabet(2));
        let all: Vec<String> = space.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            all,
            vec![
                "[ ]",
                "[ forward ]",
                "[ left ]",
                "[ forward, forward ]",
                "[ forward, left ]",
                "[ left, forward ]",
                "[ left, left ]",
            ]
        );
    }

    #[test]
    fn test_first_function_moves_fastest() {
        let space = ProgramSpace::new(vec![1, 1], tiny_alphabet(2));
        let all: Vec<String> = space.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            all,
            vec![
                "[ ] + [ ]",
                "[ forward ] + [ ]",
                "[ left ] + [ ]",
                "[ ] + [ forward ]",
                "[ forward ] + [ forward ]",
                "[ left ] + [ forward ]",
                "[ ] + [ left ]",
                "[ forward ] + [ left ]",
                "[ left ] + [ left ]",
            ]
        );
    }

    #[test]
    fn test_cardinality() {
        let alphabet = build_alphabet(2, &[]);
        let space = ProgramSpace::new(vec![2, 1], alphabet);
        // (1 + 20 + 400) * (1 + 20)
        assert_eq!(space.len(), Some(421 * 21));
        assert_eq!(space.iter().count() as u128, 421 * 21);
    }

    #[test]
    fn test_zero_bound_and_empty_alphabet() {
        let space = ProgramSpace::new(vec![0, 3], Vec::new());
        assert_eq!(space.len(), Some(1));
        assert_eq!(space.iter().count(), 1);

        let space = ProgramSpace::new(vec![0], tiny_alphabet(3));
        assert_eq!(space.iter().collect::<Vec<_>>(), vec![Program::empty(1)]);
    }

    #[test]
    fn test_restart_matches_skip() {
        let space = ProgramSpace::new(vec![2, 2], tiny_alphabet(3));
        let total = space.len().unwrap();
        let all: Vec<Program> = space.iter().collect();
        assert_eq!(all.len() as u128, total);

        for start in [0u128, 1, 4, 12, 13, 100, total - 1] {
            let resumed: Vec<Program> = space.starting_at(start).collect();
            assert_eq!(resumed, all[start as usize..], "start {start}");
        }
        assert_eq!(space.starting_at(total).next(), None);
    }

    #[test]
    fn test_cursor_tracks_index() {
        let space = ProgramSpace::new(vec![1], tiny_alphabet(2));
        let mut cursor = space.iter();
        assert_eq!(cursor.index(), 0);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.current().map(ToString::to_string).as_deref(), Some("[ left ]"));
        cursor.advance();
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_overflowing_space_still_enumerates() {
        let space = ProgramSpace::new(vec![30, 30], build_alphabet(2, &[]));
        assert_eq!(space.len(), None);
        let first: Vec<String> = space.iter().take(2).map(|p| p.to_string()).collect();
        assert_eq!(first, vec!["[ ] + [ ]", "[ (R)|forward ] + [ ]"]);
        let later = space.starting_at(1 << 100);
        assert!(later.current().is_some());
    }

    #[test]
    fn test_enumerate_function() {
        let alphabet = tiny_alphabet(1);
        assert_eq!(enumerate(&[1], &alphabet).count(), 2);
    }
}
