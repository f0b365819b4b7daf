//! Source preprocessing: extract the executable region of a script.
//!
//! Only lines between a `%-- BEGIN EXECUTION --%` marker and a
//! `%-- TERMINATE EXECUTION --%` marker are executable. Inside that region,
//! blank lines and `//` comments are dropped and every line is trimmed.
//! Everything outside the region is free-form text and is ignored.

use std::sync::Arc;

use crate::Instruction;

/// Marker line that opens the executable region.
pub const BEGIN_MARKER: &str = "%-- BEGIN EXECUTION --%";

/// Marker line that closes the executable region.
pub const TERMINATE_MARKER: &str = "%-- TERMINATE EXECUTION --%";

/// Prefix of a comment line inside the executable region.
pub const COMMENT_PREFIX: &str = "//";

/// A preprocessed script: the ordered instruction list.
///
/// Instructions are shared (`Arc<[Instruction]>`) so nested executions can
/// borrow slices of the program without cloning it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Arc<[Instruction]>,
}

impl Program {
    /// Build a program from an instruction list.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program {
            instructions: instructions.into(),
        }
    }

    /// The instructions in execution order.
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Shared handle to the instruction list.
    #[inline]
    pub fn shared(&self) -> Arc<[Instruction]> {
        Arc::clone(&self.instructions)
    }

    /// Number of instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the executable region is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Extract the executable region of `source` into a [`Program`].
///
/// A source without a begin marker yields an empty program. A missing
/// terminate marker runs the region to the end of the text. Repeated begin
/// markers inside the region are skipped.
pub fn preprocess(source: &str) -> Program {
    let mut instructions = Vec::new();
    let mut within_execution = false;

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();

        if line.starts_with(BEGIN_MARKER) {
            within_execution = true;
            continue;
        }
        if line.starts_with(TERMINATE_MARKER) {
            break;
        }

        if within_execution && !line.is_empty() && !line.starts_with(COMMENT_PREFIX) {
            let line_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
            instructions.push(Instruction::new(line, line_number));
        }
    }

    Program::new(instructions)
}
