//! Built-in keyword handlers.
//!
//! A handler receives the interpreter and an [`Invocation`] describing the
//! instruction being executed, and answers with a [`Control`] telling the
//! executor where to go next. Handlers are plain function pointers so a
//! [`DispatchTable`] is cheap to build and can be extended by embedders.

mod binding;
mod control;
mod function;
mod output;

use qc_ir::Instruction;

use crate::dispatch::DispatchTable;
use crate::environment::ScopeId;
use crate::errors::{unterminated_block, EvalResult};
use crate::interpreter::Interpreter;
use crate::Value;

/// Signature of a keyword handler.
pub type Handler = fn(&mut Interpreter, &Invocation<'_>) -> EvalResult<Control>;

/// The instruction a handler is invoked for, with its surroundings.
#[derive(Clone, Copy, Debug)]
pub struct Invocation<'a> {
    /// Scope the instruction runs in.
    pub scope: ScopeId,
    /// Text after the keyword, trimmed.
    pub operand: &'a str,
    /// The block being executed.
    pub instructions: &'a [Instruction],
    /// Position of this instruction in `instructions`.
    pub index: usize,
    /// Absolute index of `instructions[0]` in the root list.
    pub origin: usize,
    /// Source line of this instruction.
    pub line: u32,
}

impl Invocation<'_> {
    /// Absolute index of this instruction in the root list.
    #[inline]
    pub fn absolute(&self) -> usize {
        self.origin + self.index
    }
}

/// Where execution continues after a handler.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    /// The next instruction.
    Continue,
    /// The instruction at this absolute index.
    Goto(usize),
    /// Leave the current function with this value.
    Return(Value),
}

/// Register every built-in keyword.
pub fn register_builtins(table: &mut DispatchTable) {
    table.insert("DECLARE", binding::declare);
    table.insert("ASSIGN", binding::assign);
    table.insert("JUMP", control::jump);
    table.insert("WAIT", control::wait);
    table.insert("IF", control::if_block);
    table.insert("IGNORE", control::ignore);
    table.insert("STD::OUT", output::std_out);
    table.insert("FUNC", function::func);
    table.insert("CALL", function::call_instruction);
    table.insert("RET", function::ret);
}

/// Layout of an `IF` or `FUNC` block, as local indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockShape {
    /// First `ELSE` at the block's own depth.
    pub else_at: Option<usize>,
    /// The matching `END`.
    pub end: usize,
}

/// Find the `END` closing a block whose body starts at `start`.
///
/// `IF` and `FUNC` lines inside the body open nested blocks that must be
/// closed first.
pub fn find_block_end(
    instructions: &[Instruction],
    start: usize,
    keyword: &str,
) -> EvalResult<BlockShape> {
    let mut depth = 1usize;
    let mut else_at = None;

    for (offset, instruction) in instructions.iter().enumerate().skip(start) {
        if instruction.opens_block() {
            depth += 1;
        } else if instruction.closes_block() {
            depth -= 1;
            if depth == 0 {
                return Ok(BlockShape {
                    else_at,
                    end: offset,
                });
            }
        } else if instruction.is_else() && depth == 1 && else_at.is_none() {
            else_at = Some(offset);
        }
    }

    Err(unterminated_block(keyword))
}
