//! QuickCode IR - instructions and the executable region of a source file.
//!
//! QuickCode has no syntax tree. A program is an ordered list of
//! [`Instruction`]s, one per executable source line, and the position of an
//! instruction in that list is the unit of jump addressing. Expressions stay
//! textual and are re-parsed by the evaluator on every execution.
//!
//! # Pipeline
//!
//! ```text
//! source text
//!     │  preprocess()
//!     ▼
//! Program ──► [Instruction { text, line }, ...]
//! ```

mod instruction;
mod preprocess;

pub use instruction::{
    inline_definition, strip_keyword, Instruction, BLOCK_CLOSER, BLOCK_OPENERS, CALL_KEYWORD,
    ELSE_KEYWORD, FUNC_KEYWORD,
};
pub use preprocess::{preprocess, Program, BEGIN_MARKER, COMMENT_PREFIX, TERMINATE_MARKER};
