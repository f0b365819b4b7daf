//! QuickCode Eval - instruction executor and expression evaluator.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Interpreter`: instruction-pointer walk over a root list, one
//!   keyword handler per line
//! - `DispatchTable`: keyword trie of handler function pointers
//! - `Environment`: arena of lexically chained scope frames
//! - `CallStack`: active calls, depth limit and backtraces
//! - `expr::evaluate`: textual expression evaluation with JavaScript
//!   semantics
//! - `Scheduler`: cooperative yield before every instruction and `WAIT`
//!
//! # Example
//!
//! ```
//! use qc_eval::{buffer_handler, Interpreter};
//!
//! let output = buffer_handler();
//! let mut interp = Interpreter::builder().print_handler(output.clone()).build();
//! interp
//!     .run_source("%-- BEGIN EXECUTION --%\nDECLARE x = 2 ** 5\nSTD::OUT x\n")
//!     .unwrap();
//! assert_eq!(output.lines(), vec!["32"]);
//! ```

mod call_stack;
pub mod dispatch;
mod environment;
pub mod errors;
pub mod expr;
pub mod handlers;
pub mod interpreter;
mod print_handler;
mod scheduler;
mod stack;
mod stdlib;
mod value;

pub use call_stack::{CallFrame, CallStack, DEFAULT_MAX_CALL_DEPTH};
pub use dispatch::{DispatchTable, KeywordTrie};
pub use environment::{Binding, Environment, Lookup, ScopeId};
pub use errors::{
    BacktraceFrame, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use expr::{evaluate, split_arguments, string_literal};
pub use handlers::{Control, Handler, Invocation};
pub use interpreter::{Block, Interpreter, InterpreterBuilder, Outcome, STD_BINDING};
pub use print_handler::{
    buffer_handler, callback_handler, silent_handler, stdout_handler, BufferPrintHandler,
    CallbackPrintHandler, PrintHandlerImpl, SharedPrintHandler, StdoutPrintHandler,
};
pub use scheduler::{InstantScheduler, Scheduler, ThreadScheduler};
pub use stack::ensure_sufficient_stack;
pub use stdlib::{ConsoleHost, HostIo, StdLibrary};
pub use value::{format_number, parse_numeric_literal, FunctionValue, Value};
