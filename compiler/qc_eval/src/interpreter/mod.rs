//! The instruction executor.
//!
//! An [`Interpreter`] owns everything a script touches: the scope arena,
//! its dispatch table, the call stack, the output sink, the scheduler and
//! the `std` binding. It walks an instruction list with an instruction
//! pointer, dispatching each line to its keyword handler and applying the
//! control transfer the handler returns.
//!
//! # Addressing
//!
//! Jump targets are absolute indices into a *root* list: the program, or a
//! function body. A nested block (an IF branch) is a slice of its root list
//! that knows its `origin`, the absolute index of its first line. A target
//! outside the slice ends the nested block with [`Outcome::Escaped`] and the
//! enclosing block resumes there.

mod builder;
mod scope_guard;

use qc_ir::{Instruction, Program, BLOCK_CLOSER, ELSE_KEYWORD};
use tracing::{debug, trace};

pub use builder::InterpreterBuilder;
pub use scope_guard::{CallGuard, ScopedInterpreter};

use crate::call_stack::CallStack;
use crate::dispatch::DispatchTable;
use crate::environment::{Binding, Environment, Lookup, ScopeId};
use crate::errors::{stray_block_keyword, unknown_keyword, EvalResult};
use crate::handlers::{Control, Invocation};
use crate::print_handler::SharedPrintHandler;
use crate::scheduler::Scheduler;
use crate::stack::ensure_sufficient_stack;
use crate::stdlib::StdLibrary;
use crate::{expr, Value};

/// Identifier of the standard-library binding in every root scope.
pub const STD_BINDING: &str = "std";

/// A contiguous run of instructions executed in one scope.
#[derive(Clone, Copy)]
pub struct Block<'a> {
    pub instructions: &'a [Instruction],
    pub scope: ScopeId,
    /// Absolute index of `instructions[0]` in the root list.
    pub origin: usize,
    /// Nested blocks hand out-of-range jumps to their parent.
    pub nested: bool,
}

impl<'a> Block<'a> {
    /// A root block: the whole program or a function body.
    pub fn root(instructions: &'a [Instruction], scope: ScopeId) -> Self {
        Block {
            instructions,
            scope,
            origin: 0,
            nested: false,
        }
    }
}

/// How a block finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Ran off the end.
    Completed,
    /// A jump left a nested block; the absolute index to resume at.
    Escaped(usize),
    /// `RET` produced a value.
    Returned(Value),
}

/// Tree-walking interpreter for QuickCode.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) dispatch: DispatchTable,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) scheduler: Box<dyn Scheduler>,
    std_library: StdLibrary,
}

impl Interpreter {
    /// An interpreter with default settings: stdout output, real sleeping,
    /// console `std`.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Start configuring an interpreter.
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    fn from_parts(
        dispatch: DispatchTable,
        call_stack: CallStack,
        print_handler: SharedPrintHandler,
        scheduler: Box<dyn Scheduler>,
        std_library: StdLibrary,
    ) -> Self {
        let mut env = Environment::new();
        let root = env.root();
        env.declare(
            root,
            STD_BINDING,
            Binding::constant(Value::Std(std_library.clone())),
        );
        Interpreter {
            env,
            dispatch,
            call_stack,
            print_handler,
            scheduler,
            std_library,
        }
    }

    /// Execute a preprocessed program in the root scope.
    ///
    /// Bindings declared at the top level stay in the root scope afterwards
    /// and can be inspected with [`Interpreter::globals`].
    #[tracing::instrument(level = "debug", skip_all, fields(instructions = program.len()))]
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        let instructions = program.shared();
        let block = Block::root(&instructions, self.env.root());
        let outcome = self.execute_block(&block)?;
        debug!(?outcome, "program finished");
        Ok(())
    }

    /// Preprocess and execute source text.
    pub fn run_source(&mut self, source: &str) -> EvalResult<()> {
        self.run(&qc_ir::preprocess(source))
    }

    /// Execute one block to completion, escape or return.
    pub fn execute_block(&mut self, block: &Block<'_>) -> EvalResult<Outcome> {
        ensure_sufficient_stack(|| self.execute_block_inner(block))
    }

    fn execute_block_inner(&mut self, block: &Block<'_>) -> EvalResult<Outcome> {
        let len = block.instructions.len();
        let mut index = 0;

        while index < len {
            let instruction = &block.instructions[index];
            let (keyword, operand) = instruction.split();
            let handler = self
                .dispatch
                .retrieve(keyword)
                .ok_or_else(|| self.unrecognised(keyword).at_line(instruction.line()))?;

            self.scheduler.yield_now();
            trace!(
                line = instruction.line(),
                index = block.origin + index,
                %instruction,
                "step"
            );

            let invocation = Invocation {
                scope: block.scope,
                operand,
                instructions: block.instructions,
                index,
                origin: block.origin,
                line: instruction.line(),
            };
            let control =
                handler(self, &invocation).map_err(|err| err.at_line(instruction.line()))?;

            match control {
                Control::Continue => index += 1,
                Control::Goto(target) => {
                    match target.checked_sub(block.origin).filter(|local| *local <= len) {
                        Some(local) => index = local,
                        None if block.nested => {
                            debug!(target, origin = block.origin, "escape jump");
                            return Ok(Outcome::Escaped(target));
                        }
                        None => break,
                    }
                }
                Control::Return(value) => {
                    debug!(%value, "return");
                    return Ok(Outcome::Returned(value));
                }
            }
        }

        Ok(Outcome::Completed)
    }

    fn unrecognised(&self, keyword: &str) -> crate::EvalError {
        if keyword == ELSE_KEYWORD || keyword == BLOCK_CLOSER {
            stray_block_keyword(keyword)
        } else {
            unknown_keyword(keyword, self.dispatch.suggestions(keyword))
        }
    }

    /// Evaluate expression text in `scope`.
    pub fn evaluate(&self, scope: ScopeId, text: &str) -> EvalResult<Value> {
        expr::evaluate(&self.env, scope, text)
    }

    /// The scope arena.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The live call stack.
    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// The output sink.
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// The value bound to `std`.
    pub fn std_library(&self) -> &StdLibrary {
        &self.std_library
    }

    /// Value of a top-level binding.
    pub fn global(&self, id: &str) -> Option<Value> {
        match self.env.get(self.env.root(), id) {
            Lookup::Found(binding) => Some(binding.value.clone()),
            Lookup::Undeclared => None,
        }
    }

    /// Top-level bindings other than `std`, sorted by identifier.
    pub fn globals(&self) -> Vec<(String, Value)> {
        self.env
            .bindings(self.env.root())
            .into_iter()
            .filter(|(id, _)| *id != STD_BINDING)
            .map(|(id, binding)| (id.to_string(), binding.value.clone()))
            .collect()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
