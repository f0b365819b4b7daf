//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::call_stack::{CallStack, DEFAULT_MAX_CALL_DEPTH};
use crate::dispatch::DispatchTable;
use crate::handlers::Handler;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::scheduler::{Scheduler, ThreadScheduler};
use crate::stdlib::StdLibrary;

/// Builder for creating Interpreter instances with various configurations.
///
/// Defaults: output goes to stdout, `WAIT` sleeps the current thread, `std`
/// talks to the console and calls nest up to [`DEFAULT_MAX_CALL_DEPTH`] deep.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    scheduler: Option<Box<dyn Scheduler>>,
    std_library: Option<StdLibrary>,
    max_call_depth: usize,
    extra_handlers: Vec<(String, Handler)>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            print_handler: None,
            scheduler: None,
            std_library: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            extra_handlers: Vec::new(),
        }
    }

    /// Set where `STD::OUT` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set how the interpreter yields and sleeps.
    #[must_use]
    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    /// Set the value bound to `std`.
    #[must_use]
    pub fn std_library(mut self, std_library: StdLibrary) -> Self {
        self.std_library = Some(std_library);
        self
    }

    /// Set the maximum number of nested calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Register an additional keyword, or replace a built-in one.
    #[must_use]
    pub fn handler(mut self, keyword: impl Into<String>, handler: Handler) -> Self {
        self.extra_handlers.push((keyword.into(), handler));
        self
    }

    pub fn build(self) -> Interpreter {
        let mut dispatch = DispatchTable::standard();
        for (keyword, handler) in &self.extra_handlers {
            dispatch.insert(keyword, *handler);
        }

        Interpreter::from_parts(
            dispatch,
            CallStack::new(self.max_call_depth),
            self.print_handler.unwrap_or_else(stdout_handler),
            self.scheduler.unwrap_or_else(|| Box::new(ThreadScheduler)),
            self.std_library.unwrap_or_default(),
        )
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
