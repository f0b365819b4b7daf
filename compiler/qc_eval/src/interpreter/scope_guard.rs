//! RAII guards for scope frames and call frames.
//!
//! Both guards hold `&mut Interpreter` and implement `Deref`/`DerefMut`, so
//! the guarded code keeps full access to the interpreter. Cleanup runs on
//! drop, which covers early returns through `?` as well as unwinding.
//!
//! ```text
//! let mut call = interpreter.enter_call(frame)?;   // push call frame
//! let mut scoped = call.scoped(caller_scope);      // open child scope
//! scoped.execute_block(&body)?;
//! // scope released, then call frame popped
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::call_stack::CallFrame;
use crate::environment::ScopeId;
use crate::errors::EvalResult;

/// Guard over a child scope. Dropping it releases the scope and any scope
/// allocated after it.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    saved_depth: usize,
    scope: ScopeId,
}

impl ScopedInterpreter<'_> {
    /// The child scope this guard owns.
    #[inline]
    pub fn scope(&self) -> ScopeId {
        self.scope
    }
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.release_to(self.saved_depth);
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// Guard over an active call. Dropping it pops the call frame.
pub struct CallGuard<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.interpreter.call_stack.pop();
    }
}

impl Deref for CallGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for CallGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Open a child scope of `parent` that is released when the guard drops.
    pub fn scoped(&mut self, parent: ScopeId) -> ScopedInterpreter<'_> {
        let saved_depth = self.env.depth();
        let scope = self.env.child(parent);
        ScopedInterpreter {
            interpreter: self,
            saved_depth,
            scope,
        }
    }

    /// Push `frame` onto the call stack until the guard drops.
    ///
    /// Fails without pushing when the maximum call depth is reached.
    pub fn enter_call(&mut self, frame: CallFrame) -> EvalResult<CallGuard<'_>> {
        self.call_stack.push(frame)?;
        Ok(CallGuard { interpreter: self })
    }

    /// Run `f` in a fresh child scope of `parent`.
    pub fn with_scope<T>(
        &mut self,
        parent: ScopeId,
        f: impl FnOnce(&mut Interpreter, ScopeId) -> T,
    ) -> T {
        let mut scoped = self.scoped(parent);
        let scope = scoped.scope();
        f(&mut scoped, scope)
    }
}
