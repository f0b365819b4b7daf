//! Live call stack.
//!
//! `CALL` pushes a [`CallFrame`] for the duration of a function body. The
//! stack validates `RET` (which is only legal inside a call), enforces the
//! maximum call depth and snapshots backtraces at error sites.

use crate::errors::{call_depth_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// Default maximum number of nested calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2000;

/// A single active call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Function label (`<anonymous>` for `_`).
    pub name: String,
    /// Source line of the `CALL` instruction.
    pub call_line: Option<u32>,
}

/// Live call stack for the interpreter.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed when the limit would be exceeded.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(call_depth_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Labels of the active calls, outermost first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|f| f.name.as_str())
    }

    /// Snapshot the stack, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.name.clone(),
                line: f.call_line,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace from this call stack to an error.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALL_DEPTH)
    }
}
