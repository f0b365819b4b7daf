//! Diagnostic emitters.
//!
//! The CLI programs against [`DiagnosticEmitter`]; tests hand the terminal
//! emitter a byte buffer instead of stderr.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn flush(&mut self);
}
