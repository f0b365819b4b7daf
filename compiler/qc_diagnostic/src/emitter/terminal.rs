//! ANSI terminal rendering.
//!
//! ```text
//! error[E2001]: ReferenceError: total is not defined
//!   --> sum.qc:12
//!   = note: in sum called at line 20
//!   = help: declare `total` before using it
//! ```

use std::io::{self, IsTerminal, Write};

use crate::Diagnostic;

use super::DiagnosticEmitter;

const RED: &str = "\x1b[1;31m";
const BLUE: &str = "\x1b[1;34m";
const CYAN: &str = "\x1b[1;36m";
const GREEN: &str = "\x1b[1;32m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// When to emit ANSI escapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether the output is a terminal.
    pub fn resolve(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl TerminalEmitter<io::Stderr> {
    /// Emitter for stderr; `Auto` checks whether stderr is a terminal.
    pub fn stderr(mode: ColorMode) -> Self {
        let is_tty = io::stderr().is_terminal();
        Self::new(io::stderr(), mode.resolve(is_tty))
    }
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, colors: bool) -> Self {
        TerminalEmitter { writer, colors }
    }

    fn paint(&self, text: &str, style: &str) -> String {
        if self.colors {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = format!(
            "{}{}: {}\n",
            self.paint("error", RED),
            self.paint(&format!("[{}]", diagnostic.code), BOLD),
            diagnostic.message
        );
        if diagnostic.location.is_known() {
            out.push_str(&format!(
                "  --> {}\n",
                self.paint(&diagnostic.location.to_string(), BLUE)
            ));
        }
        for note in &diagnostic.notes {
            out.push_str(&format!("  = {}: {note}\n", self.paint("note", CYAN)));
        }
        for help in &diagnostic.help {
            out.push_str(&format!("  = {}: {help}\n", self.paint("help", GREEN)));
        }
        out.push('\n');
        out
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let rendered = self.render(diagnostic);
        // A closed stderr leaves nowhere to report the failure.
        let _ = self.writer.write_all(rendered.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
