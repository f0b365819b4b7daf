//! [`Diagnostic`]: a rendered runtime failure, ready for a terminal.

use std::fmt;

use crate::ErrorCode;

/// Where in a script a diagnostic points.
///
/// QuickCode has nothing finer than a line, and both halves are optional:
/// a diagnostic built before a script was loaded has neither.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: Option<String>,
    /// 1-based source line.
    pub line: Option<u32>,
}

impl Location {
    pub fn is_known(&self) -> bool {
        self.path.is_some() || self.line.is_some()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.line) {
            (Some(path), Some(line)) => write!(f, "{path}:{line}"),
            (Some(path), None) => f.write_str(path),
            (None, Some(line)) => write!(f, "line {line}"),
            (None, None) => f.write_str("<unknown>"),
        }
    }
}

/// A script failure as shown to its author.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub location: Location,
    /// Context lines, e.g. one per active call.
    pub notes: Vec<String>,
    /// Ways to fix the script.
    pub help: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            location: Location::default(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.location.path = Some(path.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.location.line = Some(line);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

/// Plain-text rendering, identical to the terminal emitter without colors.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)?;
        if self.location.is_known() {
            write!(f, "\n  --> {}", self.location)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for help in &self.help {
            write!(f, "\n  = help: {help}")?;
        }
        Ok(())
    }
}
