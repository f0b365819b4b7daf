//! Evaluation errors.
//!
//! Every failure is terminal for the script that raised it. An
//! [`EvalError`] carries a structured [`EvalErrorKind`], the rendered
//! message, the source line of the failing instruction and, when raised
//! inside a function, a backtrace of active calls.
//!
//! Errors are built through the factory functions at the bottom of this
//! module so the message always matches the kind.

use std::fmt;

use qc_diagnostic::{Diagnostic, ErrorCode};

/// Result of evaluation.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

/// The error category a script author sees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Syntax,
    Reference,
    Type,
    Range,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCategory::Syntax => "SyntaxError",
            ErrorCategory::Reference => "ReferenceError",
            ErrorCategory::Type => "TypeError",
            ErrorCategory::Range => "RangeError",
        })
    }
}

/// Structured error kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Syntax
    UnknownKeyword {
        keyword: String,
        candidates: Vec<String>,
    },
    StrayBlockKeyword {
        keyword: String,
    },
    MalformedOperand {
        keyword: String,
        reason: String,
    },
    UnterminatedBlock {
        keyword: String,
    },
    InvalidJump {
        reason: String,
    },
    MisplacedNegation {
        operand: String,
    },
    ReturnOutsideFunction,
    MalformedExpression {
        reason: String,
    },

    // Reference
    UndefinedVariable {
        name: String,
    },
    UndefinedFunction {
        name: String,
    },

    // Type
    AssignmentToConstant {
        name: String,
    },
    UndefinedConstant {
        name: String,
    },
    NotCallable {
        name: String,
        type_name: &'static str,
    },
    ExpectedNumber {
        keyword: String,
        type_name: &'static str,
    },

    // Range
    CallDepthExceeded {
        limit: usize,
    },
}

impl EvalErrorKind {
    /// Map this error kind to its `ErrorCode`.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownKeyword { .. } => ErrorCode::E1001,
            Self::MalformedOperand { .. } => ErrorCode::E1002,
            Self::UnterminatedBlock { .. } => ErrorCode::E1003,
            Self::InvalidJump { .. } => ErrorCode::E1004,
            Self::MisplacedNegation { .. } => ErrorCode::E1005,
            Self::ReturnOutsideFunction => ErrorCode::E1006,
            Self::MalformedExpression { .. } => ErrorCode::E1007,
            Self::StrayBlockKeyword { .. } => ErrorCode::E1008,
            Self::UndefinedVariable { .. } => ErrorCode::E2001,
            Self::UndefinedFunction { .. } => ErrorCode::E2002,
            Self::AssignmentToConstant { .. } => ErrorCode::E3001,
            Self::UndefinedConstant { .. } => ErrorCode::E3002,
            Self::NotCallable { .. } => ErrorCode::E3003,
            Self::ExpectedNumber { .. } => ErrorCode::E3004,
            Self::CallDepthExceeded { .. } => ErrorCode::E4001,
        }
    }

    /// The category, derived from the error code range.
    pub fn category(&self) -> ErrorCategory {
        let code = self.error_code();
        if code.is_syntax_error() {
            ErrorCategory::Syntax
        } else if code.is_reference_error() {
            ErrorCategory::Reference
        } else if code.is_type_error() {
            ErrorCategory::Type
        } else {
            ErrorCategory::Range
        }
    }

    /// An actionable suggestion, when one exists.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownKeyword { candidates, .. } if !candidates.is_empty() => {
                let list = candidates
                    .iter()
                    .map(|c| format!("`{c}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!("did you mean {list}?"))
            }
            Self::UndefinedVariable { name } => {
                Some(format!("declare it first with `DECLARE {name} = ...`"))
            }
            Self::UndefinedFunction { name } => {
                Some(format!("define it first with `FUNC {name} ...` and `END`"))
            }
            Self::AssignmentToConstant { name } => Some(format!(
                "declare `{name}` without `*` if it needs to change"
            )),
            Self::CallDepthExceeded { .. } => {
                Some("check that recursive functions have a base case".to_string())
            }
            _ => None,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKeyword { keyword, .. } => write!(f, "Unknown operation: {keyword}"),
            Self::StrayBlockKeyword { keyword } => {
                write!(f, "{keyword} keyword without preceding IF or FUNC.")
            }
            Self::MalformedOperand { keyword, reason } => write!(f, "{keyword}: {reason}"),
            Self::UnterminatedBlock { keyword } => {
                write!(f, "{keyword} keyword with no corresponding END keyword.")
            }
            Self::InvalidJump { reason } => write!(f, "JUMP {reason}"),
            Self::MisplacedNegation { operand } => write!(f, "! within expression: {operand}"),
            Self::ReturnOutsideFunction => write!(f, "RET outside of function"),
            Self::MalformedExpression { reason } => write!(f, "{reason}"),
            Self::UndefinedVariable { name } | Self::UndefinedFunction { name } => {
                write!(f, "{name} is not defined.")
            }
            Self::AssignmentToConstant { .. } => write!(f, "Assignment to constant variable."),
            Self::UndefinedConstant { .. } => write!(
                f,
                "Value type of constant variable declaration cannot be undefined."
            ),
            Self::NotCallable { name, type_name } => {
                write!(f, "{name} is not a function (found {type_name})")
            }
            Self::ExpectedNumber { keyword, type_name } => {
                write!(f, "{keyword} expects a number, found {type_name}")
            }
            Self::CallDepthExceeded { limit } => {
                write!(f, "Maximum call stack size exceeded ({limit} calls)")
            }
        }
    }
}

/// One active call at the time of an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function label (`<anonymous>` for `_`).
    pub name: String,
    /// Source line of the `CALL`.
    pub line: Option<u32>,
}

/// Snapshot of the call stack at an error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(line) = frame.line {
                write!(f, " called at line {line}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Source line of the instruction that failed.
    pub line: Option<u32>,
    /// Active calls at the error site.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            line: None,
            backtrace: None,
        }
    }

    /// Attach a source line unless one is already recorded.
    ///
    /// The innermost failing instruction wins: an error raised inside an IF
    /// branch keeps the branch line as it propagates through the IF.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line.get_or_insert(line);
        self
    }

    /// Attach a backtrace unless one is already recorded.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    /// Convert into a terminal [`Diagnostic`].
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.to_string());
        if let Some(line) = self.line {
            diag = diag.with_line(line);
        }
        if let Some(backtrace) = &self.backtrace {
            for frame in backtrace.frames() {
                diag = diag.with_note(match frame.line {
                    Some(line) => format!("in {} called at line {line}", frame.name),
                    None => format!("in {}", frame.name),
                });
            }
        }
        if let Some(suggestion) = self.kind.suggestion() {
            diag = diag.with_help(suggestion);
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message)
    }
}

impl std::error::Error for EvalError {}

// Syntax

#[cold]
pub fn unknown_keyword(keyword: &str, candidates: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownKeyword {
        keyword: keyword.to_string(),
        candidates,
    })
}

#[cold]
pub fn stray_block_keyword(keyword: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StrayBlockKeyword {
        keyword: keyword.to_string(),
    })
}

#[cold]
pub fn malformed_operand(keyword: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedOperand {
        keyword: keyword.to_string(),
        reason: reason.into(),
    })
}

#[cold]
pub fn unterminated_block(keyword: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnterminatedBlock {
        keyword: keyword.to_string(),
    })
}

#[cold]
pub fn invalid_jump(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidJump {
        reason: reason.into(),
    })
}

#[cold]
pub fn misplaced_negation(operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MisplacedNegation {
        operand: operand.to_string(),
    })
}

#[cold]
pub fn return_outside_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnOutsideFunction)
}

#[cold]
pub fn malformed_expression(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedExpression {
        reason: reason.into(),
    })
}

// Reference

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

// Type

#[cold]
pub fn assignment_to_constant(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssignmentToConstant {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_constant(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedConstant {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_callable(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_string(),
        type_name,
    })
}

#[cold]
pub fn expected_number(keyword: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExpectedNumber {
        keyword: keyword.to_string(),
        type_name,
    })
}

// Range

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallDepthExceeded { limit })
}
