//! Error codes for all interpreter diagnostics.
//!
//! Each code is a unique identifier (e.g. `E1001`) whose first digit names
//! the error category reported to the script author.

use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where the first digit indicates the category:
/// - E1xxx: `SyntaxError`, malformed instructions and block structure
/// - E2xxx: `ReferenceError`, names that were never declared
/// - E3xxx: `TypeError`, values of the wrong kind
/// - E4xxx: `RangeError`, resource limits
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Syntax Errors (E1xxx)
    /// Unknown instruction keyword
    E1001,
    /// Malformed operand or identifier
    E1002,
    /// Block opened without a matching END
    E1003,
    /// Invalid jump target
    E1004,
    /// Negation operator in the middle of an operand
    E1005,
    /// RET outside of a function call
    E1006,
    /// Empty or unbalanced expression
    E1007,
    /// ELSE or END with no open block
    E1008,

    // Reference Errors (E2xxx)
    /// Identifier read or assigned before declaration
    E2001,
    /// CALL of a function name that was never declared
    E2002,

    // Type Errors (E3xxx)
    /// Assignment to a constant
    E3001,
    /// Constant declared without a value
    E3002,
    /// CALL of a value that is not a function
    E3003,
    /// Number expected
    E3004,

    // Range Errors (E4xxx)
    /// Maximum call depth exceeded
    E4001,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E4001,
    ];

    /// Get the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
        }
    }

    /// One-line summary, used by `qc explain` when listing codes.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unknown instruction keyword",
            ErrorCode::E1002 => "malformed operand or identifier",
            ErrorCode::E1003 => "block opened without a matching END",
            ErrorCode::E1004 => "invalid jump target",
            ErrorCode::E1005 => "negation operator in the middle of an operand",
            ErrorCode::E1006 => "RET outside of a function call",
            ErrorCode::E1007 => "empty or unbalanced expression",
            ErrorCode::E1008 => "ELSE or END with no open block",
            ErrorCode::E2001 => "identifier used before declaration",
            ErrorCode::E2002 => "call of an undeclared function",
            ErrorCode::E3001 => "assignment to a constant",
            ErrorCode::E3002 => "constant declared without a value",
            ErrorCode::E3003 => "call of a value that is not a function",
            ErrorCode::E3004 => "number expected",
            ErrorCode::E4001 => "maximum call depth exceeded",
        }
    }

    /// Name of the error category shown to script authors.
    pub fn category(&self) -> &'static str {
        if self.is_syntax_error() {
            "SyntaxError"
        } else if self.is_reference_error() {
            "ReferenceError"
        } else if self.is_type_error() {
            "TypeError"
        } else {
            "RangeError"
        }
    }

    /// Check if this is a syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001
                | ErrorCode::E1002
                | ErrorCode::E1003
                | ErrorCode::E1004
                | ErrorCode::E1005
                | ErrorCode::E1006
                | ErrorCode::E1007
                | ErrorCode::E1008
        )
    }

    /// Check if this is a reference error (E2xxx range).
    pub fn is_reference_error(&self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002)
    }

    /// Check if this is a type error (E3xxx range).
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E3001 | ErrorCode::E3002 | ErrorCode::E3003 | ErrorCode::E3004
        )
    }

    /// Check if this is a range error (E4xxx range).
    pub fn is_range_error(&self) -> bool {
        matches!(self, ErrorCode::E4001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] so it stays exhaustive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
