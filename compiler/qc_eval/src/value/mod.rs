//! Runtime values.
//!
//! QuickCode values follow JavaScript's primitive model: IEEE-754 numbers,
//! booleans, strings and `undefined`, plus function values and the host
//! standard-library object. Coercions ([`Value::to_number`],
//! [`Value::is_truthy`], `Display`) match JavaScript's `ToNumber`,
//! `ToBoolean` and `ToString`.

use std::fmt;
use std::sync::Arc;

use qc_ir::Instruction;

use crate::StdLibrary;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Bool(bool),
    Number(f64),
    Str(Arc<str>),
    Function(Arc<FunctionValue>),
    /// The `std` binding seeded into every root scope.
    Std(StdLibrary),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Name of the value's type, as reported in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::Std(_) => "object",
        }
    }

    /// JavaScript truthiness: `false`, `0`, `NaN`, `""` and `undefined` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Function(_) | Value::Std(_) => true,
        }
    }

    /// JavaScript `ToNumber`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined | Value::Function(_) | Value::Std(_) => f64::NAN,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    parse_numeric_literal(trimmed).unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Whether the value is a string.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Whether the value is an object (function or `std`).
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Std(_))
    }

    /// Strict equality (`===`).
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Std(a), Value::Std(b)) => a.same_host(b),
            _ => false,
        }
    }

    /// Loose equality (`==`).
    ///
    /// Booleans compare as numbers, numbers and strings compare numerically,
    /// objects compare with primitives through their string form, and
    /// `undefined` only equals itself.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(b), _) => Value::Number(f64::from(u8::from(*b))).loose_equals(other),
            (_, Value::Bool(b)) => self.loose_equals(&Value::Number(f64::from(u8::from(*b)))),
            (Value::Number(n), Value::Str(_)) => *n == other.to_number(),
            (Value::Str(_), Value::Number(n)) => self.to_number() == *n,
            (a, b) if a.is_object() && !b.is_object() && !matches!(b, Value::Undefined) => {
                Value::string(a.to_string()).loose_equals(b)
            }
            (a, b) if b.is_object() && !a.is_object() && !matches!(a, Value::Undefined) => {
                a.loose_equals(&Value::string(b.to_string()))
            }
            _ => self.strict_equals(other),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Function(func) => match func.name() {
                Some(name) => write!(f, "[Function: {name}]"),
                None => f.write_str("[Function (anonymous)]"),
            },
            Value::Std(_) => f.write_str("[object std]"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Function(func) => f.debug_tuple("Function").field(func).finish(),
            other => write!(f, "{other}"),
        }
    }
}

/// A user-defined function: parameter names and a body of instructions.
///
/// The body is an owned copy of the lines between the `FUNC` header and its
/// `END`, so jump targets inside a function are relative to its first body
/// line. Immutable once created.
#[derive(Debug)]
pub struct FunctionValue {
    name: Option<String>,
    params: Vec<String>,
    body: Arc<[Instruction]>,
}

impl FunctionValue {
    pub fn new(
        name: Option<String>,
        params: Vec<String>,
        body: Vec<Instruction>,
    ) -> Self {
        FunctionValue {
            name,
            params,
            body: body.into(),
        }
    }

    /// Declared name, or `None` for `_`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name used in call frames and backtraces.
    pub fn label(&self) -> &str {
        self.name().unwrap_or("<anonymous>")
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn body(&self) -> &Arc<[Instruction]> {
        &self.body
    }
}

/// Format a number the way JavaScript's `Number.prototype.toString` does.
///
/// Integral values print without a fraction; magnitudes at or above `1e21`
/// or below `1e-6` use exponent notation with an explicit exponent sign.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{n:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    n.to_string()
}

/// Parse a JavaScript numeric literal.
///
/// Accepts decimal and exponent forms with an optional sign, `Infinity`,
/// and unsigned `0x`/`0o`/`0b` integers. Returns `None` for anything else,
/// including the empty string.
#[expect(clippy::cast_precision_loss, reason = "JavaScript numbers are doubles")]
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    let text = text.trim();
    let (sign, unsigned) = match text.as_bytes().first()? {
        b'+' => (1.0, &text[1..]),
        b'-' => (-1.0, &text[1..]),
        _ => (1.0, text),
    };

    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    for (prefixes, radix) in [(["0x", "0X"], 16), (["0o", "0O"], 8), (["0b", "0B"], 2)] {
        if let Some(digits) = prefixes.iter().find_map(|p| text.strip_prefix(p)) {
            if digits.is_empty() || digits.starts_with('+') {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    let numeric_chars = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric_chars || !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok()
}
