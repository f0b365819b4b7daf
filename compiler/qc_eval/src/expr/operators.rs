//! Binary operators.
//!
//! Operators are recognised as whitespace-delimited tokens and grouped into
//! precedence tiers. Semantics follow JavaScript's coercion rules.

use std::cmp::Ordering;

use crate::Value;

/// Binary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    NotEq,
    Eq,
    StrictNotEq,
    StrictEq,
    GtEq,
    Gt,
    LtEq,
    Lt,
    Sub,
    Add,
    Mod,
    Mul,
    Div,
    Pow,
}

/// Precedence tiers, weakest-binding first.
pub(super) const TIERS: [&[BinaryOp]; 7] = [
    &[BinaryOp::Or],
    &[BinaryOp::And],
    &[
        BinaryOp::NotEq,
        BinaryOp::Eq,
        BinaryOp::StrictNotEq,
        BinaryOp::StrictEq,
    ],
    &[BinaryOp::GtEq, BinaryOp::Gt, BinaryOp::LtEq, BinaryOp::Lt],
    &[BinaryOp::Sub, BinaryOp::Add],
    &[BinaryOp::Mod, BinaryOp::Mul, BinaryOp::Div],
    &[BinaryOp::Pow],
];

impl BinaryOp {
    /// Parse an operator token. `of` is an alias for `*`.
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "||" => BinaryOp::Or,
            "&&" => BinaryOp::And,
            "!=" => BinaryOp::NotEq,
            "==" => BinaryOp::Eq,
            "!==" => BinaryOp::StrictNotEq,
            "===" => BinaryOp::StrictEq,
            ">=" => BinaryOp::GtEq,
            ">" => BinaryOp::Gt,
            "<=" => BinaryOp::LtEq,
            "<" => BinaryOp::Lt,
            "-" => BinaryOp::Sub,
            "+" => BinaryOp::Add,
            "%" => BinaryOp::Mod,
            "*" | "of" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "**" => BinaryOp::Pow,
            _ => return None,
        })
    }
}

/// Apply `op` to two evaluated operands.
pub fn evaluate_binary(op: BinaryOp, left: Value, right: Value) -> Value {
    match op {
        BinaryOp::Or => {
            if left.is_truthy() {
                left
            } else {
                right
            }
        }
        BinaryOp::And => {
            if left.is_truthy() {
                right
            } else {
                left
            }
        }
        BinaryOp::Eq => Value::Bool(left.loose_equals(&right)),
        BinaryOp::NotEq => Value::Bool(!left.loose_equals(&right)),
        BinaryOp::StrictEq => Value::Bool(left.strict_equals(&right)),
        BinaryOp::StrictNotEq => Value::Bool(!left.strict_equals(&right)),
        BinaryOp::Lt => compare(&left, &right, Ordering::is_lt),
        BinaryOp::LtEq => compare(&left, &right, Ordering::is_le),
        BinaryOp::Gt => compare(&left, &right, Ordering::is_gt),
        BinaryOp::GtEq => compare(&left, &right, Ordering::is_ge),
        BinaryOp::Add => add(&left, &right),
        BinaryOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Div => Value::Number(left.to_number() / right.to_number()),
        BinaryOp::Mod => Value::Number(left.to_number() % right.to_number()),
        BinaryOp::Pow => Value::Number(power(left.to_number(), right.to_number())),
    }
}

/// `+` concatenates when either side is a string or object.
fn add(left: &Value, right: &Value) -> Value {
    let concatenates = |v: &Value| v.is_string() || v.is_object();
    if concatenates(left) || concatenates(right) {
        Value::string(format!("{left}{right}"))
    } else {
        Value::Number(left.to_number() + right.to_number())
    }
}

/// Relational comparison. Two strings compare lexicographically; anything
/// else compares numerically, and `NaN` makes every comparison false.
fn compare(left: &Value, right: &Value, accept: fn(Ordering) -> bool) -> Value {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => left.to_number().partial_cmp(&right.to_number()),
    };
    Value::Bool(ordering.is_some_and(accept))
}

/// `**` with JavaScript's edge cases: a `NaN` exponent, or `±1` raised to an
/// infinite power, is `NaN`.
fn power(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}
