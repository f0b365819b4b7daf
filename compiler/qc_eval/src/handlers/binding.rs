//! `DECLARE` and `ASSIGN`.

use super::function::{call_expression, strip_call_keyword};
use super::{Control, Invocation};
use crate::environment::{Binding, Lookup};
use crate::errors::{
    assignment_to_constant, malformed_operand, undefined_constant, undefined_variable, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::Value;

/// Split a leading `*` constant marker off an identifier.
fn constant_marker(target: &str) -> (&str, bool) {
    match target.strip_prefix('*') {
        Some(id) => (id.trim_start(), true),
        None => (target, false),
    }
}

fn is_identifier(id: &str) -> bool {
    !id.is_empty() && !id.contains(char::is_whitespace)
}

/// `DECLARE [*]<id> [= <expr> | = CALL ...]`
pub(super) fn declare(interp: &mut Interpreter, inv: &Invocation<'_>) -> EvalResult<Control> {
    let (target, value_text) = match inv.operand.split_once('=') {
        Some((target, value)) => (target.trim(), value.trim()),
        None => (inv.operand, ""),
    };
    let (id, constant) = constant_marker(target);
    if !is_identifier(id) {
        return Err(malformed_operand(
            "DECLARE",
            format!("`{target}` is not a valid identifier"),
        ));
    }

    let (value, control) = if value_text.is_empty() {
        (Value::Undefined, Control::Continue)
    } else if let Some(call) = strip_call_keyword(value_text) {
        call_expression(interp, inv, call)?
    } else {
        (interp.evaluate(inv.scope, value_text)?, Control::Continue)
    };

    if constant && matches!(value, Value::Undefined) {
        return Err(undefined_constant(id));
    }

    let binding = if constant {
        Binding::constant(value)
    } else {
        Binding::variable(value)
    };
    interp.env.declare(inv.scope, id, binding);
    Ok(control)
}

/// `ASSIGN [*]<id> [=] <expr>`
pub(super) fn assign(interp: &mut Interpreter, inv: &Invocation<'_>) -> EvalResult<Control> {
    let (target, rest) = inv
        .operand
        .split_once(char::is_whitespace)
        .unwrap_or((inv.operand, ""));
    let rest = rest.trim_start();
    let expression = match rest.strip_prefix('=') {
        Some(after) if after.starts_with(char::is_whitespace) => after.trim_start(),
        _ => rest,
    };

    let (id, constant) = constant_marker(target);
    if !is_identifier(id) {
        return Err(malformed_operand("ASSIGN", "expected a variable identifier"));
    }

    match interp.env.get(inv.scope, id) {
        Lookup::Undeclared => return Err(undefined_variable(id)),
        Lookup::Found(binding) if binding.constant => return Err(assignment_to_constant(id)),
        Lookup::Found(_) => {}
    }

    let value = interp.evaluate(inv.scope, expression)?;
    if let Some(binding) = interp.env.resolve_mut(inv.scope, id) {
        binding.value = value;
        binding.constant = constant;
    }
    Ok(Control::Continue)
}
