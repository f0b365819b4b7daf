//! `FUNC`, `CALL` and `RET`.
//!
//! A function captures its body lines only. Its parameters are bound in a
//! child of the *calling* scope, so a body sees the caller's bindings.

use std::sync::Arc;

use qc_ir::{inline_definition, strip_keyword, CALL_KEYWORD, FUNC_KEYWORD};
use tracing::debug;

use super::{find_block_end, Control, Invocation};
use crate::call_stack::CallFrame;
use crate::environment::{Binding, Lookup, ScopeId};
use crate::errors::{
    malformed_operand, not_callable, return_outside_function, undefined_function, EvalResult,
};
use crate::expr::split_arguments;
use crate::interpreter::{Block, Interpreter, Outcome};
use crate::value::FunctionValue;
use crate::Value;

const ANONYMOUS: &str = "_";

/// The call operand of a `CALL ...` value, if `text` is one.
pub(super) fn strip_call_keyword(text: &str) -> Option<&str> {
    strip_keyword(text, CALL_KEYWORD)
}

/// Build a function from `header` (`<name|_> params...`) whose body starts
/// at local index `body_start`. Named functions are declared in the
/// invocation scope.
///
/// Returns the function and the local index of its `END`.
fn define_function(
    interp: &mut Interpreter,
    inv: &Invocation<'_>,
    header: &str,
    body_start: usize,
) -> EvalResult<(Arc<FunctionValue>, usize)> {
    let mut words = header.split_whitespace();
    let name = words
        .next()
        .ok_or_else(|| malformed_operand(FUNC_KEYWORD, "expected a function name or `_`"))?;
    let params: Vec<String> = words.map(str::to_string).collect();

    let shape = find_block_end(inv.instructions, body_start, FUNC_KEYWORD)?;
    let body = inv.instructions[body_start..shape.end].to_vec();
    let name = (name != ANONYMOUS).then(|| name.to_string());
    let func = Arc::new(FunctionValue::new(name, params, body));

    if let Some(name) = func.name() {
        interp.env.declare(
            inv.scope,
            name,
            Binding::variable(Value::Function(Arc::clone(&func))),
        );
    }
    debug!(function = func.label(), params = func.params().len(), "defined");
    Ok((func, shape.end))
}

/// `FUNC <name|_> [params...] ... END`
pub(super) fn func(interp: &mut Interpreter, inv: &Invocation<'_>) -> EvalResult<Control> {
    let (_, end) = define_function(interp, inv, inv.operand, inv.index + 1)?;
    Ok(Control::Goto(inv.origin + end + 1))
}

/// `CALL <name|(FUNC ...)> [args...]`
pub(super) fn call_instruction(
    interp: &mut Interpreter,
    inv: &Invocation<'_>,
) -> EvalResult<Control> {
    let (_, control) = call_expression(interp, inv, inv.operand)?;
    Ok(control)
}

/// Perform the call described by `operand` (the text after `CALL`).
///
/// Returns the call result and where the enclosing block continues: past
/// the `END` of an inline definition, otherwise the next instruction.
pub(super) fn call_expression(
    interp: &mut Interpreter,
    inv: &Invocation<'_>,
    operand: &str,
) -> EvalResult<(Value, Control)> {
    let tokens = split_arguments(operand)?;
    let Some((&callee, args)) = tokens.split_first() else {
        return Err(malformed_operand(CALL_KEYWORD, "expected a function to call"));
    };

    let (func, control) = match inline_definition(callee) {
        Some(header) => {
            let (func, end) = define_function(interp, inv, header, inv.index + 1)?;
            (func, Control::Goto(inv.origin + end + 1))
        }
        None => (lookup_function(interp, inv.scope, callee)?, Control::Continue),
    };

    let value = interp.invoke(inv.scope, &func, args, inv.line)?;
    Ok((value, control))
}

fn lookup_function(
    interp: &Interpreter,
    scope: ScopeId,
    name: &str,
) -> EvalResult<Arc<FunctionValue>> {
    match interp.env.get(scope, name) {
        Lookup::Found(Binding {
            value: Value::Function(func),
            ..
        }) => Ok(Arc::clone(func)),
        Lookup::Found(binding) => Err(not_callable(name, binding.value.type_name())),
        Lookup::Undeclared => Err(undefined_function(name)),
    }
}

/// `RET [<expr>]`
pub(super) fn ret(interp: &mut Interpreter, inv: &Invocation<'_>) -> EvalResult<Control> {
    if interp.call_stack.is_empty() {
        return Err(return_outside_function());
    }
    let value = if inv.operand.is_empty() {
        Value::Undefined
    } else {
        interp.evaluate(inv.scope, inv.operand)?
    };
    Ok(Control::Return(value))
}

impl Interpreter {
    /// Call `func` from `caller` with argument expressions `args`.
    ///
    /// Arguments are evaluated in the caller's scope; missing ones are
    /// `undefined` and extra ones are ignored. The result is the value of
    /// the first `RET` reached, or `undefined`.
    #[tracing::instrument(level = "debug", skip_all, fields(function = func.label()))]
    pub fn invoke(
        &mut self,
        caller: ScopeId,
        func: &FunctionValue,
        args: &[&str],
        call_line: u32,
    ) -> EvalResult<Value> {
        let values = func
            .params()
            .iter()
            .enumerate()
            .map(|(i, _)| match args.get(i) {
                Some(arg) => self.evaluate(caller, arg),
                None => Ok(Value::Undefined),
            })
            .collect::<EvalResult<Vec<_>>>()?;

        let mut call = self.enter_call(CallFrame {
            name: func.label().to_string(),
            call_line: Some(call_line),
        })?;
        let mut scoped = call.scoped(caller);
        let scope = scoped.scope();
        for (param, value) in func.params().iter().zip(values) {
            scoped
                .env
                .declare(scope, param.as_str(), Binding::variable(value));
        }

        let body = Arc::clone(func.body());
        let result = scoped.execute_block(&Block::root(&body, scope));
        let outcome = result.map_err(|err| scoped.call_stack.attach_backtrace(err))?;

        Ok(match outcome {
            Outcome::Returned(value) => value,
            Outcome::Completed | Outcome::Escaped(_) => Value::Undefined,
        })
    }
}
