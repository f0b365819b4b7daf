//! `STD::OUT`.

use super::{Control, Invocation};
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::Value;

/// `STD::OUT [<expr>]`. A bare `STD::OUT` prints an empty line.
pub(super) fn std_out(interp: &mut Interpreter, inv: &Invocation<'_>) -> EvalResult<Control> {
    let value = if inv.operand.is_empty() {
        Value::string("")
    } else {
        interp.evaluate(inv.scope, inv.operand)?
    };
    interp.print_handler.emit(&value);
    Ok(Control::Continue)
}
