//! `JUMP`, `WAIT`, `IF` and `IGNORE`.

use std::time::Duration;

use tracing::trace;

use super::{find_block_end, Control, Invocation};
use crate::errors::{expected_number, invalid_jump, EvalResult};
use crate::interpreter::{Block, Interpreter, Outcome};
use crate::Value;

/// A `+N` or `-N` operand.
pub(super) fn relative_offset(operand: &str) -> Option<i64> {
    let digits = operand.strip_prefix(['+', '-'])?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    Some(if operand.starts_with('-') {
        -magnitude
    } else {
        magnitude
    })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "integral and range-checked before the cast"
)]
fn integral_target(operand: &str, value: f64) -> EvalResult<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(invalid_jump(format!(
            "`{operand}` does not evaluate to an integer"
        )));
    }
    if value.abs() >= 9.007_199_254_740_992e15 {
        return Err(invalid_jump(format!("target `{operand}` is out of range")));
    }
    Ok(value as i64)
}

/// `JUMP [(+|-)N | <expr>]`
///
/// Execution resumes at the instruction after the target, so `JUMP -1`
/// restarts the root list and `JUMP +0` falls through.
pub(super) fn jump(interp: &mut Interpreter, inv: &Invocation<'_>) -> EvalResult<Control> {
    let operand = inv.operand;
    if operand.is_empty() {
        return Ok(Control::Continue);
    }

    let here = i64::try_from(inv.absolute())
        .map_err(|_| invalid_jump("instruction index out of range"))?;
    let target = match relative_offset(operand) {
        Some(offset) => here.saturating_add(offset),
        None => {
            let value = interp.evaluate(inv.scope, operand)?;
            integral_target(operand, value.to_number())?
        }
    };

    if target < -1 {
        return Err(invalid_jump(format!("target {target} is before the start")));
    }
    let resume = usize::try_from(target + 1)
        .map_err(|_| invalid_jump(format!("target {target} is out of range")))?;
    trace!(from = here, target, "jump");
    Ok(Control::Goto(resume))
}

/// Longest honoured delay, the largest signed 32-bit millisecond count.
const MAX_WAIT_MS: f64 = 2_147_483_647.0;

/// `WAIT <milliseconds>`
///
/// Negative, `NaN` and out-of-range delays (including `Infinity`) wait zero.
pub(super) fn wait(interp: &mut Interpreter, inv: &Invocation<'_>) -> EvalResult<Control> {
    let value = interp.evaluate(inv.scope, inv.operand)?;
    let Value::Number(ms) = &value else {
        return Err(expected_number("WAIT", value.type_name()));
    };
    let ms = if (0.0..=MAX_WAIT_MS).contains(ms) { *ms } else { 0.0 };
    let duration = Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::ZERO);
    interp.scheduler.sleep(duration);
    Ok(Control::Continue)
}

/// `IF <expr> ... [ELSE ...] END`
pub(super) fn if_block(interp: &mut Interpreter, inv: &Invocation<'_>) -> EvalResult<Control> {
    let condition = interp.evaluate(inv.scope, inv.operand)?.is_truthy();
    let shape = find_block_end(inv.instructions, inv.index + 1, "IF")?;
    let after_end = Control::Goto(inv.origin + shape.end + 1);

    let (start, stop) = match (condition, shape.else_at) {
        (true, Some(else_at)) => (inv.index + 1, else_at),
        (true, None) => (inv.index + 1, shape.end),
        (false, Some(else_at)) => (else_at + 1, shape.end),
        (false, None) => return Ok(after_end),
    };

    let outcome = {
        let mut scoped = interp.scoped(inv.scope);
        let block = Block {
            instructions: &inv.instructions[start..stop],
            scope: scoped.scope(),
            origin: inv.origin + start,
            nested: true,
        };
        scoped.execute_block(&block)?
    };

    Ok(match outcome {
        Outcome::Completed => after_end,
        Outcome::Escaped(target) => Control::Goto(target),
        Outcome::Returned(value) => Control::Return(value),
    })
}

/// `IGNORE`
pub(super) fn ignore(_: &mut Interpreter, _: &Invocation<'_>) -> EvalResult<Control> {
    Ok(Control::Continue)
}
