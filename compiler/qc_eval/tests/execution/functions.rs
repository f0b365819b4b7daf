use pretty_assertions::assert_eq;
use qc_eval::{ErrorCategory, EvalErrorKind, Value};

use crate::common::{output, run, run_with};

#[test]
fn recursive_factorial() {
    let out = output(&[
        "FUNC fact n",
        "IF n <= 1",
        "RET 1",
        "END",
        "DECLARE sub = CALL fact (n - 1)",
        "RET n * sub",
        "END",
        "DECLARE r = CALL fact 5",
        "STD::OUT r",
    ]);
    assert_eq!(out, vec!["120"]);
}

#[test]
fn ret_inside_if_leaves_function() {
    let out = output(&[
        "FUNC sign n",
        "IF n < 0",
        "RET \"negative\"",
        "ELSE",
        "IF n == 0",
        "RET \"zero\"",
        "END",
        "END",
        "RET \"positive\"",
        "END",
        "DECLARE a = CALL sign -4",
        "DECLARE b = CALL sign 0",
        "DECLARE c = CALL sign 9",
        "STD::OUT a + \" \" + b + \" \" + c",
    ]);
    assert_eq!(out, vec!["negative zero positive"]);
}

#[test]
fn ret_stops_the_body() {
    let out = output(&[
        "FUNC early",
        "STD::OUT \"before\"",
        "RET",
        "STD::OUT \"after\"",
        "END",
        "DECLARE r = CALL early",
        "STD::OUT r",
    ]);
    assert_eq!(out, vec!["before", "undefined"]);
}

#[test]
fn jumps_inside_body_are_body_relative() {
    let out = output(&[
        "IGNORE",
        "IGNORE",
        "FUNC count limit",
        "DECLARE i = 0",
        "ASSIGN i i + 1",
        "IF i < limit",
        "JUMP 0",
        "END",
        "RET i",
        "END",
        "DECLARE r = CALL count 4",
        "STD::OUT r",
    ]);
    assert_eq!(out, vec!["4"]);
}

#[test]
fn jump_past_body_end_completes_call() {
    let out = output(&[
        "FUNC bail",
        "JUMP 10",
        "RET 1",
        "END",
        "DECLARE r = CALL bail",
        "STD::OUT r",
        "STD::OUT \"continued\"",
    ]);
    assert_eq!(out, vec!["undefined", "continued"]);
}

#[test]
fn arguments_are_expressions_in_caller_scope() {
    let out = output(&[
        "FUNC join a b",
        "RET a + b",
        "END",
        "DECLARE x = 2",
        "DECLARE r = CALL join (x * 10) \"!\"",
        "STD::OUT r",
    ]);
    assert_eq!(out, vec!["20!"]);
}

#[test]
fn parameters_do_not_leak() {
    let run = run(&[
        "FUNC f secret",
        "DECLARE local = secret",
        "END",
        "CALL f 1",
    ]);
    run.result.as_ref().unwrap();
    assert_eq!(run.interp.global("secret"), None);
    assert_eq!(run.interp.global("local"), None);
    assert!(run.interp.call_stack().is_empty());
    assert_eq!(run.interp.env().depth(), 1);
}

#[test]
fn functions_are_values() {
    let run = run(&[
        "FUNC original",
        "RET \"called\"",
        "END",
        "DECLARE alias = original",
        "DECLARE r = CALL alias",
        "STD::OUT alias",
        "STD::OUT r",
        "STD::OUT alias === original",
    ]);
    run.result.as_ref().unwrap();
    assert_eq!(run.lines(), vec!["[Function: original]", "called", "true"]);
    assert!(matches!(run.interp.global("alias"), Some(Value::Function(_))));
}

#[test]
fn inline_anonymous_call_as_statement() {
    let out = output(&[
        "CALL (FUNC _ greeting) \"hello\"",
        "STD::OUT greeting",
        "END",
        "STD::OUT \"after\"",
    ]);
    assert_eq!(out, vec!["hello", "after"]);
}

#[test]
fn inline_named_definition_is_declared() {
    let out = output(&[
        "DECLARE first = CALL (FUNC double n) 3",
        "RET n * 2",
        "END",
        "DECLARE second = CALL double first",
        "STD::OUT second",
    ]);
    assert_eq!(out, vec!["12"]);
}

#[test]
fn inline_definition_inside_if() {
    let out = output(&[
        "IF true",
        "CALL (FUNC _ a) 5",
        "STD::OUT a",
        "END",
        "STD::OUT \"after\"",
        "END",
        "STD::OUT \"done\"",
    ]);
    assert_eq!(out, vec!["5", "after", "done"]);
}

#[test]
fn inline_definition_inside_skipped_if() {
    let out = output(&[
        "IF false",
        "CALL (FUNC _ a) 5",
        "STD::OUT a",
        "END",
        "STD::OUT \"inside\"",
        "END",
        "STD::OUT \"done\"",
    ]);
    assert_eq!(out, vec!["done"]);
}

#[test]
fn inline_definition_inside_function() {
    let out = output(&[
        "FUNC outer",
        "DECLARE r = CALL (FUNC _ a) 5",
        "RET a * 2",
        "END",
        "RET r",
        "END",
        "DECLARE v = CALL outer",
        "STD::OUT v",
    ]);
    assert_eq!(out, vec!["10"]);
}

#[test]
fn runaway_recursion_is_range_error() {
    let run = run_with(
        Some(25),
        &["FUNC forever", "CALL forever", "END", "CALL forever"],
    );
    let err = run.result.as_ref().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::CallDepthExceeded { limit: 25 });
    assert_eq!(err.category(), ErrorCategory::Range);
    assert!(run.interp.call_stack().is_empty());
    assert_eq!(run.interp.env().depth(), 1);
}

#[test]
fn deep_recursion_within_default_limit() {
    let out = output(&[
        "FUNC down n",
        "IF n == 0",
        "RET \"bottom\"",
        "END",
        "DECLARE r = CALL down (n - 1)",
        "RET r",
        "END",
        "DECLARE r = CALL down 1500",
        "STD::OUT r",
    ]);
    assert_eq!(out, vec!["bottom"]);
}
