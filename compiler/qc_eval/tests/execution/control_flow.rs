use std::time::Duration;

use pretty_assertions::assert_eq;
use qc_eval::Value;

use crate::common::{output, run};

#[test]
fn region_outside_markers_is_ignored() {
    assert_eq!(output(&["STD::OUT \"inside\""]), vec!["inside"]);
}

#[test]
fn countdown_loop() {
    let out = output(&[
        "DECLARE n = 3",
        "IF n > 0",
        "STD::OUT n",
        "ASSIGN n n - 1",
        "JUMP 0",
        "END",
        "STD::OUT \"liftoff\"",
    ]);
    assert_eq!(out, vec!["3", "2", "1", "liftoff"]);
}

#[test]
fn loop_with_absolute_jump_back() {
    let out = output(&[
        "DECLARE total = 0",
        "DECLARE i = 1",
        "ASSIGN total total + i",
        "ASSIGN i i + 1",
        "IF i <= 4",
        "JUMP 1",
        "END",
        "STD::OUT total",
    ]);
    assert_eq!(out, vec!["10"]);
}

#[test]
fn else_branch_and_nested_if_mutation() {
    let run = run(&[
        "DECLARE grade = \"\"",
        "DECLARE score = 72",
        "IF score >= 90",
        "ASSIGN grade \"A\"",
        "ELSE",
        "IF score >= 70",
        "ASSIGN grade \"C\"",
        "ELSE",
        "ASSIGN grade \"F\"",
        "END",
        "END",
        "STD::OUT grade",
    ]);
    run.result.as_ref().unwrap();
    assert_eq!(run.lines(), vec!["C"]);
    assert_eq!(run.interp.global("grade"), Some(Value::from("C")));
    assert_eq!(run.interp.env().depth(), 1);
}

#[test]
fn branch_local_declarations_shadow_then_vanish() {
    let out = output(&[
        "DECLARE x = \"outer\"",
        "IF true",
        "DECLARE x = \"inner\"",
        "STD::OUT x",
        "END",
        "STD::OUT x",
    ]);
    assert_eq!(out, vec!["inner", "outer"]);
}

#[test]
fn escape_jump_resumes_outer_context() {
    let out = output(&[
        "IGNORE",
        "IF true",
        "IF true",
        "JUMP 6",
        "END",
        "STD::OUT \"not printed\"",
        "END",
        "STD::OUT \"escaped\"",
    ]);
    assert_eq!(out, vec!["escaped"]);
}

#[test]
fn waits_go_through_scheduler() {
    let run = run(&[
        "DECLARE delay = 100",
        "WAIT delay",
        "WAIT delay * 2",
        "WAIT 0",
        "STD::OUT \"woke\"",
    ]);
    run.result.as_ref().unwrap();
    assert_eq!(run.lines(), vec!["woke"]);
    assert_eq!(run.scheduler.total_wait(), Duration::from_millis(300));
    assert_eq!(run.scheduler.waits().len(), 3);
}

#[test]
fn operators_in_scripts() {
    let out = output(&[
        "DECLARE a = 7",
        "DECLARE b = 2",
        "STD::OUT a % b",
        "STD::OUT a / b",
        "STD::OUT (a + b) * 2",
        "STD::OUT a > b && \"yes\"",
        "STD::OUT !a",
        "STD::OUT a == \"7\"",
        "STD::OUT a === \"7\"",
        "STD::OUT 3 of 4",
    ]);
    assert_eq!(
        out,
        vec!["1", "3.5", "18", "yes", "false", "true", "false", "12"]
    );
}
