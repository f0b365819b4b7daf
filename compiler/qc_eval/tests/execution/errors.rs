use pretty_assertions::assert_eq;
use qc_diagnostic::ErrorCode;
use qc_eval::{ErrorCategory, EvalErrorKind};

use crate::common::{run, script};

#[test]
fn categories_follow_error_codes() {
    let cases: [(&[&str], ErrorCategory, ErrorCode); 6] = [
        (&["BOGUS"], ErrorCategory::Syntax, ErrorCode::E1001),
        (&["RET 1"], ErrorCategory::Syntax, ErrorCode::E1006),
        (&["STD::OUT nope"], ErrorCategory::Reference, ErrorCode::E2001),
        (&["CALL nope"], ErrorCategory::Reference, ErrorCode::E2002),
        (
            &["DECLARE *k = 1", "ASSIGN k 2"],
            ErrorCategory::Type,
            ErrorCode::E3001,
        ),
        (&["WAIT true"], ErrorCategory::Type, ErrorCode::E3004),
    ];
    for (lines, category, code) in cases {
        let err = run(lines).error();
        assert_eq!(err.category(), category, "{lines:?}");
        assert_eq!(err.code(), code, "{lines:?}");
    }
}

#[test]
fn display_is_category_prefixed() {
    let err = run(&["STD::OUT ghost"]).error();
    assert!(err.to_string().starts_with("ReferenceError: "), "{err}");
    assert!(err.to_string().contains("ghost"), "{err}");
}

#[test]
fn line_numbers_are_source_lines() {
    // Title line and marker occupy lines 1 and 2.
    let err = run(&["IGNORE", "", "// comment", "STD::OUT ghost"]).error();
    assert_eq!(err.line, Some(6));
}

#[test]
fn error_stops_execution() {
    let run = run(&["STD::OUT 1", "STD::OUT ghost", "STD::OUT 2"]);
    assert_eq!(run.lines(), vec!["1"]);
    assert!(run.result.is_err());
}

#[test]
fn backtrace_lists_active_calls_innermost_first() {
    let run = run(&[
        "FUNC inner",
        "STD::OUT ghost",
        "END",
        "FUNC outer",
        "CALL inner",
        "END",
        "CALL outer",
    ]);
    let err = run.result.as_ref().unwrap_err();
    let names: Vec<&str> = err
        .backtrace
        .as_ref()
        .unwrap()
        .frames()
        .iter()
        .map(|frame| frame.name.as_str())
        .collect();
    assert_eq!(names, vec!["inner", "outer"]);
    assert_eq!(err.line, Some(4));
    assert!(run.interp.call_stack().is_empty());
}

#[test]
fn error_inside_call_releases_frames_and_scopes() {
    let mut run = run(&[
        "FUNC broken",
        "IF true",
        "RET missing",
        "END",
        "END",
        "CALL broken",
    ]);
    assert!(run.result.is_err());
    assert!(run.interp.call_stack().is_empty());
    assert_eq!(run.interp.env().depth(), 1);

    // The interpreter stays usable after a failed run.
    run.interp
        .run_source(&script(&["CALL (FUNC _)", "STD::OUT \"ok\"", "END"]))
        .unwrap();
    assert_eq!(run.output.lines(), vec!["ok"]);
}

#[test]
fn diagnostic_carries_code_line_and_help() {
    let err = run(&["ASSIGN undeclared 1"]).error();
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.location.line, Some(3));
    assert!(!diag.help.is_empty());
    assert!(diag.to_string().starts_with("error[E2001]: ReferenceError: "));
}

#[test]
fn unknown_keyword_lists_close_keywords() {
    let err = run(&["STD::ERR \"x\""]).error();
    match err.kind {
        EvalErrorKind::UnknownKeyword { candidates, .. } => {
            assert_eq!(candidates, vec!["STD::OUT".to_string()]);
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}

#[test]
fn std_members_are_not_reachable() {
    assert_eq!(
        crate::common::output(&["STD::OUT std"]),
        vec!["[object std]"]
    );
    let err = run(&["STD::OUT std.input"]).error();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "std.input".to_string()
        }
    );
    let err = run(&["STD::OUT std.output(\"hi\")"]).error();
    assert_eq!(err.category(), ErrorCategory::Reference);
}
