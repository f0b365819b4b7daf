use super::*;
use pretty_assertions::assert_eq;

#[test]
fn outcome_predicates() {
    assert!(FileOutcome::Passed.is_passed());
    assert!(!FileOutcome::Passed.is_failed());
    assert!(FileOutcome::Failed("boom".into()).is_failed());
}

#[test]
fn summary_counts_and_exit_code() {
    let mut summary = RunSummary::new();
    assert_eq!(summary.exit_code(), 2);

    summary.add_file(FileResult::passed(
        PathBuf::from("a.qc"),
        vec!["1".into()],
        Duration::from_millis(3),
    ));
    assert_eq!(summary.exit_code(), 0);

    summary.add_file(FileResult::failed(
        PathBuf::from("b.qc"),
        "SyntaxError: boom".into(),
        vec![],
        Duration::from_millis(1),
    ));
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total(), 2);
    assert!(summary.has_failures());
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn with_globals_attaches_bindings() {
    let result = FileResult::passed(PathBuf::from("a.qc"), vec![], Duration::ZERO)
        .with_globals(vec![("x".into(), "1".into())]);
    assert_eq!(result.globals, vec![("x".to_string(), "1".to_string())]);
}
