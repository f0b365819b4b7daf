use super::*;
use crate::test::FileOutcome;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const BEGIN: &str = "%-- BEGIN EXECUTION --%";

fn write_script(dir: &Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("{name}\n{BEGIN}\n{}\n", lines.join("\n"))).unwrap();
    path
}

fn no_wait() -> RunnerConfig {
    RunnerConfig {
        wait: false,
        ..RunnerConfig::default()
    }
}

#[test]
fn passing_script_captures_output_and_globals() {
    let dir = tempdir().unwrap();
    let path = write_script(dir.path(), "ok.qc", &["DECLARE x = 40 + 2", "STD::OUT x"]);

    let result = run_file(&path, &no_wait());
    assert_eq!(result.outcome, FileOutcome::Passed);
    assert_eq!(result.output, vec!["42"]);
    assert_eq!(result.globals, vec![("x".to_string(), "42".to_string())]);
}

#[test]
fn failing_script_reports_kind_message_and_line() {
    let dir = tempdir().unwrap();
    let path = write_script(dir.path(), "bad.qc", &["STD::OUT 1", "STD::OUT ghost"]);

    let result = run_file(&path, &no_wait());
    let FileOutcome::Failed(message) = &result.outcome else {
        panic!("expected failure, got {:?}", result.outcome);
    };
    assert!(message.starts_with("ReferenceError: "), "{message}");
    assert!(message.ends_with("(line 4)"), "{message}");
    assert_eq!(result.output, vec!["1"]);
}

#[test]
fn unreadable_file_is_a_failure() {
    let dir = tempdir().unwrap();
    let result = run_file(&dir.path().join("missing.qc"), &no_wait());
    assert!(result.outcome.is_failed());
}

#[test]
fn no_wait_skips_sleeping() {
    let dir = tempdir().unwrap();
    let path = write_script(dir.path(), "slow.qc", &["WAIT 60000", "STD::OUT \"done\""]);

    let result = run_file(&path, &no_wait());
    assert!(result.outcome.is_passed());
    assert!(result.duration.as_secs() < 60);
}

#[test]
fn batch_keeps_going_after_failures() {
    let dir = tempdir().unwrap();
    write_script(dir.path(), "a.qc", &["STD::OUT \"a\""]);
    write_script(dir.path(), "b.qc", &["RET 1"]);
    write_script(dir.path(), "c.qc", &["STD::OUT \"c\""]);

    for parallel in [true, false] {
        let runner = BatchRunner::with_config(RunnerConfig {
            parallel,
            ..no_wait()
        });
        let summary = runner.run(dir.path());
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_code(), 1);
        let names: Vec<_> = summary
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.qc", "b.qc", "c.qc"]);
    }
}

#[test]
fn filter_limits_scripts() {
    let dir = tempdir().unwrap();
    write_script(dir.path(), "loops.qc", &["IGNORE"]);
    write_script(dir.path(), "functions.qc", &["IGNORE"]);

    let runner = BatchRunner::with_config(RunnerConfig {
        filter: Some("loop".to_string()),
        ..no_wait()
    });
    let summary = runner.run(dir.path());
    assert_eq!(summary.total(), 1);
    assert!(summary.files[0].path.ends_with("loops.qc"));
}

#[test]
fn empty_directory_has_no_scripts() {
    let dir = tempdir().unwrap();
    let summary = BatchRunner::new().run(dir.path());
    assert_eq!(summary.total(), 0);
    assert_eq!(summary.exit_code(), 2);
}
