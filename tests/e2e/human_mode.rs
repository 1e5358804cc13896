//! Human-mode end-to-end tests.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::fixtures::TestWorkspace;
use crate::common::init_test_logging;

fn msfeedback(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("msfeedback").unwrap();
    cmd.env("RUST_LOG", "off")
        .env_remove("MSFEEDBACK_FORMAT")
        .arg("--config")
        .arg(workspace.config_path());
    cmd
}

#[test]
fn human_report_lists_labels_and_is_not_json() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    let output = msfeedback(&workspace)
        .args(["--no-color", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("==== SYSTEM-INFO ==="))
        .stdout(predicate::str::contains("Device Type"))
        .stdout(predicate::str::contains("Tablet"))
        .stdout(predicate::str::contains("9.9.9"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_err());
    assert!(!stdout.contains('\u{1b}'), "unexpected ANSI escape");
}

#[test]
fn human_report_without_header() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    msfeedback(&workspace)
        .args(["report", "--no-header"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SYSTEM-INFO").not())
        .stdout(predicate::str::contains("Data Type"));
}

#[test]
fn human_error_has_suggestion() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    msfeedback(&workspace)
        .args(["submit", "--title", "Title", "--description", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Feedback description is empty"))
        .stderr(predicate::str::contains("--description"));
}

#[test]
fn quick_start_without_command() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    msfeedback(&workspace)
        .assert()
        .success()
        .stdout(predicate::str::contains("QUICK START"))
        .stdout(predicate::str::contains("msfeedback report"));
}

#[test]
fn completions_for_bash() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    msfeedback(&workspace)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("msfeedback"))
        .stdout(predicate::str::contains("sample-factor"));
}
