//! Robot-mode end-to-end tests.

use serde_json::{Value, json};

use crate::common::cli::CliRunner;
use crate::common::fixtures::{RECIPIENT, TestWorkspace};
use crate::common::init_test_logging;

#[test]
fn robot_quick_start_outputs_json() {
    init_test_logging();
    let result = CliRunner::new().run(&["--robot"]);
    result
        .assert_success()
        .assert_json_field("/tool", &json!("msfeedback"))
        .assert_json_field_exists("/commands")
        .assert_json_field_exists("/output_modes");
}

#[test]
fn robot_format_flag_outputs_json() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    let result = CliRunner::new()
        .with_config(&workspace.config_path())
        .run(&["version", "--format=json"]);
    result
        .assert_success()
        .assert_json_field("/version", &json!(env!("CARGO_PKG_VERSION")));
}

#[test]
fn robot_sample_factor() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    CliRunner::new()
        .with_config(&workspace.config_path())
        .run_robot(&["sample-factor", "4000", "3000", "600", "600"])
        .assert_success()
        .assert_json_field("/sample_factor", &json!(4))
        .assert_json_field("/source_width", &json!(4000));
}

#[test]
fn robot_report_has_every_field() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    let result = CliRunner::new()
        .with_config(&workspace.config_path())
        .run_robot(&["report"]);
    result
        .assert_success()
        .assert_json_field("/app_version", &json!("9.9.9"))
        .assert_json_field("/device_class", &json!("Tablet"));

    let json = result.json();
    for key in [
        "device_name",
        "sdk_version",
        "language",
        "time_zone",
        "cpu_abi",
        "total_storage",
        "free_storage",
        "network_type",
    ] {
        let value = json.get(key).and_then(Value::as_str);
        assert!(
            value.is_some_and(|v| !v.is_empty()),
            "{key} missing or empty in {json}"
        );
    }
    assert_eq!(json["cpu_abi"], json!(std::env::consts::ARCH));
}

#[test]
fn robot_config_reports_source() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    let config_path = workspace.config_path();
    CliRunner::new()
        .with_config(&config_path)
        .run_robot(&["config"])
        .assert_success()
        .assert_json_field("/config/recipient", &json!(RECIPIENT))
        .assert_json_field("/source", &json!(config_path.display().to_string()));
}

#[test]
fn robot_unresolvable_reference_is_null_path() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    CliRunner::new()
        .with_config(&workspace.config_path())
        .run_robot(&["resolve", "https://example.com/cat.png"])
        .assert_success()
        .assert_json_field("/kind", &json!("unsupported"))
        .assert_json_field("/path", &Value::Null);
}

#[test]
fn robot_error_goes_to_stderr_as_json() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    let result = CliRunner::new()
        .with_config(&workspace.config_path())
        .run_robot(&["submit", "--title", "", "--description", "Body"]);
    result.assert_failure();
    assert!(result.stdout.trim().is_empty(), "stdout: {}", result.stdout);

    let error = result.error_json();
    assert_eq!(error["error"], json!(true));
    assert_eq!(error["message"], json!("Feedback title is empty"));
    assert_eq!(error["recoverable"], json!(true));
    assert!(error["suggestion"].is_string());
}

#[test]
fn robot_missing_config_file_fails() {
    init_test_logging();
    let workspace = TestWorkspace::new();
    let result = CliRunner::new()
        .with_config(&workspace.path().join("absent.toml"))
        .run_robot(&["report"]);
    result.assert_failure();
    let error = result.error_json();
    assert!(
        error["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Configuration file not found")),
        "{error}"
    );
}
