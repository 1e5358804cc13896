//! Integration tests for configuration file handling.

use std::path::PathBuf;

use msfeedback::config::{ConfigFormat, FeedbackConfig, load_config, load_config_from_str};
use msfeedback::error::FeedbackError;
use msfeedback::platform::{Permission, ScreenSize};
use tempfile::TempDir;

#[test]
fn test_yaml_and_toml_agree() {
    let yaml = r"
recipient: support@example.com
with_system_info: true
attachment:
  quality: 65
host:
  screen_size: large
  denied_permissions: [access-network-state]
";
    let toml = r#"
recipient = "support@example.com"
with_system_info = true

[attachment]
quality = 65

[host]
screen_size = "large"
denied_permissions = ["access-network-state"]
"#;
    let from_yaml = load_config_from_str(yaml, ConfigFormat::Yaml).unwrap();
    let from_toml = load_config_from_str(toml, ConfigFormat::Toml).unwrap();
    assert_eq!(from_yaml, from_toml);
    assert_eq!(from_toml.attachment.quality().value(), 65);
    assert_eq!(from_toml.attachment.bounds(), (1280, 1280));
    assert_eq!(from_toml.host.screen_size, Some(ScreenSize::Large));
    assert_eq!(
        from_toml.host.denied_permissions,
        vec![Permission::AccessNetworkState]
    );
}

#[test]
fn test_load_from_file_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("msfeedback.yml");
    std::fs::write(&path, "recipient: qa@example.org\n").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.recipient.as_deref(), Some("qa@example.org"));

    let ini = dir.path().join("msfeedback.ini");
    std::fs::write(&ini, "recipient=qa@example.org").unwrap();
    assert!(matches!(
        load_config(&ini),
        Err(FeedbackError::ConfigParse(_))
    ));
}

#[test]
fn test_missing_file_is_not_found() {
    let err = load_config("/no/such/dir/config.toml").unwrap_err();
    assert!(matches!(err, FeedbackError::ConfigNotFound { .. }));
    assert!(err.is_user_recoverable());
}

#[test]
fn test_invalid_values_rejected() {
    let bad_recipient = load_config_from_str("recipient = \"nobody\"", ConfigFormat::Toml);
    assert!(matches!(bad_recipient, Err(FeedbackError::ConfigParse(_))));

    let zero_width = load_config_from_str("[thumbnail]\nwidth = 0", ConfigFormat::Toml);
    assert!(matches!(zero_width, Err(FeedbackError::ConfigParse(_))));

    let syntax = load_config_from_str("recipient = ", ConfigFormat::Toml);
    assert!(matches!(syntax, Err(FeedbackError::ConfigParse(_))));
}

#[test]
fn test_request_and_paths_from_config() {
    let config = FeedbackConfig {
        recipient: Some("support@example.com".into()),
        log_file: Some(PathBuf::from("/var/tmp/msfeedback/logs.txt")),
        outbox_dir: Some(PathBuf::from("/var/tmp/msfeedback/outbox")),
        ..FeedbackConfig::default()
    };

    let request = config.request(None, false);
    assert_eq!(request.recipient.as_deref(), Some("support@example.com"));
    assert!(!request.with_system_info);

    let overridden = config.request(Some("dev@example.com"), true);
    assert_eq!(overridden.recipient.as_deref(), Some("dev@example.com"));
    assert!(overridden.with_system_info);

    assert_eq!(
        config.app_log().path(),
        PathBuf::from("/var/tmp/msfeedback/logs.txt")
    );
    assert_eq!(
        config.outbox().dir(),
        PathBuf::from("/var/tmp/msfeedback/outbox")
    );
}
