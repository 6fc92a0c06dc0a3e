//! Tests for configuration loading.

use octa::{OctaConfig, OctaErrorKind};
use std::io::Write;

#[test]
fn test_defaults_from_bundled_config() {
    let config = OctaConfig::from_toml_str("").unwrap();

    assert_eq!(config.token(), &None);
    assert!(!config.catch_errors());
    assert!(*config.show_banner());
    assert!(*config.privileged_intents());
    assert_eq!(config.log_level(), "info");
    assert!(!config.json_logs());
    assert_eq!(config, OctaConfig::default());
}

#[test]
fn test_toml_overrides_defaults() {
    let config = OctaConfig::from_toml_str(
        r#"
        token = "abc.def.ghi"
        catch_errors = true
        show_banner = false
        log_level = "octa_core=debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.token().as_deref(), Some("abc.def.ghi"));
    assert!(*config.catch_errors());
    assert!(!config.show_banner());
    assert!(*config.privileged_intents());
    assert_eq!(config.log_level(), "octa_core=debug");
}

#[test]
fn test_mistyped_key_is_config_error() {
    let err = OctaConfig::from_toml_str("catch_errors = \"sometimes\"").unwrap_err();
    assert!(matches!(err.kind(), OctaErrorKind::Config(_)));
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join(format!("octa_config_test_{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "json_logs = true\nprivileged_intents = false").unwrap();
    drop(file);

    let config = OctaConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(*config.json_logs());
    assert!(!config.privileged_intents());
    assert!(*config.show_banner());
}

#[test]
fn test_missing_file_is_config_error() {
    let err = OctaConfig::from_file("/nonexistent/octa.toml").unwrap_err();
    assert!(matches!(err.kind(), OctaErrorKind::Config(_)));
}

#[test]
fn test_token_resolution() {
    let configured = OctaConfig::default().with_token("configured");
    assert_eq!(
        configured.resolve_token(Some("fallback".into())).unwrap(),
        "configured"
    );

    let blank = OctaConfig::default().with_token("   ");
    assert_eq!(blank.resolve_token(Some("fallback".into())).unwrap(), "fallback");

    let err = OctaConfig::default().resolve_token(None).unwrap_err();
    assert_eq!(err.key, Some("token"));
    assert!(err.message.contains("Missing bot token"));
    assert!(OctaConfig::default().resolve_token(Some(String::new())).is_err());
}
