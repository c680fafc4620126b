//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! resolving it into client settings.

use std::io::Write;

use kineticpanel_domain::{ApiNamespace, ProviderConfig};
use kineticpanel_infra::{config, ClientConfig, PanelClient};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_toml_file_and_resolve() {
    let path = write_config(
        r#"
host = "https://kineticpanel.net/"
api_key = "ptlc_integration_key"
use_application = false
debug = true
"#,
        "toml",
    );

    let loaded = config::load_from_file(Some(path.clone())).expect("config should load");
    let resolved = config::resolve(loaded).expect("config should resolve");

    assert_eq!(resolved.host, "https://kineticpanel.net/");
    assert_eq!(resolved.api_key, "ptlc_integration_key");
    assert_eq!(resolved.namespace, ApiNamespace::Client);
    assert!(resolved.debug);
    assert!(resolved.warnings.is_empty(), "default host must not warn");

    let client = PanelClient::new(ClientConfig::from(&resolved)).expect("client should build");
    assert_eq!(client.base_url(), "https://kineticpanel.net/api/client");

    // Cleanup
    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "host": "https://games.example.org",
            "api_key": "ptla_integration_key"
        }"#,
        "json",
    );

    let loaded = config::load_from_file(Some(path.clone())).expect("config should load");
    assert_eq!(
        loaded,
        ProviderConfig {
            host: Some("https://games.example.org".into()),
            api_key: Some("ptla_integration_key".into()),
            use_application: None,
            debug: None,
        }
    );

    let resolved = config::resolve(loaded).expect("config should resolve");
    assert_eq!(resolved.warnings.len(), 1);
    assert!(resolved.warnings[0].contains("games.example.org"));

    // Cleanup
    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_toml_is_rejected() {
    let path = write_config("host = ", "toml");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err(), "Should fail with invalid TOML");

    // Cleanup
    std::fs::remove_file(path).ok();
}
