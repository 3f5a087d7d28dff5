//! Integration tests for layered configuration and the run context

use super::test_utils::write_json;
use confex::cli::{ExportRequest, RunContext};
use confex::config::ConfigLoader;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_workspace_config_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("confex.toml"),
        r#"
[snapshot]
path = "dumps/live.json"
factory_defaults_path = "dumps/factory.toml"

[document]
path = "out/config.xml"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.snapshot.path, PathBuf::from("dumps/live.json"));
    assert_eq!(config.snapshot.factory_defaults_path, PathBuf::from("dumps/factory.toml"));
    assert_eq!(config.snapshot.root_key, "system");
    assert_eq!(
        config.document_path(temp_dir.path()),
        temp_dir.path().join("out/config.xml")
    );
}

#[test]
fn test_load_from_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::load_from_file(&temp_dir.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}

#[test]
fn test_run_context_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("custom.toml");
    std::fs::write(&config_file, "[snapshot]\npath = \"live.yaml\"\n").unwrap();

    let result = RunContext::new(temp_dir.path().to_path_buf(), Some(config_file));
    let err = result.err().unwrap();
    assert!(err.to_string().contains("must end in .json or .toml"));
}

#[test]
fn test_run_context_uses_configured_paths() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("confex.toml"),
        r#"
[snapshot]
path = "dumps/live.json"
factory_defaults_path = "dumps/factory.json"

[document]
path = "out/config.xml"
"#,
    )
    .unwrap();
    write_json(
        &temp_dir.path().join("dumps/live.json"),
        &json!({"system": {
            "default": {"web": {"cookie": {"lifetime": 3600, "path": "/"}}}
        }}),
    );
    write_json(
        &temp_dir.path().join("dumps/factory.json"),
        &json!({"data": {
            "default": {"web": {"cookie": {"lifetime": 3600}}}
        }}),
    );

    let context = RunContext::new(temp_dir.path().to_path_buf(), None).unwrap();
    let output = context
        .execute(&ExportRequest {
            scopes: "default".to_string(),
            paths: "web/cookie".to_string(),
            ..ExportRequest::default()
        })
        .unwrap();

    let document_path = temp_dir.path().join("out/config.xml");
    assert_eq!(
        output,
        format!("Exported 1 value(s) to {}", document_path.display())
    );
    let written = std::fs::read_to_string(&document_path).unwrap();
    assert!(written.contains("<path>/</path>"));
    assert!(!written.contains("<lifetime>"));
}
