//! Integration tests running the confex binary.

use super::test_utils::write_json;
use serde_json::json;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(workspace: &Path, args: &[&str]) -> Output {
    let config_home = workspace.join(".config-home");
    std::fs::create_dir_all(&config_home).unwrap();

    let bin = env!("CARGO_BIN_EXE_confex");
    Command::new(bin)
        .env("XDG_CONFIG_HOME", config_home.as_os_str())
        .env("HOME", config_home.as_os_str())
        .env_remove("CONFEX_LOG")
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .output()
        .unwrap()
}

fn write_inputs(workspace: &Path) {
    write_json(
        &workspace.join("var/config/snapshot.json"),
        &json!({"system": {
            "default": {
                "general": {"locale": {"code": "en_US", "timezone": "UTC"}},
                "trans_email": {
                    "ident_sales": {"email": "sales@example.com"},
                    "ident_support": {"email": "owner@example.com"}
                }
            },
            "websites": {
                "admin": {"general": {"locale": {"code": "xx_XX"}}},
                "base": {"general": {"locale": {"code": "en_US", "timezone": "Europe/Paris"}}}
            },
            "stores": {
                "fr": {"trans_email": {"ident_sales": {"email": "ventes@example.com"}}}
            }
        }}),
    );
    write_json(
        &workspace.join("var/config/factory_defaults.json"),
        &json!({"data": {
            "default": {
                "general": {"locale": {"timezone": "UTC"}},
                "trans_email": {"ident_support": {"email": "owner@example.com"}}
            }
        }}),
    );
}

#[test]
fn test_export_writes_config_document() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path();
    write_inputs(workspace);

    let output = run(workspace, &["all", "general/locale,trans_email/*/email"]);
    assert!(
        output.status.success(),
        "confex should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );

    let document_path = workspace.join("var/config/config.xml");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("Exported 4 value(s) to {}", document_path.display())
    );

    let written = std::fs::read_to_string(&document_path).unwrap();
    assert!(written.starts_with("<?xml version=\"1.0\"?>"));
    assert!(written.contains("<code>en_US</code>"));
    assert!(written.contains("<timezone>Europe/Paris</timezone>"));
    assert!(written.contains("<email>sales@example.com</email>"));
    assert!(written.contains("<email>ventes@example.com</email>"));
    assert!(!written.contains("<timezone>UTC</timezone>"));
    assert!(!written.contains("owner@example.com"));
    assert!(!written.contains("xx_XX"));
    assert!(!written.contains("<admin>"));
}

#[test]
fn test_dry_run_prints_document() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path();
    write_inputs(workspace);

    let output = run(
        workspace,
        &["--dry-run", "--keep-factory-defaults", "default", "general"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<timezone>UTC</timezone>"));
    assert!(stdout.contains("<code>en_US</code>"));
    assert!(!workspace.join("var/config/config.xml").exists());
}

#[test]
fn test_invalid_scope_exits_cleanly_with_message() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path();
    write_inputs(workspace);

    let output = run(workspace, &["groups", "general"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Scope \"groups\" is not valid. Accepted values: all|default|websites|stores"
    );
    assert!(!workspace.join("var/config/config.xml").exists());
}

#[test]
fn test_empty_paths_exit_cleanly_with_message() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path();
    write_inputs(workspace);

    let output = run(workspace, &["all", " , "]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No valid paths provided, exiting"
    );
}

#[test]
fn test_invalid_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path();
    write_inputs(workspace);

    let output = run(workspace, &["all", "general/locale/code/extra"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid path 'general/locale/code/extra'"));
    assert!(!workspace.join("var/config/config.xml").exists());
}

#[test]
fn test_missing_snapshot_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["all", "general"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("file not found"));
}

#[test]
fn test_snapshot_flag_overrides_config() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path();
    let snapshot = workspace.join("elsewhere/live.json");
    write_json(
        &snapshot,
        &json!({"default": {"web": {"cookie": {"lifetime": 7200}}}}),
    );
    let document = workspace.join("out.xml");

    let output = run(
        workspace,
        &[
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--document",
            document.to_str().unwrap(),
            "default",
            "web",
        ],
    );
    assert!(
        output.status.success(),
        "stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let written = std::fs::read_to_string(&document).unwrap();
    assert!(written.contains("<lifetime>7200</lifetime>"));
}
