//! End-to-end tests for the `lsbridge` binary.
//!
//! Every run gets a fresh HOME so no user config leaks in, and none of these
//! tests needs a live backend.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lsbridge(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lsbridge"))
        .args(args)
        .env("HOME", home)
        .env_remove("LSBRIDGE_BACKEND_BASE_URL")
        .env_remove("LSBRIDGE_BACKEND_API_PREFIX")
        .env_remove("LSBRIDGE_LOGGING_LEVEL")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run lsbridge binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ---------------------------------------------------------------------------
// list-tools
// ---------------------------------------------------------------------------

#[test]
fn list_tools_prints_the_catalog() {
    let home = tempdir().unwrap();
    let output = lsbridge(home.path(), &["list-tools"]);
    assert!(output.status.success());

    let tools: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "definitions_in_file",
            "find_definition",
            "find_references",
            "list_files",
            "read_source_code"
        ]
    );
}

// ---------------------------------------------------------------------------
// call
// ---------------------------------------------------------------------------

#[test]
fn call_unknown_tool_exits_with_error_block() {
    let home = tempdir().unwrap();
    let output = lsbridge(home.path(), &["call", "rename_symbol"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error [tool_not_found]"));
}

#[test]
fn call_with_missing_argument_is_invalid_input() {
    let home = tempdir().unwrap();
    let output = lsbridge(home.path(), &["call", "definitions_in_file", "--args", "{}"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output).trim(),
        "Error [invalid_input]: Missing required arguments: file_path"
    );
}

#[test]
fn call_against_unreachable_backend_reports_unavailable() {
    let home = tempdir().unwrap();
    let output = lsbridge(
        home.path(),
        &["call", "list_files", "--backend-url", "http://127.0.0.1:9"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error [backend_unavailable]"));
}

#[test]
fn call_rejects_malformed_args_json() {
    let home = tempdir().unwrap();
    let output = lsbridge(home.path(), &["call", "list_files", "--args", "{glob"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--args must be valid JSON"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn missing_explicit_config_file_fails() {
    let home = tempdir().unwrap();
    let absent = home.path().join("nope.toml");
    let output = lsbridge(
        home.path(),
        &["--config", absent.to_str().unwrap(), "list-tools"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config file not found"));
}

#[test]
fn global_config_file_is_picked_up_from_home() {
    let home = tempdir().unwrap();
    let dir = home.path().join(".lsbridge");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[backend]\nbase_url = \"ftp://not-http\"\n",
    )
    .unwrap();

    let output = lsbridge(home.path(), &["list-tools"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("backend.base_url"));
}

#[test]
fn invalid_backend_url_flag_is_rejected() {
    let home = tempdir().unwrap();
    let output = lsbridge(home.path(), &["--backend-url", "not a url", "list-tools"]);
    assert!(!output.status.success());
}
