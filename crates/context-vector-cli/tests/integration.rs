//! End-to-end tests for the ctxvec binary

use std::io::Write;
use std::process::Command;

const VALID_JSON: &str = r#"{"schemaVersion":1,"contextVector":{"semanticContext":{"coding":0.8},"temporalContext":{"recentActivityTimestamp":1700000000,"interactionFrequency":3.2},"userPreferenceContext":{"verbosity":0.4,"detailLevel":0.6},"inference":{"activity":0.9},"affect":{"valence":0.5,"arousal":0.2,"focus":"focused"}}}"#;

fn snapshot_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn ctxvec(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ctxvec"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn test_validate_valid_snapshot_exits_zero() {
    let file = snapshot_file(".json", VALID_JSON);
    let output = ctxvec(&["validate", "--input", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("VALID"));
}

#[test]
fn test_validate_bored_focus_exits_one() {
    let file = snapshot_file(".json", &VALID_JSON.replace("\"focused\"", "\"bored\""));
    let output = ctxvec(&[
        "validate",
        "--input",
        file.path().to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["violations"][0]["field_path"], "affect.focus");
}

#[test]
fn test_convert_round_trips_through_yaml() {
    let json_file = snapshot_file(".json", VALID_JSON);
    let output = ctxvec(&["convert", "--input", json_file.path().to_str().unwrap(), "--to", "yaml"]);
    assert_eq!(output.status.code(), Some(0));

    let yaml_file = snapshot_file(".yaml", &String::from_utf8(output.stdout).unwrap());
    let output = ctxvec(&["convert", "--input", yaml_file.path().to_str().unwrap(), "--to", "json"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim_end(), VALID_JSON);
}

#[test]
fn test_unsupported_extension_exits_three() {
    let file = snapshot_file(".txt", VALID_JSON);
    let output = ctxvec(&["fingerprint", "--input", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported file format"));
}

#[test]
fn test_missing_file_exits_four() {
    let output = ctxvec(&["fingerprint", "--input", "/nonexistent/snap.json"]);
    assert_eq!(output.status.code(), Some(4));
}
