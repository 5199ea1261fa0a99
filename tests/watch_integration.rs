//! Integration tests for the watch pipeline
//!
//! These tests run the flatwatch binary end to end:
//! - Flattening a stream of events into JSON lines
//! - Watch-event wrapper handling and event-kind filtering
//! - Resource-kind filtering
//! - Raw passthrough mode
//! - Error isolation for undecodable documents

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Helper to get the flatwatch binary path
fn flatwatch_binary() -> PathBuf {
    // When running tests, the binary is in target/debug/flatwatch
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("flatwatch");
    path
}

/// Helper to create an isolated config dir so user config never leaks in
fn isolated_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("flatwatch.yaml"),
        "flatten:\n  enabled: true\n  separator: underscore\n  prefix: flatwatch\nlog_level: warn\n",
    )
    .unwrap();
    dir
}

/// Helper to run flatwatch with the given stdin contents
fn run_flatwatch(dir: &Path, args: &[&str], stdin_data: &str) -> std::process::Output {
    let mut child = Command::new(flatwatch_binary())
        .env("FLATWATCH_DIR", dir)
        .env_remove("FLATWATCH_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn flatwatch");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin_data.as_bytes())
        .unwrap();

    child.wait_with_output().expect("Failed to wait for flatwatch")
}

fn stdout_lines(output: &std::process::Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("Output line is not valid JSON"))
        .collect()
}

#[test]
fn test_watch_flattens_each_event() {
    let dir = isolated_dir();
    let input = "{\"a\": true, \"b\": \"x\", \"c\": 3}\n{\"a\": {\"b\": \"y\"}}\n";

    let output = run_flatwatch(dir.path(), &["watch", "--prefix", "p"], input);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], serde_json::json!({"p_a": "true", "p_b": "x", "p_c": "3.000000"}));
    assert_eq!(lines[1], serde_json::json!({"p_a_b": "y"}));
}

#[test]
fn test_watch_arrays_get_length_markers() {
    let dir = isolated_dir();
    let input = "{\"a\": [\"x\", \"y\"]}\n";

    let output = run_flatwatch(dir.path(), &["watch", "--prefix", "p"], input);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], serde_json::json!({"p_a#": "2", "p_a0": "x", "p_a1": "y"}));
}

#[test]
fn test_watch_drops_modified_events_by_default() {
    let dir = isolated_dir();
    let input = concat!(
        "{\"type\": \"ADDED\", \"object\": {\"n\": \"a\"}}\n",
        "{\"type\": \"MODIFIED\", \"object\": {\"n\": \"b\"}}\n",
        "{\"type\": \"DELETED\", \"object\": {\"n\": \"c\"}}\n",
    );

    let output = run_flatwatch(dir.path(), &["watch", "--prefix", "p"], input);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], serde_json::json!({"p_n": "a"}));
    assert_eq!(lines[1], serde_json::json!({"p_n": "c"}));
}

#[test]
fn test_watch_events_flag_includes_modified() {
    let dir = isolated_dir();
    let input = "{\"type\": \"MODIFIED\", \"object\": {\"n\": \"b\"}}\n";

    let output = run_flatwatch(
        dir.path(),
        &["watch", "--prefix", "p", "--events", "added,modified"],
        input,
    );

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], serde_json::json!({"p_n": "b"}));
}

#[test]
fn test_watch_kind_filter() {
    let dir = isolated_dir();
    let input = concat!(
        "{\"kind\": \"Pod\", \"name\": \"web\"}\n",
        "{\"kind\": \"Service\", \"name\": \"svc\"}\n",
    );

    let output = run_flatwatch(dir.path(), &["watch", "--prefix", "p", "pod"], input);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["p_kind"], "Pod");
}

#[test]
fn test_watch_no_flatten_passthrough() {
    let dir = isolated_dir();
    let input = "{\"a\": {\"b\": [1, 2]}}\n";

    let output = run_flatwatch(dir.path(), &["watch", "--no-flatten"], input);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], serde_json::json!({"a": {"b": [1, 2]}}));
    // One compact line, not pretty-printed
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn test_watch_skips_undecodable_documents() {
    let dir = isolated_dir();
    let input = "{\"a\": 1}\nthis is not json\n{\"b\": 2}\n";

    let output = run_flatwatch(dir.path(), &["watch", "--prefix", "p"], input);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], serde_json::json!({"p_a": "1.000000"}));
    assert_eq!(lines[1], serde_json::json!({"p_b": "2.000000"}));
}

#[test]
fn test_watch_null_fields_are_omitted() {
    let dir = isolated_dir();
    let input = "{\"a\": null, \"b\": \"x\"}\n";

    let output = run_flatwatch(dir.path(), &["watch", "--prefix", "p"], input);

    let lines = stdout_lines(&output);
    assert_eq!(lines[0], serde_json::json!({"p_b": "x"}));
}

#[test]
fn test_watch_dot_separator() {
    let dir = isolated_dir();
    let input = "{\"a\": {\"b\": \"y\"}}\n";

    let output = run_flatwatch(
        dir.path(),
        &["watch", "--prefix", "p", "--separator", "dot"],
        input,
    );

    let lines = stdout_lines(&output);
    assert_eq!(lines[0], serde_json::json!({"p.a.b": "y"}));
}

#[test]
fn test_flatten_command_reads_file() {
    let dir = isolated_dir();
    let doc = dir.path().join("pod.json");
    fs::write(&doc, "{\"spec\": {\"replicas\": 2}}").unwrap();

    let output = run_flatwatch(
        dir.path(),
        &["flatten", "--prefix", "p", "--input", doc.to_str().unwrap()],
        "",
    );

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], serde_json::json!({"p_spec_replicas": "2.000000"}));
}

#[test]
fn test_input_paths_are_expanded() {
    let dir = isolated_dir();
    fs::write(dir.path().join("events.json"), "{\"a\": 1}\n").unwrap();

    let mut child = Command::new(flatwatch_binary())
        .env("FLATWATCH_DIR", dir.path())
        .env("FLATWATCH_TEST_DOCS", dir.path())
        .env_remove("FLATWATCH_CONFIG")
        .env_remove("RUST_LOG")
        .args(["watch", "--prefix", "p", "--input", "$FLATWATCH_TEST_DOCS/events.json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn flatwatch");
    drop(child.stdin.take());
    let output = child.wait_with_output().expect("Failed to wait for flatwatch");

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], serde_json::json!({"p_a": "1.000000"}));
}

#[test]
fn test_flatten_command_rejects_invalid_json() {
    let dir = isolated_dir();

    let output = run_flatwatch(dir.path(), &["flatten"], "not json");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_show_json() {
    let dir = isolated_dir();

    let output = run_flatwatch(dir.path(), &["config", "show", "-o", "json"], "");

    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["flatten"]["enabled"], serde_json::json!(true));
    assert_eq!(config["flatten"]["prefix"], serde_json::json!("flatwatch"));
}
