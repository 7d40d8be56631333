//! Integration tests for the `meetslot` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the find and
//! check subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, config files, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn meetslot() -> Command {
    let mut cmd = Command::cargo_bin("meetslot").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout must be valid JSON")
}

fn start_times(result: &serde_json::Value) -> Vec<String> {
    result["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["start_time"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// find subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn find_from_file_ranks_slots_after_busy_hour() {
    let output = meetslot()
        .args(["find", "-i", &fixture("request.json"), "-a", &fixture("availability.json")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let result = stdout_json(&output);
    assert_eq!(result["suggestion_count"], 3);
    assert_eq!(result["attendee_count"], 2);
    assert_eq!(
        start_times(&result),
        vec![
            "2026-03-16T10:15:00+00:00",
            "2026-03-16T10:30:00+00:00",
            "2026-03-16T10:00:00+00:00",
        ]
    );
}

#[test]
fn find_reads_request_from_stdin() {
    let request = r#"{
        "attendees": ["bob@example.com"],
        "duration_minutes": 30,
        "date_range_start": "2026-03-16T09:00:00Z",
        "date_range_end": "2026-03-16T17:00:00Z"
    }"#;

    meetslot()
        .args(["find", "-a", &fixture("availability.json")])
        .write_stdin(request)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"suggestions\""))
        .stdout(predicate::str::contains("2026-03-16T09:00:00+00:00"));
}

#[test]
fn find_with_busy_attendee_returns_empty_list() {
    let request = r#"{
        "attendees": ["bob@example.com", "busy@example.com"],
        "duration_minutes": 60,
        "date_range_start": "2026-03-16T09:00:00Z",
        "date_range_end": "2026-03-16T17:00:00Z"
    }"#;

    let output = meetslot()
        .args(["find", "-a", &fixture("availability.json")])
        .write_stdin(request)
        .output()
        .unwrap();

    assert!(output.status.success());
    let result = stdout_json(&output);
    assert_eq!(result["suggestion_count"], 0);
    assert!(result["suggestions"].as_array().unwrap().is_empty());
}

#[test]
fn find_writes_output_file() {
    let output_path = std::env::temp_dir().join("meetslot-test-find-output.json");
    let _ = std::fs::remove_file(&output_path);

    meetslot()
        .args([
            "find",
            "-i",
            &fixture("request.json"),
            "-a",
            &fixture("availability.json"),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let result: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(result["suggestion_count"], 3);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn find_rejects_invalid_duration() {
    let request = r#"{
        "attendees": ["bob@example.com"],
        "duration_minutes": 5,
        "date_range_start": "2026-03-16T09:00:00Z",
        "date_range_end": "2026-03-16T17:00:00Z"
    }"#;

    meetslot()
        .args(["find", "-a", &fixture("availability.json")])
        .write_stdin(request)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "duration_minutes must be between 15 and 480",
        ));
}

#[test]
fn find_rejects_empty_attendees() {
    let request = r#"{
        "attendees": [],
        "duration_minutes": 60,
        "date_range_start": "2026-03-16T09:00:00Z",
        "date_range_end": "2026-03-16T17:00:00Z"
    }"#;

    meetslot()
        .args(["find", "-a", &fixture("availability.json")])
        .write_stdin(request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("attendee"));
}

#[test]
fn find_rejects_malformed_json() {
    meetslot()
        .args(["find", "-a", &fixture("availability.json")])
        .write_stdin("this is not json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse request JSON"));
}

#[test]
fn find_reports_missing_availability_file() {
    meetslot()
        .args(["find", "-i", &fixture("request.json"), "-a", "/nonexistent/freebusy.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read availability file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Config file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn config_preferences_apply_when_request_has_none() {
    let output = meetslot()
        .args([
            "--config",
            &fixture("afternoon.toml"),
            "find",
            "-i",
            &fixture("exhaustive_request.json"),
            "-a",
            &fixture("availability.json"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let result = stdout_json(&output);
    assert_eq!(result["preferences"]["prefer_afternoon"], true);
    assert_eq!(
        start_times(&result),
        vec![
            "2026-03-16T13:00:00+00:00",
            "2026-03-16T13:15:00+00:00",
            "2026-03-16T13:30:00+00:00",
        ]
    );
}

#[test]
fn without_config_default_preferences_apply() {
    let output = meetslot()
        .args([
            "find",
            "-i",
            &fixture("exhaustive_request.json"),
            "-a",
            &fixture("availability.json"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        start_times(&stdout_json(&output)),
        vec![
            "2026-03-16T10:15:00+00:00",
            "2026-03-16T10:30:00+00:00",
            "2026-03-16T10:45:00+00:00",
        ]
    );
}

#[test]
fn request_preferences_override_config() {
    let request = r#"{
        "attendees": ["alice@example.com"],
        "duration_minutes": 60,
        "date_range_start": "2026-03-16T09:00:00Z",
        "date_range_end": "2026-03-16T17:00:00Z",
        "max_suggestions": 1,
        "search_strategy": "exhaustive",
        "preferences": { "prefer_morning": true }
    }"#;

    let output = meetslot()
        .args(["--config", &fixture("afternoon.toml"), "find", "-a", &fixture("availability.json")])
        .write_stdin(request)
        .output()
        .unwrap();

    assert!(output.status.success());
    let result = stdout_json(&output);
    assert_eq!(result["preferences"]["prefer_afternoon"], false);
    assert_eq!(start_times(&result), vec!["2026-03-16T10:15:00+00:00"]);
}

#[test]
fn debug_logging_goes_to_stderr_only() {
    let output = meetslot()
        .args([
            "--config",
            &fixture("afternoon.toml"),
            "find",
            "-i",
            &fixture("request.json"),
            "-a",
            &fixture("availability.json"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    stdout_json(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("meeting time search complete"));
}

#[test]
fn broken_explicit_config_fails() {
    meetslot()
        .args([
            "--config",
            &fixture("broken.toml"),
            "find",
            "-i",
            &fixture("request.json"),
            "-a",
            &fixture("availability.json"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_reports_each_attendee() {
    let output = meetslot()
        .args([
            "check",
            "-a",
            &fixture("availability.json"),
            "--attendee",
            "alice@example.com",
            "--attendee",
            "bob@example.com",
            "--start",
            "2026-03-16T09:00:00Z",
            "--end",
            "2026-03-16T17:00:00Z",
            "--interval",
            "15",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report = stdout_json(&output);
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["attendee"], "alice@example.com");
    assert_eq!(entries[0]["merged_free_busy"], format!("2222{}", "0".repeat(28)));
    assert_eq!(entries[0]["blocks"][0]["status"], "busy");
    assert_eq!(entries[1]["available_minutes"], 480);
}

#[test]
fn check_rejects_end_before_start() {
    meetslot()
        .args([
            "check",
            "-a",
            &fixture("availability.json"),
            "--attendee",
            "alice@example.com",
            "--start",
            "2026-03-16T17:00:00Z",
            "--end",
            "2026-03-16T09:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("end must be after start"));
}

#[test]
fn check_requires_an_attendee() {
    meetslot()
        .args([
            "check",
            "-a",
            &fixture("availability.json"),
            "--start",
            "2026-03-16T09:00:00Z",
            "--end",
            "2026-03-16T17:00:00Z",
        ])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Help
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    meetslot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("check"));
}
