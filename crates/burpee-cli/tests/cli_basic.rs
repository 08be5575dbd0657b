//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. The `run`
//! command drives an interactive loop and is exercised through the core
//! engine's unit tests instead.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "burpee-cli", "--"])
        .args(args)
        .env("BURPEE_ENV", "dev")
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn plan_prints_schedule_json() {
    let (stdout, stderr, code) = run_cli(&[
        "plan", "--duration", "1", "--reps", "6", "--cycle", "military", "--prep", "0",
    ]);
    assert_eq!(code, 0, "plan failed: {stderr}");

    let plan: serde_json::Value = serde_json::from_str(&stdout).expect("plan output is JSON");
    assert_eq!(plan["time_per_rep_secs"], 10.0);
    assert_eq!(plan["steps_per_rep"], 6);
    assert_eq!(plan["total_reps"], 6);
    assert!(stderr.contains("Burpee:"), "missing split preview: {stderr}");
}

#[test]
fn plan_accepts_custom_rep_time() {
    let (stdout, _, code) = run_cli(&[
        "plan",
        "--duration",
        "5",
        "--reps",
        "10",
        "--cycle",
        "navy-seal",
        "--time-per-rep",
        "20",
    ]);
    assert_eq!(code, 0);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["active_secs"], 20.0);
    assert_eq!(plan["rest_secs"], 10.0);
}

#[test]
fn plan_rejects_custom_time_below_floor() {
    let (_, stderr, code) = run_cli(&[
        "plan",
        "--duration",
        "1",
        "--reps",
        "6",
        "--cycle",
        "military",
        "--time-per-rep",
        "2",
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("at least 3"), "unexpected stderr: {stderr}");
}

#[test]
fn plan_rejects_zero_reps() {
    let (_, stderr, code) = run_cli(&["plan", "--duration", "1", "--reps", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("positive"), "unexpected stderr: {stderr}");
}

#[test]
fn config_list_is_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(config.get("workout").is_some());
    assert!(config.get("sound").is_some());
}

#[test]
fn config_get_known_key() {
    let (stdout, _, code) = run_cli(&["config", "get", "workout.duration_min"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().parse::<u32>().is_ok());
}

#[test]
fn config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "workout.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn config_set_roundtrip() {
    let (_, _, code) = run_cli(&["config", "set", "workout.prep_secs", "7"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(&["config", "get", "workout.prep_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "7");
    let (_, _, code) = run_cli(&["config", "reset"]);
    assert_eq!(code, 0);
}
