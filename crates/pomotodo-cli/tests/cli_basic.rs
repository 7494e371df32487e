//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with HOME pointed at a fresh temp
//! directory, so config and database never leak between tests.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pomotodo-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("POMOTODO_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command, expect success and parse stdout as JSON.
fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_timer_status_defaults() {
    let home = tempfile::tempdir().unwrap();
    let snap = run_json(home.path(), &["timer", "status"]);
    assert_eq!(snap["type"], "StateSnapshot");
    assert_eq!(snap["display"], "25:00");
    assert_eq!(snap["label"], "Work Time");
    assert_eq!(snap["state"]["isRunning"], false);
    assert_eq!(snap["settings"]["sessionsBeforeLongBreak"], 4);
}

#[test]
fn test_timer_configure_and_skip_persist() {
    let home = tempfile::tempdir().unwrap();
    let event = run_json(home.path(), &["timer", "configure", "--work", "60", "--break", "30"]);
    assert_eq!(event["type"], "SettingsChanged");
    assert_eq!(event["remaining_secs"], 60);

    let event = run_json(home.path(), &["timer", "skip"]);
    assert_eq!(event["type"], "TimerSkipped");
    assert_eq!(event["to"], "short_break");
    assert_eq!(event["sessions_completed"], 1);

    let snap = run_json(home.path(), &["timer", "status"]);
    assert_eq!(snap["display"], "00:30");
    assert_eq!(snap["label"], "Break Time");
}

#[test]
fn test_timer_configure_requires_a_field() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["timer", "configure"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("nothing to configure"));
}

#[test]
fn test_timer_reset() {
    let home = tempfile::tempdir().unwrap();
    let event = run_json(home.path(), &["timer", "reset"]);
    assert_eq!(event["type"], "TimerReset");
    assert_eq!(event["remaining_secs"], 1500);
}

#[test]
fn test_timer_run_completes_a_short_phase() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["timer", "configure", "--work", "1"]);
    run_cli(home.path(), &["config", "set", "alerts.sound", "false"]);

    let (stdout, stderr, code) = run_cli(home.path(), &["timer", "run"]);
    assert_eq!(code, 0, "timer run failed: {stderr}");
    assert!(stdout.contains("[Pomodoro Timer] Time for a break!"));

    let snap = run_json(home.path(), &["timer", "status"]);
    assert_eq!(snap["state"]["isBreak"], true);
    assert_eq!(snap["state"]["sessionsCompleted"], 1);
    assert_eq!(snap["state"]["isRunning"], false);
}

#[test]
fn test_task_lifecycle() {
    let home = tempfile::tempdir().unwrap();
    let task = run_json(home.path(), &["task", "add", "  write tests  "]);
    assert_eq!(task["text"], "write tests");
    assert_eq!(task["completed"], false);
    let id = task["id"].as_str().unwrap().to_string();

    let (stdout, _, code) = run_cli(home.path(), &["task", "toggle", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Task toggled"));

    let list = run_json(home.path(), &["task", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["completed"], true);

    let (stdout, _, code) = run_cli(home.path(), &["task", "clear-completed"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Removed 1"));

    let list = run_json(home.path(), &["task", "list"]);
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_task_add_blank_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("blank"));
}

#[test]
fn test_task_unknown_id_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "remove", "missing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Task not found: missing"));
    let (_, _, code) = run_cli(home.path(), &["task", "toggle", "missing"]);
    assert_eq!(code, 1);
}

#[test]
fn test_task_list_plain() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["task", "list", "--plain"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No tasks yet."));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "alerts.sound"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "alerts.sound", "false"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "alerts.sound"]);
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "alerts.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "alerts.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Configuration error: unknown config key: alerts.nope"));
}

#[test]
fn test_config_list() {
    let home = tempfile::tempdir().unwrap();
    let cfg = run_json(home.path(), &["config", "list"]);
    assert_eq!(cfg["alerts"]["tone_hz"], 800);
}
