//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only
//! non-mutating commands (and rejected mutations) are exercised so the
//! dev data directory stays untouched.

use std::process::Command;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-p", "pomogoal-cli", "--"])
        .args(args)
        .env("POMOGOAL_ENV", "dev")
        .output()
        .expect("failed to execute CLI command");

    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn goal_list_succeeds() {
    let (code, _stdout, _stderr) = run_cli(&["goal", "list"]);
    assert_eq!(code, 0);
}

#[test]
fn stats_show_succeeds() {
    let (code, stdout, _stderr) = run_cli(&["stats", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Total hours focused"));
}

#[test]
fn stats_show_json_is_valid() {
    let (code, stdout, _stderr) = run_cli(&["stats", "show", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(parsed["total_hours_focused"].is_number());
}

#[test]
fn goal_add_rejects_out_of_range_target() {
    let (code, _stdout, stderr) = run_cli(&["goal", "add", "tmp", "--target", "42"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("target hours"));
}

#[test]
fn goal_add_rejects_blank_name() {
    let (code, _stdout, stderr) = run_cli(&["goal", "add", "   ", "--target", "2"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("name"));
}
