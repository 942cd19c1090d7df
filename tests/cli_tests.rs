//! Tests for the binary surface.
//!
//! The timer screen reads stdin line-wise and exits on `q` or EOF, so
//! the binary can be driven end to end without a terminal.

use assert_cmd::Command;
use predicates::prelude::*;

fn pomate() -> Command {
    Command::cargo_bin("pomate").expect("binary should build")
}

// ============================================================================
// Flag Parsing
// ============================================================================

#[test]
fn test_help_describes_the_timer() {
    pomate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pomodoro"))
        .stdout(predicate::str::contains("--focus"))
        .stdout(predicate::str::contains("--volume"));
}

#[test]
fn test_version() {
    pomate().arg("--version").assert().success();
}

#[test]
fn test_focus_out_of_range_is_rejected() {
    pomate().args(["--focus", "5"]).assert().failure();
    pomate().args(["--focus", "90"]).assert().failure();
}

#[test]
fn test_short_break_out_of_range_is_rejected() {
    pomate().args(["--short-break", "1"]).assert().failure();
}

#[test]
fn test_volume_out_of_range_is_rejected() {
    pomate().args(["--volume", "1.5"]).assert().failure();
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    pomate().arg("frobnicate").assert().failure();
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    pomate()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomate"));
}

#[test]
fn test_completions_invalid_shell() {
    pomate().args(["completions", "tcsh"]).assert().failure();
}

// ============================================================================
// Timer Screen
// ============================================================================

#[test]
fn test_quit_exits_cleanly() {
    pomate()
        .args(["--no-sound", "--no-notify"])
        .write_stdin("q\n")
        .assert()
        .success();
}

#[test]
fn test_eof_exits_cleanly() {
    pomate()
        .args(["--no-sound", "--no-notify"])
        .assert()
        .success();
}

#[test]
fn test_snapshot_dumps_initial_state() {
    pomate()
        .args(["--no-sound", "--no-notify", "--snapshot"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"seconds_remaining\": 1500"))
        .stdout(predicate::str::contains("\"is_break_phase\": false"))
        .stdout(predicate::str::contains("\"completed_focus_sessions\": 0"));
}

#[test]
fn test_snapshot_reflects_custom_focus() {
    pomate()
        .args(["--focus", "40", "--no-sound", "--no-notify", "--snapshot"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"seconds_remaining\": 2400"))
        .stdout(predicate::str::contains("\"focus_minutes\": 40"));
}

#[test]
fn test_unknown_key_reports_error_and_continues() {
    pomate()
        .args(["--no-sound", "--no-notify"])
        .write_stdin("frobnicate\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown command"));
}
