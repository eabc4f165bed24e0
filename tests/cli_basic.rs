//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and each subcommand
//! responds to `--help` with appropriate text.

#![allow(deprecated)] // cargo_bin deprecation; replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `tablesnap` binary, isolated from the user's config.
fn tablesnap() -> Command {
    let mut cmd = Command::cargo_bin("tablesnap").expect("binary 'tablesnap' should be built");
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("tablesnap-cli-tests"))
        .env_remove("TABLESNAP_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    tablesnap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: tablesnap"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag_shows_semver() {
    tablesnap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^tablesnap \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    tablesnap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: tablesnap"));
}

#[test]
fn invalid_subcommand_fails() {
    tablesnap()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn extract_help() {
    tablesnap()
        .args(["extract", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract the table"))
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--xlsx"));
}

#[test]
fn preview_help() {
    tablesnap()
        .args(["preview", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Render a page"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn open_help() {
    tablesnap()
        .args(["open", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upload files and preview"))
        .stdout(predicate::str::contains("<FILES>..."));
}

// ─── Subcommand argument validation ──────────────────────────────────────────

#[test]
fn extract_missing_region_fails() {
    tablesnap()
        .args(["extract", "doc.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--region"));
}

#[test]
fn extract_malformed_region_fails() {
    tablesnap()
        .args(["extract", "doc.pdf", "--region", "10,10,100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("X,Y,WIDTH,HEIGHT"));
}

#[test]
fn open_without_files_fails() {
    tablesnap()
        .arg("open")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<FILES>"));
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[test]
fn config_shows_defaults() {
    tablesnap()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains(r#"endpoint = "http://127.0.0.1:5000""#))
        .stdout(predicate::str::contains("viewport_width = 1000"));
}

#[test]
fn endpoint_env_overrides_default() {
    tablesnap()
        .env("TABLESNAP_ENDPOINT", "http://tables.internal:8080")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://tables.internal:8080"));
}

#[test]
fn endpoint_flag_overrides_env() {
    tablesnap()
        .env("TABLESNAP_ENDPOINT", "http://from-env:1")
        .args(["--endpoint", "http://from-flag:2", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://from-flag:2"))
        .stdout(predicate::str::contains("from-env").not());
}

#[test]
fn invalid_endpoint_fails() {
    tablesnap()
        .args(["--endpoint", "not a url", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid endpoint URL"));
}
