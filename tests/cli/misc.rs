use crate::cli::support::{tidypath, tidypath_in};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_flag() {
    tidypath()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: tidypath"))
        .stdout(predicate::str::contains("encode"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("rename"));
}

#[test]
fn test_version_flag() {
    tidypath()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tidypath"));
}

#[test]
fn test_no_command_prints_banner() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tidypath --help"));
}

#[test]
fn test_unknown_command_is_usage_error() {
    tidypath().arg("frobnicate").assert().code(2);
}

#[test]
fn test_usage_error_as_json() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["--format", "json", "frobnicate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("tidypath.toml"), "data_dir = [").unwrap();
    tidypath_in(dir.path())
        .args(["encode", "x=1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TOML error"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["--verbose", "encode", "x=1"])
        .assert()
        .success()
        .stdout("x-1\n")
        .stderr(predicate::str::contains("parse_args"));
}
