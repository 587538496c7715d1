use crate::cli::support::tidypath_in;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_encode_sorts_keys() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["encode", "z=2--5", "x=1"])
        .assert()
        .success()
        .stdout("x-1_z-2--5\n");
}

#[test]
fn test_encode_decimal_literal() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["encode", "z=2.5", "ver=v1.2"])
        .assert()
        .success()
        .stdout("ver-v1.2_z-2--5\n");
}

#[test]
fn test_encode_normalizes_key_names() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["encode", "n_bins=5", "density=True"])
        .assert()
        .success()
        .stdout("density-True_n-bins-5\n");
}

#[test]
fn test_encode_nothing() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .arg("encode")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_encode_rejects_missing_value() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["encode", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_encode_uses_configured_digits() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("tidypath.toml"),
        "[codec]\nndigits = 1\n",
    )
    .unwrap();
    tidypath_in(dir.path())
        .args(["encode", "z=0--25"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("z-0--"));
}

#[test]
fn test_encode_json() {
    let dir = tempdir().unwrap();
    let output = tidypath_in(dir.path())
        .args(["--format", "json", "encode", "x=1", "name=run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"], "name-run_x-1");
    assert_eq!(json["args"]["x"], 1);
    assert_eq!(json["args"]["name"], "run");
}
