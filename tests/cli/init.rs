use crate::cli::support::tidypath_in;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_init_writes_config() {
    let dir = tempdir().unwrap();

    tidypath_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tidypath config"));

    let content = fs::read_to_string(dir.path().join("tidypath.toml")).unwrap();
    assert!(content.contains("data_dir = \"data\""));
    assert!(content.contains("[codec]"));
}

#[test]
fn test_init_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tidypath.toml");
    fs::write(&path, "data_dir = \"cache\"\n").unwrap();

    tidypath_in(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "data_dir = \"cache\"\n");

    tidypath_in(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("data_dir = \"data\""));
}

#[test]
fn test_init_json() {
    let dir = tempdir().unwrap();
    let output = tidypath_in(dir.path())
        .args(["init", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["created"], true);
}

#[test]
fn test_init_root_must_exist() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    tidypath_in(dir.path())
        .arg("--root")
        .arg(&missing)
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}
