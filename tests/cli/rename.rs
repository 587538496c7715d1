use crate::cli::support::{file_names, tidypath_in, touch};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_rename_add() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data/stats/mean");
    touch(&data.join("x-1_.json"));
    touch(&data.join("x-2_.json"));

    tidypath_in(dir.path())
        .args(["rename", "data/stats/mean", "--add", "seed=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 2 file(s)"));

    assert_eq!(file_names(&data), vec!["seed-0_x-1_.json", "seed-0_x-2_.json"]);
}

#[test]
fn test_rename_keeps_dotted_values() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    touch(&data.join("ver-v1.2_.json"));

    tidypath_in(dir.path())
        .args(["rename", "data", "--add", "seed=0", "z=2.5"])
        .assert()
        .success();

    assert_eq!(file_names(&data), vec!["seed-0_ver-v1.2_z-2--5_.json"]);
}

#[test]
fn test_rename_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    touch(&data.join("x-1_y-2_.json"));
    touch(&data.join("x-2_y-2_.json"));

    tidypath_in(dir.path())
        .args(["rename", "data", "--delete", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(file_names(&data), vec!["x-2_y-2_.json", "y-2_.json"]);
}

#[test]
fn test_rename_delete_with_filter() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    touch(&data.join("seed-0_x-1_.json"));
    touch(&data.join("seed-0_y-1_.json"));

    tidypath_in(dir.path())
        .args(["--quiet", "rename", "data", "--delete", "seed", "--filter", "x-"])
        .assert()
        .success()
        .stdout("1\n");

    assert_eq!(file_names(&data), vec!["seed-0_y-1_.json", "x-1_.json"]);
}

#[test]
fn test_rename_recursive() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    touch(&data.join("a/x-1_.json"));
    touch(&data.join("b/x-2_.json"));

    tidypath_in(dir.path())
        .args(["rename", "data", "--recursive", "--add", "v=2"])
        .assert()
        .success();

    assert_eq!(file_names(&data.join("a")), vec!["v-2_x-1_.json"]);
    assert_eq!(file_names(&data.join("b")), vec!["v-2_x-2_.json"]);
}

#[test]
fn test_rename_missing_directory() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["rename", "nowhere", "--add", "x=1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("directory not found"));
}

#[test]
fn test_rename_json() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("data/x-1_.json"));

    let output = tidypath_in(dir.path())
        .args(["--format", "json", "rename", "data", "--delete", "x"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["renamed"], 1);
    assert_eq!(json["mode"], "delete");
}
