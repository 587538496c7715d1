use crate::cli::support::tidypath_in;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_decode_file_name() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["decode", "data/mod/f/x-1_z-2--5_.json"])
        .assert()
        .success()
        .stdout("x = 1\nz = 2.5\n");
}

#[test]
fn test_decode_dotted_value() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["decode", "ver-v1.2_.json"])
        .assert()
        .success()
        .stdout("ver = 'v1.2'\n");
}

#[test]
fn test_decode_negative_and_hyphenated() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["decode", "n-bins-5_shift--3_"])
        .assert()
        .success()
        .stdout(predicate::str::contains("n-bins = 5"))
        .stdout(predicate::str::contains("shift = -3"));
}

#[test]
fn test_decode_json() {
    let dir = tempdir().unwrap();
    let output = tidypath_in(dir.path())
        .args(["--format", "json", "decode", "flag-True_x-None_.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["flag"], true);
    assert!(json["x"].is_null());
}

#[test]
fn test_decode_empty_id() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["decode", "_.json"])
        .assert()
        .success()
        .stdout("(no arguments)\n");
}

#[test]
fn test_decode_digest_is_rejected() {
    let dir = tempdir().unwrap();
    let name = format!("h-{}_.json", "0".repeat(64));
    tidypath_in(dir.path())
        .args(["decode", name.as_str()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("digest"));
}
