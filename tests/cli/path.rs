use crate::cli::support::tidypath_in;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_data_path_created() {
    let dir = tempdir().unwrap();
    let expected = dir
        .path()
        .join("data/variable1/measurement1/slow_computation/x-1_z-2--5_.json");

    tidypath_in(dir.path())
        .args([
            "path",
            "--module",
            "analysis.variable1.measurement1",
            "slow_computation",
            "x=1",
            "z=2--5",
        ])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));

    assert!(expected.parent().unwrap().is_dir());
    assert!(!expected.exists());
}

#[test]
fn test_figure_path_uses_figure_defaults() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["path", "--module", "analysis.plots", "--figure", "hist", "bins=20"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("figs/plots/hist/bins-20_.svg\n"));
}

#[test]
fn test_method_path_with_classes() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args([
            "path",
            "--module",
            "analysis.models",
            "--class",
            "mixins.Logged",
            "--class",
            "Model",
            "fit",
        ])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("data/models/model/fit/_.json\n"));

    tidypath_in(dir.path())
        .args([
            "path",
            "--module",
            "analysis.models",
            "--class",
            "mixins.Logged",
            "--class",
            "Model",
            "--include-classes",
            "all",
            "--no-funcname",
            "fit",
        ])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("data/models/logged/model/_.json\n"));
}

#[test]
fn test_configured_directories() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("tidypath.toml"),
        "data_dir = \"cache\"\n[data]\next = \"yaml\"\n",
    )
    .unwrap();
    tidypath_in(dir.path())
        .args(["path", "--module", "pkg.stats", "mean", "--subfolder", "v2"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("cache/v2/stats/mean/_.yaml\n"));
}

#[test]
fn test_unsupported_data_extension() {
    let dir = tempdir().unwrap();
    tidypath_in(dir.path())
        .args(["path", "--module", "pkg.stats", "--ext", "lzma", "mean"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported data extension"));
}

#[test]
fn test_path_json() {
    let dir = tempdir().unwrap();
    let output = tidypath_in(dir.path())
        .args(["--format", "json", "path", "--module", "pkg.stats", "mean", "n=3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "data");
    assert_eq!(json["exists"], false);
    assert_eq!(json["keys"]["n"], 3);
    assert!(json["path"].as_str().unwrap().ends_with("n-3_.json"));
}
