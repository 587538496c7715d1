use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

/// Get a Command for tidypath
pub fn tidypath() -> Command {
    cargo_bin_cmd!("tidypath")
}

/// Get a Command for tidypath rooted at `root`, isolated from any user config
pub fn tidypath_in(root: &Path) -> Command {
    let mut cmd = tidypath();
    cmd.current_dir(root)
        .env("TIDYPATH_ROOT", root)
        .env("TIDYPATH_CONFIG_DIR", root.join(".no-global-config"))
        .env_remove("RUST_LOG")
        .env_remove("TIDYPATH_LOG");
    cmd
}

/// Create an empty file, including its parent directories
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "{}").unwrap();
}

/// Sorted file names in a directory
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
