//! Bulk renaming of stored files after a key change

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::codec::{id_updater, split_ext, CodecOptions, UpdateMode};
use crate::error::{Result, TidypathError};
use crate::paths::is_hashed_stem;
use crate::value::ArgumentMap;

/// Options for [`id_renamer`]
#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    /// Only rename files whose name contains this substring
    pub filter: Option<String>,
    /// Descend into subdirectories
    pub recursive: bool,
    pub codec: CodecOptions,
}

/// Rewrite the argument map encoded in every matching file name under `dir`.
///
/// Returns the number of files processed. Digest names carry no decodable
/// id and are left alone. A rename onto an existing file is refused. The
/// first failing rename aborts the run; files renamed before it keep their
/// new names.
pub fn id_renamer(
    update: &ArgumentMap,
    dir: &Path,
    mode: UpdateMode,
    opts: &RenameOptions,
) -> Result<usize> {
    if !dir.is_dir() {
        return Err(TidypathError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut renamed = 0;
    for old in matching_files(dir, opts)? {
        if has_hashed_name(&old) {
            tracing::debug!(file = %old.display(), "skipping digest name");
            continue;
        }
        let new = id_updater(&old, update, mode, &opts.codec);
        if new != old {
            if new.exists() {
                return Err(TidypathError::FailedOperationWithTarget {
                    operation: "rename".to_string(),
                    target: old.display().to_string(),
                    reason: format!("{} already exists", new.display()),
                });
            }
            fs::rename(&old, &new).map_err(|e| {
                TidypathError::io_operation("rename", old.display(), e)
            })?;
            tracing::debug!(from = %old.display(), to = %new.display(), "renamed");
        }
        renamed += 1;
    }

    tracing::info!(dir = %dir.display(), count = renamed, ?mode, "renamed files");
    Ok(renamed)
}

fn has_hashed_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| is_hashed_stem(split_ext(&name.to_string_lossy()).0))
        .unwrap_or(false)
}

/// Files under `dir` in sorted order, collected before anything is renamed
fn matching_files(dir: &Path, opts: &RenameOptions) -> Result<Vec<PathBuf>> {
    let mut files = if opts.recursive {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect::<Vec<_>>()
    } else {
        let entries = fs::read_dir(dir)
            .map_err(|e| TidypathError::io_operation("read directory", dir.display(), e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        files
    };

    if let Some(filter) = opts.filter.as_deref() {
        files.retain(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().contains(filter))
                .unwrap_or(false)
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "{}").unwrap();
    }

    fn update(key: &str, value: Value) -> ArgumentMap {
        let mut map = ArgumentMap::new();
        map.insert(key.to_string(), value);
        map
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_add_key_to_every_file() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("x-1_.json"));
        touch(&dir.path().join("x-2_.json"));

        let count = id_renamer(
            &update("seed", Value::Int(0)),
            dir.path(),
            UpdateMode::Add,
            &RenameOptions::default(),
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(names(dir.path()), vec!["seed-0_x-1_.json", "seed-0_x-2_.json"]);
    }

    #[test]
    fn test_delete_key() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("seed-0_x-1_.json"));

        id_renamer(
            &update("seed", Value::Null),
            dir.path(),
            UpdateMode::Delete,
            &RenameOptions::default(),
        )
        .unwrap();

        assert_eq!(names(dir.path()), vec!["x-1_.json"]);
    }

    #[test]
    fn test_filter_limits_files() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("x-1_.json"));
        touch(&dir.path().join("y-1_.json"));

        let opts = RenameOptions {
            filter: Some("x-".to_string()),
            ..RenameOptions::default()
        };
        let count = id_renamer(&update("z", Value::Int(3)), dir.path(), UpdateMode::Add, &opts)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(names(dir.path()), vec!["x-1_z-3_.json", "y-1_.json"]);
    }

    #[test]
    fn test_subdirectories_only_when_recursive() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("x-1_.json"));
        touch(&dir.path().join("nested/x-2_.json"));

        let count = id_renamer(
            &update("z", Value::Int(3)),
            dir.path(),
            UpdateMode::Add,
            &RenameOptions::default(),
        )
        .unwrap();
        assert_eq!(count, 1);
        assert_eq!(names(&dir.path().join("nested")), vec!["x-2_.json"]);

        let opts = RenameOptions {
            recursive: true,
            ..RenameOptions::default()
        };
        let count =
            id_renamer(&update("w", Value::Int(0)), dir.path(), UpdateMode::Add, &opts).unwrap();
        assert_eq!(count, 2);
        assert_eq!(names(&dir.path().join("nested")), vec!["w-0_x-2_.json"]);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_empty_update_normalizes_order() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("z-1_a-2_.json"));

        id_renamer(
            &ArgumentMap::new(),
            dir.path(),
            UpdateMode::Add,
            &RenameOptions::default(),
        )
        .unwrap();

        assert_eq!(names(dir.path()), vec!["a-2_z-1_.json"]);
    }

    #[test]
    fn test_collision_stops_without_overwriting() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x-1_y-2_.json"), "1").unwrap();
        fs::write(dir.path().join("x-2_y-2_.json"), "2").unwrap();

        let result = id_renamer(
            &update("x", Value::Null),
            dir.path(),
            UpdateMode::Delete,
            &RenameOptions::default(),
        );

        assert!(matches!(
            result,
            Err(TidypathError::FailedOperationWithTarget { .. })
        ));
        assert_eq!(names(dir.path()), vec!["x-2_y-2_.json", "y-2_.json"]);
        assert_eq!(fs::read_to_string(dir.path().join("y-2_.json")).unwrap(), "1");
        assert_eq!(
            fs::read_to_string(dir.path().join("x-2_y-2_.json")).unwrap(),
            "2"
        );
    }

    #[test]
    fn test_digest_names_are_skipped() {
        let dir = tempdir().unwrap();
        let digest = format!("h-{}_.json", "0f".repeat(32));
        touch(&dir.path().join(&digest));
        touch(&dir.path().join("x-1_.json"));

        let count = id_renamer(
            &update("seed", Value::Int(0)),
            dir.path(),
            UpdateMode::Add,
            &RenameOptions::default(),
        )
        .unwrap();

        assert_eq!(count, 1);
        assert_eq!(names(dir.path()), vec![digest, "seed-0_x-1_.json".to_string()]);
    }

    #[test]
    fn test_dotted_values_survive() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("ver-v1.2_.json"));

        id_renamer(
            &update("seed", Value::Int(0)),
            dir.path(),
            UpdateMode::Add,
            &RenameOptions::default(),
        )
        .unwrap();

        assert_eq!(names(dir.path()), vec!["seed-0_ver-v1.2_.json"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let result = id_renamer(
            &ArgumentMap::new(),
            &missing,
            UpdateMode::Add,
            &RenameOptions::default(),
        );
        assert!(matches!(result, Err(TidypathError::DirectoryNotFound(_))));
    }
}
