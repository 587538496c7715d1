//! Path resolution utilities for CLI commands

use std::env;
use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// An explicit root wins; otherwise the current working directory, or "."
/// if that cannot be determined.
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve a command path argument against the project root
pub fn resolve_under_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_explicit_path() {
        let explicit = PathBuf::from("/tmp/test/path");
        assert_eq!(resolve_root_path(Some(explicit.clone())), explicit);
    }

    #[test]
    fn test_resolve_without_path_uses_current_dir() {
        let result = resolve_root_path(None);
        if let Ok(current) = env::current_dir() {
            assert!(result == current || result == PathBuf::from("."));
        } else {
            assert_eq!(result, PathBuf::from("."));
        }
    }

    #[test]
    fn test_resolve_under_root() {
        let root = Path::new("/project");
        assert_eq!(
            resolve_under_root(root, Path::new("data/run")),
            PathBuf::from("/project/data/run")
        );
        assert_eq!(
            resolve_under_root(root, Path::new("/elsewhere")),
            PathBuf::from("/elsewhere")
        );
    }
}
