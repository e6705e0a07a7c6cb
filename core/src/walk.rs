//! File walking
//!
//! Hands every entry below a root path to a per-file callback. A plain
//! file root is visited on its own.

use crate::error::{DcmpeekError, Result};
use log::warn;
use std::fs::Metadata;
use std::path::Path;
use walkdir::WalkDir;

/// Visits `root`, or the entries below it when it is a directory
///
/// Sub-directories are only descended into when `recursive` is set. The
/// callback sees directories too and decides what to skip. Unreadable
/// entries are logged and skipped; an error returned by the callback
/// stops the walk.
///
/// # Errors
///
/// Returns a configuration error if `root` does not exist, or the first
/// error returned by `visit`.
pub fn walk_files<F>(root: &Path, recursive: bool, mut visit: F) -> Result<()>
where
    F: FnMut(&Path, &Metadata) -> Result<()>,
{
    let metadata = std::fs::metadata(root).map_err(|e| {
        DcmpeekError::Configuration(format!("cannot access {}: {}", root.display(), e))
    })?;

    if !metadata.is_dir() {
        return visit(root, &metadata);
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        visit(entry.path(), &metadata)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.dcm"), b"b").unwrap();
        fs::write(temp_dir.path().join("a.dcm"), b"a").unwrap();
        fs::create_dir(temp_dir.path().join("series")).unwrap();
        fs::write(temp_dir.path().join("series").join("c.dcm"), b"c").unwrap();
        temp_dir
    }

    fn visited_files(root: &Path, recursive: bool) -> Vec<PathBuf> {
        let mut files = Vec::new();
        walk_files(root, recursive, |path, metadata| {
            if !metadata.is_dir() {
                files.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
            Ok(())
        })
        .unwrap();
        files
    }

    #[test]
    fn test_walk_flat() {
        let temp_dir = tree();
        assert_eq!(
            visited_files(temp_dir.path(), false),
            vec![PathBuf::from("a.dcm"), PathBuf::from("b.dcm")]
        );
    }

    #[test]
    fn test_walk_recursive() {
        let temp_dir = tree();
        assert_eq!(
            visited_files(temp_dir.path(), true),
            vec![
                PathBuf::from("a.dcm"),
                PathBuf::from("b.dcm"),
                PathBuf::from("series/c.dcm"),
            ]
        );
    }

    #[test]
    fn test_walk_single_file() {
        let temp_dir = tree();
        let file = temp_dir.path().join("a.dcm");
        let mut seen = Vec::new();
        walk_files(&file, true, |path, _| {
            seen.push(path.to_path_buf());
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![file]);
    }

    #[test]
    fn test_walk_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = walk_files(&temp_dir.path().join("missing"), false, |_, _| Ok(())).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_callback_error_stops_walk() {
        let temp_dir = tree();
        let mut calls = 0;
        let result = walk_files(temp_dir.path(), false, |_, _| {
            calls += 1;
            Err(DcmpeekError::Configuration("stop".into()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
