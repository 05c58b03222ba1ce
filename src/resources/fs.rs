//! File-system resource helpers.
use std::path::Path;

use crate::error::PipelineError;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Recursively delete `path`, whether it is a file, a symlink or a directory.
///
/// Returns `false` without error when nothing exists at `path`, so callers
/// can treat repeated cleanup as a no-op.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_tree(path: &Path) -> Result<bool, PipelineError> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(PipelineError::Delete {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let result = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(PipelineError::Delete {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // ensure_parent_dir
    // -----------------------------------------------------------------------

    #[test]
    fn ensure_parent_dir_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("file.txt");
        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a").join("b").exists());
    }

    #[test]
    fn ensure_parent_dir_noop_when_parent_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        ensure_parent_dir(&file).unwrap();
        assert!(dir.path().exists());
    }

    // -----------------------------------------------------------------------
    // remove_tree
    // -----------------------------------------------------------------------

    #[test]
    fn remove_tree_deletes_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("_posts");
        std::fs::create_dir_all(tree.join("2024/01")).unwrap();
        std::fs::write(tree.join("2024/01/post.html"), "x").unwrap();
        assert!(remove_tree(&tree).unwrap());
        assert!(!tree.exists());
    }

    #[test]
    fn remove_tree_deletes_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("stray");
        std::fs::write(&file, "x").unwrap();
        assert!(remove_tree(&file).unwrap());
        assert!(!file.exists());
    }

    #[test]
    fn remove_tree_missing_path_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!remove_tree(&dir.path().join("absent")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn remove_tree_removes_symlink_not_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("keep");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("file"), "x").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        assert!(remove_tree(&link).unwrap());
        assert!(link.symlink_metadata().is_err());
        assert!(target.join("file").exists());
    }
}
