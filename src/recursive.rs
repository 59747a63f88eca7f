//! Recursive removal
//!
//! Depth-first, post-order: every child of a directory is removed (recursing
//! into child directories first) before the directory itself. The first
//! failure aborts the whole walk; whatever was already removed stays
//! removed. Each level's iterator is dropped on every return path.

use crate::dir_iter::DirIter;
use crate::error::Result;
use crate::metadata::{symlink_metadata, FileType};
use crate::ops::remove;
use crate::path::FsPath;

/// Remove `path` and everything beneath it
///
/// A non-directory target is removed on its own. Symbolic links are
/// unlinked, never followed.
///
/// # Arguments
///
/// * `path` - File or directory to remove
///
/// # Returns
///
/// `Ok(())` once `path` and everything under it is gone
///
/// # Errors
///
/// Returns the first failure encountered and stops there:
/// - A directory cannot be opened or read
/// - An entry's metadata cannot be fetched
/// - An entry cannot be removed
///
/// Entries removed before the failure stay removed.
///
/// # Example
///
/// ```rust,no_run
/// use portable_fs::{exists, remove_recursive, FsPath};
///
/// # fn example() -> portable_fs::Result<()> {
/// let scratch = FsPath::new("/tmp/scratch");
/// remove_recursive(&scratch)?;
/// assert!(!exists(&scratch));
/// # Ok(())
/// # }
/// ```
pub fn remove_recursive(path: &FsPath<'_>) -> Result<()> {
    remove_recursive_with(path, remove)
}

/// Walk driver with the single-entry removal supplied by the caller
pub(crate) fn remove_recursive_with<F>(path: &FsPath<'_>, mut remove_entry: F) -> Result<()>
where
    F: FnMut(&FsPath<'_>) -> Result<()>,
{
    let result = walk(path, &mut remove_entry);
    if let Err(ref err) = result {
        tracing::warn!("Recursive removal of {} aborted: {}", path, err);
    }
    result
}

fn walk<F>(path: &FsPath<'_>, remove_entry: &mut F) -> Result<()>
where
    F: FnMut(&FsPath<'_>) -> Result<()>,
{
    if symlink_metadata(path)?.is_dir() {
        remove_children(path, remove_entry)?;
    }
    remove_entry(path)
}

fn remove_children<F>(dir: &FsPath<'_>, remove_entry: &mut F) -> Result<()>
where
    F: FnMut(&FsPath<'_>) -> Result<()>,
{
    tracing::debug!("Descending into {}", dir);
    let mut iter = DirIter::open(dir)?;
    while iter.advance()? {
        let Some(name) = iter.current_name() else {
            continue;
        };
        if name.is_dot_or_dotdot() {
            continue;
        }
        let child = dir.join(&name);
        let file_type = match iter.current_type() {
            Some(FileType::Unknown) | None => symlink_metadata(&child)?.file_type(),
            Some(file_type) => file_type,
        };
        if file_type == FileType::Directory {
            remove_children(&child, remove_entry)?;
        }
        remove_entry(&child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::error::FsError;
    use tempfile::TempDir;

    fn fs_path(path: &std::path::Path) -> FsPath<'static> {
        FsPath::new(path.to_str().unwrap()).into_owned()
    }

    #[test]
    fn test_removes_nested_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        std::fs::create_dir_all(root.join("a/b/c")).unwrap();
        std::fs::write(root.join("top.txt"), b"1").unwrap();
        std::fs::write(root.join("a/b/c/deep.txt"), b"2").unwrap();

        remove_recursive(&fs_path(&root)).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_non_directory_target() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("single");
        std::fs::write(&file, b"x").unwrap();

        remove_recursive(&fs_path(&file)).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn test_missing_target_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(remove_recursive(&fs_path(&missing)).is_err());
    }

    #[test]
    fn test_first_failure_aborts_walk() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        for name in ["a", "b", "c", "d"] {
            std::fs::write(root.join(name), name).unwrap();
        }

        let mut calls = 0;
        let result = remove_recursive_with(&fs_path(&root), |entry| {
            calls += 1;
            Err(FsError::InvalidMode {
                mode: entry.to_string(),
            })
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
        // The hook removed nothing, and nothing after the failure was visited
        for name in ["a", "b", "c", "d"] {
            assert!(root.join(name).exists());
        }
        assert!(root.exists());
    }

    #[test]
    fn test_failure_in_nested_level_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("sub/victim"), b"x").unwrap();

        let mut removed = Vec::new();
        let result = remove_recursive_with(&fs_path(&root), |entry| {
            if entry.to_string().ends_with("victim") {
                return Err(FsError::InvalidMode {
                    mode: "forced".to_string(),
                });
            }
            removed.push(entry.to_string());
            remove(entry)
        });

        assert!(result.is_err());
        assert!(removed.is_empty());
        assert!(root.join("sub/victim").exists());
    }

    #[cfg(target_os = "linux")]
    fn open_fd_count() -> usize {
        std::fs::read_dir("/proc/self/fd").unwrap().count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_walks_release_every_directory_handle() {
        const WALKS: usize = 50;
        // Each failing walk below holds four levels open at the failure point
        const LEVELS: usize = 4;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        std::fs::create_dir_all(root.join("a/b/c")).unwrap();
        std::fs::write(root.join("a/b/c/x"), b"x").unwrap();
        let root = fs_path(&root);

        let before = open_fd_count();
        for _ in 0..WALKS {
            let result = remove_recursive_with(&root, |entry| {
                Err(FsError::InvalidMode {
                    mode: entry.to_string(),
                })
            });
            assert!(result.is_err());
        }
        let after = open_fd_count();

        // Other tests in this process may open files concurrently; a leak
        // here would add WALKS * LEVELS descriptors
        assert!(
            after < before + WALKS,
            "fd count grew from {before} to {after} over {WALKS} walks of {LEVELS} levels"
        );
        assert!(temp_dir.path().join("root/a/b/c/x").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_unlinked_not_followed() {
        let temp_dir = TempDir::new().unwrap();
        let outside = temp_dir.path().join("outside");
        std::fs::create_dir(&outside).unwrap();
        std::fs::write(outside.join("keep.txt"), b"keep").unwrap();

        let root = temp_dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        remove_recursive(&fs_path(&root)).unwrap();
        assert!(!root.exists());
        assert!(outside.join("keep.txt").exists());
    }
}
