//! Integration tests for single and recursive removal

mod common;

use common::{create_sample_tree, fs_path, snapshot};
use portable_fs::{create_directory, exists, remove, remove_recursive, FsError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_remove_recursive_clears_tree() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().join("root");
    create_sample_tree(&root)?;
    let before = snapshot(&root);
    assert_eq!(before.len(), 6);

    remove_recursive(&fs_path(&root))?;

    assert!(!exists(&fs_path(&root)));
    for path in before {
        assert!(!path.exists(), "{} survived", path.display());
    }
    // Siblings of the target are untouched
    assert!(temp_dir.path().exists());
    Ok(())
}

#[test]
fn test_remove_recursive_deep_chain() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().join("deep");
    let mut current = root.clone();
    for level in 0..32 {
        current = current.join(format!("level_{level}"));
    }
    fs::create_dir_all(&current)?;
    fs::write(current.join("leaf.txt"), b"leaf")?;

    remove_recursive(&fs_path(&root))?;
    assert!(!root.exists());
    Ok(())
}

#[test]
fn test_remove_recursive_empty_directory() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path().join("empty");
    create_directory(&fs_path(&dir))?;

    remove_recursive(&fs_path(&dir))?;
    assert!(!dir.exists());
    Ok(())
}

#[test]
fn test_single_remove_refuses_non_empty_directory() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().join("root");
    create_sample_tree(&root)?;
    let before = snapshot(&root);

    let err = remove(&fs_path(&root)).expect_err("directory is not empty");
    assert!(matches!(err, FsError::Remove { .. }));
    assert_eq!(snapshot(&root), before);
    Ok(())
}

#[test]
fn test_create_directory_needs_parent() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let nested = temp_dir.path().join("missing").join("child");
    let err = create_directory(&fs_path(&nested)).expect_err("parent is missing");
    assert!(matches!(err, FsError::CreateDirectory { .. }));
    assert!(!temp_dir.path().join("missing").exists());
    Ok(())
}

/// A read-only directory makes removing its children fail; nothing outside
/// the failing level may be affected by the aborted walk
#[cfg(unix)]
#[test]
fn test_remove_recursive_fails_fast_on_permission_error() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if common::running_as_root() {
        eprintln!("skipping: permission checks do not apply to root");
        return Ok(());
    }

    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().join("root");
    let locked = root.join("locked");
    fs::create_dir_all(&locked)?;
    fs::write(locked.join("pinned.txt"), b"x")?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555))?;

    let result = remove_recursive(&fs_path(&root));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
    assert!(result.is_err());
    assert!(locked.join("pinned.txt").exists());
    assert!(root.exists());
    Ok(())
}
