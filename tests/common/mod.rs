//! Shared helpers for integration tests

#![allow(dead_code)]

use portable_fs::FsPath;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Borrow a temp path as an `FsPath`
pub fn fs_path(path: &Path) -> FsPath<'_> {
    FsPath::new(path.to_str().expect("temp paths are UTF-8"))
}

/// Build a small tree under `root`:
///
/// ```text
/// root/
///   a.txt
///   empty/
///   nested/
///     b.txt
///     deeper/
///       c.txt
/// ```
pub fn create_sample_tree(root: &Path) -> std::io::Result<()> {
    fs::create_dir_all(root.join("empty"))?;
    fs::create_dir_all(root.join("nested").join("deeper"))?;
    fs::write(root.join("a.txt"), b"alpha")?;
    fs::write(root.join("nested").join("b.txt"), b"beta")?;
    fs::write(root.join("nested").join("deeper").join("c.txt"), b"gamma")?;
    Ok(())
}

/// Every path under `root` (excluding `root` itself), sorted
pub fn snapshot(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.path().to_path_buf())
        .collect();
    paths.sort();
    paths
}

/// Whether the tests run with root privileges (permission checks bypassed)
#[cfg(unix)]
pub fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions
    unsafe { libc::geteuid() == 0 }
}
