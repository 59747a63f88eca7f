//! Metadata fetch and field extraction
//!
//! [`Metadata`] is an immutable snapshot filled by one native call. Its
//! accessors only read the snapshot; they never touch the filesystem again.
//!
//! `changed()` is the status-change time on byte-string platforms and the
//! creation time on wide-character platforms.

use crate::error::{FsError, Result};
use crate::path::FsPath;
use pfs_sys::{stat, NativeStat};

pub use pfs_sys::{FileType, Timestamp};

/// Snapshot of an entry's type, size and timestamps
#[derive(Debug, Clone, Copy)]
pub struct Metadata {
    inner: NativeStat,
}

impl Metadata {
    /// Fetch metadata, following a final symbolic link
    ///
    /// # Arguments
    ///
    /// * `path` - Entry to inspect
    ///
    /// # Returns
    ///
    /// `Ok(Metadata)` holding type, size and timestamps as of this call
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Metadata`] if the path does not exist or cannot be
    /// inspected. The native cause is kept as the error source.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use portable_fs::{FsPath, Metadata};
    ///
    /// # fn example() -> portable_fs::Result<()> {
    /// let metadata = Metadata::fetch(&FsPath::new("Cargo.toml"))?;
    /// println!("{} bytes, modified {}", metadata.size(), metadata.modified());
    /// # Ok(())
    /// # }
    /// ```
    pub fn fetch(path: &FsPath<'_>) -> Result<Self> {
        stat::stat(path.as_native())
            .map(|inner| Self { inner })
            .map_err(|source| FsError::Metadata {
                path: path.to_string(),
                source,
            })
    }

    /// Entry type; unrecognized native bits give [`FileType::Unknown`]
    #[must_use]
    pub fn file_type(&self) -> FileType {
        self.inner.file_type()
    }

    /// Size in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.inner.size()
    }

    /// Last access time
    #[must_use]
    pub fn accessed(&self) -> Timestamp {
        self.inner.accessed()
    }

    /// Last modification time
    #[must_use]
    pub fn modified(&self) -> Timestamp {
        self.inner.modified()
    }

    /// Status-change time (byte-string platforms) or creation time
    /// (wide-character platforms)
    #[must_use]
    pub fn changed(&self) -> Timestamp {
        self.inner.changed()
    }

    /// Whether this is a regular file
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.file_type() == FileType::Regular
    }

    /// Whether this is a directory
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.file_type() == FileType::Directory
    }

    /// Whether this is a symbolic link (only possible via [`symlink_metadata`])
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.file_type() == FileType::Symlink
    }
}

/// Fetch metadata of the path itself without following a final symbolic link
///
/// # Errors
///
/// Returns [`FsError::Metadata`] if the path does not exist or cannot be
/// inspected.
pub fn symlink_metadata(path: &FsPath<'_>) -> Result<Metadata> {
    stat::symlink_stat(path.as_native())
        .map(|inner| Metadata { inner })
        .map_err(|source| FsError::Metadata {
            path: path.to_string(),
            source,
        })
}

/// Whether anything exists at `path`
///
/// Any fetch failure counts as "does not exist", including permission
/// errors on a parent directory.
#[must_use]
pub fn exists(path: &FsPath<'_>) -> bool {
    Metadata::fetch(path).is_ok()
}

/// Whether `path` is a regular file; fetch failure gives `false`
#[must_use]
pub fn is_file(path: &FsPath<'_>) -> bool {
    Metadata::fetch(path).is_ok_and(|metadata| metadata.is_file())
}

/// Whether `path` is a directory; fetch failure gives `false`
#[must_use]
pub fn is_directory(path: &FsPath<'_>) -> bool {
    Metadata::fetch(path).is_ok_and(|metadata| metadata.is_dir())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.bin");
        std::fs::write(&file, [0u8; 1234]).unwrap();

        let path = FsPath::new(file.to_str().unwrap());
        let metadata = Metadata::fetch(&path).unwrap();
        assert_eq!(metadata.size(), 1234);
        assert_eq!(metadata.file_type(), FileType::Regular);
        assert!(metadata.is_file());
        assert!(!metadata.is_dir());
    }

    #[test]
    fn test_fetch_missing_keeps_cause() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = Metadata::fetch(&FsPath::new(missing.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, FsError::Metadata { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_predicates() {
        let temp_dir = TempDir::new().unwrap();
        let dir = FsPath::new(temp_dir.path().to_str().unwrap());
        let file_buf = temp_dir.path().join("f");
        std::fs::write(&file_buf, b"").unwrap();
        let file = FsPath::new(file_buf.to_str().unwrap());
        let missing_buf = temp_dir.path().join("missing");
        let missing = FsPath::new(missing_buf.to_str().unwrap());

        assert!(exists(&dir) && is_directory(&dir) && !is_file(&dir));
        assert!(exists(&file) && is_file(&file) && !is_directory(&file));
        assert!(!exists(&missing) && !is_file(&missing) && !is_directory(&missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_metadata_does_not_follow() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        let link = temp_dir.path().join("link");
        std::fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let path = FsPath::new(link.to_str().unwrap());
        assert!(symlink_metadata(&path).unwrap().is_symlink());
        assert!(Metadata::fetch(&path).unwrap().is_dir());
    }
}
