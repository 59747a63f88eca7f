//! Directory iterator state machine
//!
//! [`DirIter`] presents both native enumeration protocols through one
//! interface:
//!
//! ```text
//!   open() ──► BeforeFirst ──advance()=true──► OnEntry ◄─┐
//!                  │                              │      │ advance()=true
//!                  │                              └──────┘
//!                  └──advance()=false/Err──► Exhausted ◄──advance()=false/Err── OnEntry
//! ```
//!
//! The first `advance` fetches the first entry (it does not skip it). On
//! platforms where the first entry comes from a different native call than
//! the rest, that distinction is handled here and never seen by callers.
//!
//! Entry accessors return `None` outside `OnEntry`. Names are borrowed from
//! the iterator, so the borrow checker rejects holding one across the next
//! `advance`. Self (`.`) and parent (`..`) entries are not filtered.
//!
//! The native handle is released when the iterator is dropped.

use crate::error::{FsError, Result};
use crate::path::FsPath;
use pfs_sys::{DirStream, FileType};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Opened; no entry fetched yet
    BeforeFirst,
    /// Positioned on an entry
    OnEntry,
    /// No more entries; every further advance returns false
    Exhausted,
}

/// Cursor over the direct children of one directory
pub struct DirIter {
    stream: DirStream,
    cursor: Cursor,
    /// Directory being enumerated, kept for error messages
    path: String,
}

impl DirIter {
    /// Open `path` for enumeration
    ///
    /// No entry is fetched yet; the first [`DirIter::advance`] does that.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory whose direct children are enumerated
    ///
    /// # Returns
    ///
    /// `Ok(DirIter)` positioned before the first entry
    ///
    /// # Errors
    ///
    /// Returns [`FsError::OpenDirectory`] if:
    /// - The path doesn't exist or is empty
    /// - The path is not a directory
    /// - Permission is denied
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use portable_fs::{DirIter, FsPath};
    ///
    /// # fn example() -> portable_fs::Result<()> {
    /// let iter = DirIter::open(&FsPath::new("/tmp"))?;
    /// assert!(iter.current_name().is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: &FsPath<'_>) -> Result<Self> {
        let stream = DirStream::open(path.as_native()).map_err(|source| FsError::OpenDirectory {
            path: path.to_string(),
            source,
        })?;
        tracing::debug!("Opened directory {}", path);
        Ok(Self {
            stream,
            cursor: Cursor::BeforeFirst,
            path: path.to_string(),
        })
    }

    /// Move to the next entry
    ///
    /// The first call fetches the first entry. Enumeration order is whatever
    /// the platform returns.
    ///
    /// # Returns
    ///
    /// `Ok(true)` when positioned on an entry, `Ok(false)` once the
    /// directory is exhausted. After that it keeps returning `Ok(false)`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use portable_fs::{DirIter, FsPath};
    ///
    /// # fn example() -> portable_fs::Result<()> {
    /// let mut iter = DirIter::open(&FsPath::new("."))?;
    /// while iter.advance()? {
    ///     if let Some(name) = iter.current_name() {
    ///         println!("{name}");
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`FsError::ReadDirectory`] if the native enumeration fails.
    /// The iterator is exhausted afterwards.
    pub fn advance(&mut self) -> Result<bool> {
        let step = match self.cursor {
            Cursor::BeforeFirst => self.stream.first(),
            Cursor::OnEntry => self.stream.next(),
            Cursor::Exhausted => return Ok(false),
        };
        match step {
            Ok(true) => {
                self.cursor = Cursor::OnEntry;
                Ok(true)
            }
            Ok(false) => {
                self.cursor = Cursor::Exhausted;
                Ok(false)
            }
            Err(source) => {
                self.cursor = Cursor::Exhausted;
                Err(FsError::ReadDirectory {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Bare name of the current entry
    #[must_use]
    pub fn current_name(&self) -> Option<FsPath<'_>> {
        if self.cursor != Cursor::OnEntry {
            return None;
        }
        self.stream.name().map(FsPath::from_native)
    }

    /// Type of the current entry as reported by the enumeration itself
    ///
    /// May be [`FileType::Unknown`]; fetch metadata on the joined path when
    /// the type must be known.
    #[must_use]
    pub fn current_type(&self) -> Option<FileType> {
        (self.cursor == Cursor::OnEntry).then(|| self.stream.file_type())
    }

    /// Whether the iterator has run out of entries
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    /// Directory being enumerated
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for DirIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirIter")
            .field("path", &self.path)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_accessors_invalid_before_first_advance() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a"), b"").unwrap();
        let iter = DirIter::open(&FsPath::new(temp_dir.path().to_str().unwrap())).unwrap();
        assert!(iter.current_name().is_none());
        assert!(iter.current_type().is_none());
        assert!(!iter.is_exhausted());
    }

    #[test]
    fn test_first_advance_yields_first_entry() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("only"), b"").unwrap();
        let mut iter = DirIter::open(&FsPath::new(temp_dir.path().to_str().unwrap())).unwrap();

        let mut names = Vec::new();
        while iter.advance().unwrap() {
            names.push(iter.current_name().unwrap().to_string());
        }
        assert!(names.iter().any(|name| name == "only"));
        assert!(iter.is_exhausted());
        assert!(iter.current_name().is_none());
        assert!(!iter.advance().unwrap());
    }

    #[test]
    fn test_open_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let err = DirIter::open(&FsPath::new(missing.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, FsError::OpenDirectory { .. }));
        assert!(err.is_not_found());
    }
}
