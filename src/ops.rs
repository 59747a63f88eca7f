//! Single-entry primitives: create one directory, remove one entry, open a
//! file with an fopen-style mode string

use crate::error::{FsError, Result};
use crate::path::FsPath;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Create one directory; intermediate parents are not created
///
/// # Errors
///
/// Returns [`FsError::CreateDirectory`] if the entry exists, the parent is
/// missing, or permission is denied.
pub fn create_directory(path: &FsPath<'_>) -> Result<()> {
    pfs_sys::ops::create_directory(path.as_native()).map_err(|source| {
        FsError::CreateDirectory {
            path: path.to_string(),
            source,
        }
    })?;
    tracing::debug!("Created directory {}", path);
    Ok(())
}

/// Remove exactly one file or one empty directory
///
/// # Errors
///
/// Returns [`FsError::Remove`] if the entry is missing, is a non-empty
/// directory, or cannot be removed.
pub fn remove(path: &FsPath<'_>) -> Result<()> {
    pfs_sys::ops::remove(path.as_native()).map_err(|source| FsError::Remove {
        path: path.to_string(),
        source,
    })?;
    tracing::trace!("Removed {}", path);
    Ok(())
}

/// Access requested by an fopen-style mode string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenMode {
    /// `r`: open existing for reading
    pub read: bool,
    /// `w`: create or truncate for writing
    pub write: bool,
    /// `a`: create, writes go to the end
    pub append: bool,
    /// `+`: add the complementary access
    pub update: bool,
    /// `x`: fail if the file already exists
    pub exclusive: bool,
}

impl OpenMode {
    /// Parse a mode such as `"r"`, `"wb"`, `"a+"` or `"wx"`
    ///
    /// Exactly one of `r`, `w`, `a` must appear first. `+`, `b`, `t` and
    /// `x` may follow in any order; `b` and `t` are accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::InvalidMode`] for anything else, including
    /// non-ASCII characters.
    pub fn parse(mode: &str) -> Result<Self> {
        let invalid = || FsError::InvalidMode {
            mode: mode.to_owned(),
        };
        let mut chars = mode.bytes();
        let mut parsed = match chars.next() {
            Some(b'r') => Self {
                read: true,
                ..Self::default()
            },
            Some(b'w') => Self {
                write: true,
                ..Self::default()
            },
            Some(b'a') => Self {
                append: true,
                ..Self::default()
            },
            _ => return Err(invalid()),
        };
        for c in chars {
            match c {
                b'+' if !parsed.update => parsed.update = true,
                b'x' if !parsed.exclusive && !parsed.read => parsed.exclusive = true,
                b'b' | b't' => {}
                _ => return Err(invalid()),
            }
        }
        Ok(parsed)
    }

    /// Equivalent `std` open options
    #[must_use]
    pub fn to_open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options
            .read(self.read || self.update)
            .write(self.write || (self.read && self.update))
            .append(self.append);
        if self.write || self.append {
            if self.exclusive {
                options.create_new(true);
            } else {
                options.create(true).truncate(self.write);
            }
        }
        options
    }
}

/// Open a file with an fopen-style mode string
///
/// # Errors
///
/// Returns [`FsError::InvalidMode`] if `mode` cannot be parsed and
/// [`FsError::OpenFile`] if the native open fails.
pub fn open(path: &FsPath<'_>, mode: &str) -> Result<File> {
    let options = OpenMode::parse(mode)?.to_open_options();
    let os_path = path.to_os_str();
    options
        .open(Path::new(&*os_path))
        .map_err(|source| FsError::OpenFile {
            path: path.to_string(),
            source,
        })
}
