//! Native metadata records
//!
//! # Operations
//!
//! - **stat**: metadata of the entry a path resolves to (follows a final
//!   symbolic link)
//! - **symlink_stat**: metadata of the path itself (does not follow)
//!
//! A [`NativeStat`] is a snapshot: it is filled by exactly one native call
//! and never changes afterwards.
//!
//! # Platform notes
//!
//! - Byte-string platforms read `struct stat`. The file type comes from
//!   masking `st_mode` with `S_IFMT`; timestamps come from the combined
//!   `st_*time`/`st_*time_nsec` fields, so they carry nanoseconds. `ctime`
//!   is the status-change time.
//! - Wide-character platforms read `BY_HANDLE_FILE_INFORMATION` (following)
//!   or `WIN32_FILE_ATTRIBUTE_DATA` (not following). Only directories, device
//!   handles and reparse points are distinguished; everything else reports as
//!   a regular file. Timestamps are `FILETIME` (100ns ticks). `ctime` is the
//!   creation time.

use crate::error::Result;
use crate::types::{FileType, Timestamp};
use crate::NativeChar;
use std::fmt;

#[cfg(unix)]
use crate::error::{os_error_from, NativeError};

/// Snapshot of an entry's native metadata
#[derive(Clone, Copy)]
pub struct NativeStat {
    #[cfg(unix)]
    inner: libc::stat,
    #[cfg(windows)]
    inner: windows::Record,
}

impl fmt::Debug for NativeStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeStat")
            .field("file_type", &self.file_type())
            .field("size", &self.size())
            .field("modified", &self.modified())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Byte-string platforms
// ============================================================================

/// `S_IFMT` format bits and the file type each one denotes
#[cfg(unix)]
const MODE_FORMATS: [(libc::mode_t, FileType); 7] = [
    (libc::S_IFBLK, FileType::BlockDevice),
    (libc::S_IFCHR, FileType::CharDevice),
    (libc::S_IFDIR, FileType::Directory),
    (libc::S_IFIFO, FileType::Fifo),
    (libc::S_IFLNK, FileType::Symlink),
    (libc::S_IFREG, FileType::Regular),
    (libc::S_IFSOCK, FileType::Socket),
];

/// Map `st_mode` to a file type; unrecognized format bits give `Unknown`
#[cfg(unix)]
#[must_use]
pub fn file_type_from_mode(mode: libc::mode_t) -> FileType {
    let format = mode & libc::S_IFMT;
    MODE_FORMATS
        .iter()
        .find(|(bits, _)| *bits == format)
        .map_or(FileType::Unknown, |(_, file_type)| *file_type)
}

/// Fetch metadata, following a final symbolic link
///
/// # Errors
///
/// Returns an error if the path does not exist, cannot be inspected, or
/// contains a NUL character.
#[cfg(unix)]
pub fn stat(path: &[NativeChar]) -> Result<NativeStat> {
    if path.contains(&0) {
        return Err(NativeError::InteriorNul);
    }
    nix::sys::stat::stat(path)
        .map(|inner| NativeStat { inner })
        .map_err(|errno| os_error_from("stat", errno.into()))
}

/// Fetch metadata of the path itself, without following a symbolic link
///
/// # Errors
///
/// Returns an error if the path does not exist, cannot be inspected, or
/// contains a NUL character.
#[cfg(unix)]
pub fn symlink_stat(path: &[NativeChar]) -> Result<NativeStat> {
    if path.contains(&0) {
        return Err(NativeError::InteriorNul);
    }
    nix::sys::stat::lstat(path)
        .map(|inner| NativeStat { inner })
        .map_err(|errno| os_error_from("lstat", errno.into()))
}

#[cfg(unix)]
fn timestamp(secs: libc::time_t, nsec: libc::c_long) -> Timestamp {
    Timestamp::new(i64::from(secs), u32::try_from(nsec).unwrap_or(0))
}

#[cfg(unix)]
impl NativeStat {
    /// File type from the `S_IFMT` bits of `st_mode`
    #[must_use]
    pub fn file_type(&self) -> FileType {
        file_type_from_mode(self.inner.st_mode)
    }

    /// Size in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.inner.st_size).unwrap_or(0)
    }

    /// Last access time
    #[must_use]
    pub fn accessed(&self) -> Timestamp {
        timestamp(self.inner.st_atime, self.inner.st_atime_nsec)
    }

    /// Last modification time
    #[must_use]
    pub fn modified(&self) -> Timestamp {
        timestamp(self.inner.st_mtime, self.inner.st_mtime_nsec)
    }

    /// Last status change time
    #[must_use]
    pub fn changed(&self) -> Timestamp {
        timestamp(self.inner.st_ctime, self.inner.st_ctime_nsec)
    }

    /// Raw `st_mode` (type and permission bits)
    #[must_use]
    pub fn mode(&self) -> u32 {
        u32::from(self.inner.st_mode)
    }
}

// ============================================================================
// Wide-character platforms
// ============================================================================

#[cfg(windows)]
mod windows {
    use crate::encoding::to_wide_nul;
    use crate::error::{os_error, Result};
    use crate::types::{FileType, Timestamp};
    use crate::NativeChar;
    use windows_sys::Win32::Foundation::{CloseHandle, FILETIME, INVALID_HANDLE_VALUE};
    use windows_sys::Win32::Storage::FileSystem::{
        CreateFileW, GetFileAttributesExW, GetFileExInfoStandard, GetFileInformationByHandle,
        BY_HANDLE_FILE_INFORMATION, FILE_ATTRIBUTE_DEVICE, FILE_ATTRIBUTE_DIRECTORY,
        FILE_ATTRIBUTE_REPARSE_POINT, FILE_FLAG_BACKUP_SEMANTICS, FILE_READ_ATTRIBUTES,
        FILE_SHARE_DELETE, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
        WIN32_FILE_ATTRIBUTE_DATA,
    };

    /// Attribute bits checked in order; the first one set decides the type
    const ATTRIBUTE_TYPES: [(u32, FileType); 3] = [
        (FILE_ATTRIBUTE_REPARSE_POINT, FileType::Symlink),
        (FILE_ATTRIBUTE_DIRECTORY, FileType::Directory),
        (FILE_ATTRIBUTE_DEVICE, FileType::CharDevice),
    ];

    /// 100ns ticks per second
    const TICKS_PER_SEC: u64 = 10_000_000;
    /// Seconds between 1601-01-01 and 1970-01-01
    const EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

    /// Map file attributes to a file type; anything else is a regular file
    #[must_use]
    pub fn file_type_from_attributes(attributes: u32) -> FileType {
        ATTRIBUTE_TYPES
            .iter()
            .find(|(bit, _)| attributes & bit != 0)
            .map_or(FileType::Regular, |(_, file_type)| *file_type)
    }

    pub(crate) fn filetime_to_timestamp(time: &FILETIME) -> Timestamp {
        let ticks = (u64::from(time.dwHighDateTime) << 32) | u64::from(time.dwLowDateTime);
        let secs = i64::try_from(ticks / TICKS_PER_SEC).unwrap_or(i64::MAX) - EPOCH_OFFSET_SECS;
        let nanos = u32::try_from((ticks % TICKS_PER_SEC) * 100).unwrap_or(0);
        Timestamp::new(secs, nanos)
    }

    /// Fields common to both native records
    #[derive(Clone, Copy)]
    pub struct Record {
        pub attributes: u32,
        pub size: u64,
        pub created: FILETIME,
        pub accessed: FILETIME,
        pub written: FILETIME,
    }

    /// Open the path (following links) and read its by-handle information
    pub fn query_followed(path: &[NativeChar]) -> Result<Record> {
        let wide = to_wide_nul(path)?;
        // SAFETY: `wide` is NUL-terminated and outlives the call. Backup
        // semantics are required to open directories.
        let handle = unsafe {
            CreateFileW(
                wide.as_ptr(),
                FILE_READ_ATTRIBUTES,
                FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
                std::ptr::null(),
                OPEN_EXISTING,
                FILE_FLAG_BACKUP_SEMANTICS,
                std::ptr::null_mut(),
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(os_error("CreateFileW"));
        }

        // SAFETY: zeroed is a valid bit pattern for this plain C struct
        let mut info: BY_HANDLE_FILE_INFORMATION = unsafe { std::mem::zeroed() };
        // SAFETY: `handle` is valid until the CloseHandle below
        let ok = unsafe { GetFileInformationByHandle(handle, &mut info) };
        let result = if ok == 0 {
            Err(os_error("GetFileInformationByHandle"))
        } else {
            Ok(Record {
                // The target was opened, so a reparse bit here is not a link
                attributes: info.dwFileAttributes & !FILE_ATTRIBUTE_REPARSE_POINT,
                size: (u64::from(info.nFileSizeHigh) << 32) | u64::from(info.nFileSizeLow),
                created: info.ftCreationTime,
                accessed: info.ftLastAccessTime,
                written: info.ftLastWriteTime,
            })
        };
        // SAFETY: `handle` came from CreateFileW and is closed exactly once
        unsafe { CloseHandle(handle) };
        result
    }

    /// Read the attributes of the path itself (never follows)
    pub fn query_link(path: &[NativeChar]) -> Result<Record> {
        let wide = to_wide_nul(path)?;
        // SAFETY: zeroed is a valid bit pattern for this plain C struct
        let mut data: WIN32_FILE_ATTRIBUTE_DATA = unsafe { std::mem::zeroed() };
        // SAFETY: `wide` is NUL-terminated; `data` matches GetFileExInfoStandard
        let ok = unsafe {
            GetFileAttributesExW(
                wide.as_ptr(),
                GetFileExInfoStandard,
                (&mut data as *mut WIN32_FILE_ATTRIBUTE_DATA).cast(),
            )
        };
        if ok == 0 {
            return Err(os_error("GetFileAttributesExW"));
        }
        Ok(Record {
            attributes: data.dwFileAttributes,
            size: (u64::from(data.nFileSizeHigh) << 32) | u64::from(data.nFileSizeLow),
            created: data.ftCreationTime,
            accessed: data.ftLastAccessTime,
            written: data.ftLastWriteTime,
        })
    }
}

#[cfg(windows)]
pub use windows::file_type_from_attributes;
#[cfg(windows)]
pub(crate) use windows::filetime_to_timestamp;

/// Fetch metadata, following a final symbolic link
///
/// # Errors
///
/// Returns an error if the path does not exist, cannot be opened for
/// attribute reading, or contains a NUL character.
#[cfg(windows)]
pub fn stat(path: &[NativeChar]) -> Result<NativeStat> {
    windows::query_followed(path).map(|inner| NativeStat { inner })
}

/// Fetch metadata of the path itself, without following a symbolic link
///
/// # Errors
///
/// Returns an error if the path does not exist, cannot be inspected, or
/// contains a NUL character.
#[cfg(windows)]
pub fn symlink_stat(path: &[NativeChar]) -> Result<NativeStat> {
    windows::query_link(path).map(|inner| NativeStat { inner })
}

#[cfg(windows)]
impl NativeStat {
    /// File type from the attribute bits
    #[must_use]
    pub fn file_type(&self) -> FileType {
        file_type_from_attributes(self.inner.attributes)
    }

    /// Size in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.inner.size
    }

    /// Last access time
    #[must_use]
    pub fn accessed(&self) -> Timestamp {
        filetime_to_timestamp(&self.inner.accessed)
    }

    /// Last write time
    #[must_use]
    pub fn modified(&self) -> Timestamp {
        filetime_to_timestamp(&self.inner.written)
    }

    /// Creation time
    #[must_use]
    pub fn changed(&self) -> Timestamp {
        filetime_to_timestamp(&self.inner.created)
    }

    /// Raw file attribute bits
    #[must_use]
    pub fn attributes(&self) -> u32 {
        self.inner.attributes
    }
}
