//! Native directory enumeration streams
//!
//! Two incompatible protocols live behind [`DirStream`]:
//!
//! - **opendir/readdir/closedir**: opening yields no entry; every `readdir`
//!   call (including the first) returns the next one.
//! - **FindFirstFileW/FindNextFileW/FindClose**: the call that opens the
//!   handle also returns the first entry; `FindNextFileW` returns the rest.
//!
//! Both are exposed through the same three primitives: [`DirStream::open`],
//! [`DirStream::first`] and [`DirStream::next`]. `first` must be called
//! exactly once, before any `next`; callers that need a single "advance"
//! keep that bit of state themselves. The handle is released in `Drop`.
//!
//! Self (`.`) and parent (`..`) entries are passed through untouched.

use crate::error::Result;
use crate::types::FileType;
use crate::NativeChar;

// ============================================================================
// Byte-string platforms
// ============================================================================

/// Open directory stream and the entry it currently points at
#[cfg(unix)]
pub struct DirStream {
    dir: std::ptr::NonNull<libc::DIR>,
    /// Owned by `dir`; valid until the next readdir/closedir
    entry: *const libc::dirent,
}

/// `d_type` values and the file type each one denotes
#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
const DIRENT_TYPES: [(u8, FileType); 7] = [
    (libc::DT_BLK, FileType::BlockDevice),
    (libc::DT_CHR, FileType::CharDevice),
    (libc::DT_DIR, FileType::Directory),
    (libc::DT_FIFO, FileType::Fifo),
    (libc::DT_LNK, FileType::Symlink),
    (libc::DT_REG, FileType::Regular),
    (libc::DT_SOCK, FileType::Socket),
];

#[cfg(unix)]
impl DirStream {
    /// Open a directory for enumeration
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a readable directory or contains
    /// a NUL character.
    pub fn open(path: &[NativeChar]) -> Result<Self> {
        use crate::encoding::to_c_string;
        use crate::error::os_error;

        let c_path = to_c_string(path)?;
        // SAFETY: `c_path` is NUL-terminated and outlives the call
        let dir = unsafe { libc::opendir(c_path.as_ptr()) };
        let dir = std::ptr::NonNull::new(dir).ok_or_else(|| os_error("opendir"))?;
        log::trace!("opendir {:?}", String::from_utf8_lossy(path));
        Ok(Self {
            dir,
            entry: std::ptr::null(),
        })
    }

    /// Fetch the first entry
    ///
    /// # Errors
    ///
    /// Returns an error if `readdir` reports one.
    pub fn first(&mut self) -> Result<bool> {
        self.read()
    }

    /// Fetch the next entry
    ///
    /// # Errors
    ///
    /// Returns an error if `readdir` reports one.
    pub fn next(&mut self) -> Result<bool> {
        self.read()
    }

    fn read(&mut self) -> Result<bool> {
        use crate::error::os_error_from;

        // readdir signals both end-of-stream and failure with NULL; only
        // errno tells them apart.
        nix::errno::Errno::clear();
        // SAFETY: `dir` is open until Drop
        let entry = unsafe { libc::readdir(self.dir.as_ptr()) };
        self.entry = entry;
        if !entry.is_null() {
            return Ok(true);
        }
        let err = std::io::Error::last_os_error();
        match err.raw_os_error() {
            None | Some(0) => Ok(false),
            Some(_) => Err(os_error_from("readdir", err)),
        }
    }

    /// Bare name of the current entry, or `None` before the first entry or
    /// after the end
    #[must_use]
    pub fn name(&self) -> Option<&[NativeChar]> {
        if self.entry.is_null() {
            return None;
        }
        // SAFETY: `entry` is non-null and stays valid until the next
        // readdir/closedir, both of which need `&mut self`. d_name is
        // NUL-terminated.
        let name = unsafe { std::ffi::CStr::from_ptr((*self.entry).d_name.as_ptr()) };
        Some(name.to_bytes())
    }

    /// Type of the current entry from `d_type`, or `Unknown` if the
    /// filesystem does not fill it in
    #[must_use]
    pub fn file_type(&self) -> FileType {
        if self.entry.is_null() {
            return FileType::Unknown;
        }
        self.dirent_type()
    }

    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    fn dirent_type(&self) -> FileType {
        // SAFETY: caller checked `entry` is non-null
        let d_type = unsafe { (*self.entry).d_type };
        DIRENT_TYPES
            .iter()
            .find(|(value, _)| *value == d_type)
            .map_or(FileType::Unknown, |(_, file_type)| *file_type)
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    )))]
    fn dirent_type(&self) -> FileType {
        FileType::Unknown
    }
}

#[cfg(unix)]
impl Drop for DirStream {
    fn drop(&mut self) {
        // SAFETY: `dir` came from opendir and is closed exactly once
        unsafe { libc::closedir(self.dir.as_ptr()) };
    }
}

// ============================================================================
// Wide-character platforms
// ============================================================================

/// Open find handle and the find data of the current entry
#[cfg(windows)]
pub struct DirStream {
    /// `INVALID_HANDLE_VALUE` when the directory had nothing to enumerate
    handle: windows_sys::Win32::Foundation::HANDLE,
    data: windows_sys::Win32::Storage::FileSystem::WIN32_FIND_DATAW,
    /// `data` holds an entry that has not been handed out yet
    pending: bool,
    /// `data` holds the entry last handed out
    positioned: bool,
}

#[cfg(windows)]
impl DirStream {
    /// Open a directory for enumeration
    ///
    /// Runs `FindFirstFileW` on `path\*`, so the first entry is fetched here
    /// and held until [`DirStream::first`] hands it out. A directory with no
    /// matching entries opens successfully and enumerates nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, is not a readable directory,
    /// or contains a NUL character.
    pub fn open(path: &[NativeChar]) -> Result<Self> {
        use crate::encoding::to_wide_nul;
        use crate::error::os_error_from;
        use windows_sys::Win32::Foundation::{
            ERROR_FILE_NOT_FOUND, ERROR_PATH_NOT_FOUND, INVALID_HANDLE_VALUE,
        };
        use windows_sys::Win32::Storage::FileSystem::{FindFirstFileW, WIN32_FIND_DATAW};

        // `*` alone would enumerate the current directory; opendir("") fails
        if path.is_empty() {
            return Err(os_error_from(
                "FindFirstFileW",
                std::io::Error::from_raw_os_error(ERROR_PATH_NOT_FOUND as i32),
            ));
        }

        let mut pattern = Vec::with_capacity(path.len() + 2);
        pattern.extend_from_slice(path);
        let ends_with_separator = matches!(path.last(), Some(&c) if c == u16::from(b'\\') || c == u16::from(b'/'));
        if !ends_with_separator {
            pattern.push(u16::from(b'\\'));
        }
        pattern.push(u16::from(b'*'));
        let pattern = to_wide_nul(&pattern)?;

        // SAFETY: zeroed is a valid bit pattern for this plain C struct
        let mut data: WIN32_FIND_DATAW = unsafe { std::mem::zeroed() };
        // SAFETY: `pattern` is NUL-terminated and outlives the call
        let handle = unsafe { FindFirstFileW(pattern.as_ptr(), &mut data) };
        if handle == INVALID_HANDLE_VALUE {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(ERROR_FILE_NOT_FOUND as i32) {
                log::debug!("FindFirstFileW found no entries");
                return Ok(Self {
                    handle,
                    data,
                    pending: false,
                    positioned: false,
                });
            }
            return Err(os_error_from("FindFirstFileW", err));
        }
        Ok(Self {
            handle,
            data,
            pending: true,
            positioned: false,
        })
    }

    /// Hand out the entry `FindFirstFileW` already fetched
    ///
    /// # Errors
    ///
    /// Never fails; the native call already happened in `open`.
    pub fn first(&mut self) -> Result<bool> {
        self.positioned = std::mem::take(&mut self.pending);
        Ok(self.positioned)
    }

    /// Fetch the next entry with `FindNextFileW`
    ///
    /// # Errors
    ///
    /// Returns an error if `FindNextFileW` fails for any reason other than
    /// running out of entries.
    pub fn next(&mut self) -> Result<bool> {
        use crate::error::os_error_from;
        use windows_sys::Win32::Foundation::{ERROR_NO_MORE_FILES, INVALID_HANDLE_VALUE};
        use windows_sys::Win32::Storage::FileSystem::FindNextFileW;

        self.positioned = false;
        if self.handle == INVALID_HANDLE_VALUE {
            return Ok(false);
        }
        // SAFETY: `handle` is open until Drop
        if unsafe { FindNextFileW(self.handle, &mut self.data) } != 0 {
            self.positioned = true;
            return Ok(true);
        }
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(ERROR_NO_MORE_FILES as i32) {
            Ok(false)
        } else {
            Err(os_error_from("FindNextFileW", err))
        }
    }

    /// Bare name of the current entry, or `None` before the first entry or
    /// after the end
    #[must_use]
    pub fn name(&self) -> Option<&[NativeChar]> {
        if !self.positioned {
            return None;
        }
        let name = &self.data.cFileName;
        let len = name.iter().position(|&c| c == 0).unwrap_or(name.len());
        Some(&name[..len])
    }

    /// Type of the current entry from its find-data attributes
    #[must_use]
    pub fn file_type(&self) -> FileType {
        if !self.positioned {
            return FileType::Unknown;
        }
        crate::stat::file_type_from_attributes(self.data.dwFileAttributes)
    }
}

#[cfg(windows)]
impl Drop for DirStream {
    fn drop(&mut self) {
        use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
        use windows_sys::Win32::Storage::FileSystem::FindClose;

        if self.handle != INVALID_HANDLE_VALUE {
            // SAFETY: `handle` came from FindFirstFileW and is closed exactly once
            unsafe { FindClose(self.handle) };
        }
    }
}

// SAFETY: the stream exclusively owns its native handle and entry buffer;
// nothing else refers to them, so moving the stream to another thread is
// sound. It is not `Sync`: concurrent use needs external locking.
unsafe impl Send for DirStream {}
