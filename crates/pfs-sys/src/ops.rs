//! Single-entry mutations: create one directory, remove one entry

use crate::error::Result;
use crate::NativeChar;

/// Create a single directory (parents are not created)
///
/// New directories get mode `0o777` filtered by the process umask on
/// byte-string platforms and default security on wide-character platforms.
///
/// # Errors
///
/// Returns an error if the entry already exists, the parent is missing,
/// permission is denied, or the path contains a NUL character.
#[cfg(unix)]
pub fn create_directory(path: &[NativeChar]) -> Result<()> {
    use crate::error::{os_error_from, NativeError};
    use nix::sys::stat::Mode;

    if path.contains(&0) {
        return Err(NativeError::InteriorNul);
    }
    nix::unistd::mkdir(path, Mode::from_bits_truncate(0o777))
        .map_err(|errno| os_error_from("mkdir", errno.into()))
}

/// Create a single directory (parents are not created)
///
/// # Errors
///
/// Returns an error if the entry already exists, the parent is missing,
/// permission is denied, or the path contains a NUL character.
#[cfg(windows)]
pub fn create_directory(path: &[NativeChar]) -> Result<()> {
    use crate::encoding::to_wide_nul;
    use crate::error::os_error;
    use windows_sys::Win32::Storage::FileSystem::CreateDirectoryW;

    let wide = to_wide_nul(path)?;
    // SAFETY: `wide` is NUL-terminated; null security attributes means defaults
    if unsafe { CreateDirectoryW(wide.as_ptr(), std::ptr::null()) } == 0 {
        return Err(os_error("CreateDirectoryW"));
    }
    Ok(())
}

/// Remove one file or one empty directory
///
/// # Errors
///
/// Returns an error if the entry does not exist, is a non-empty directory,
/// permission is denied, or the path contains a NUL character.
#[cfg(unix)]
pub fn remove(path: &[NativeChar]) -> Result<()> {
    use crate::encoding::to_c_string;
    use crate::error::os_error;

    let c_path = to_c_string(path)?;
    // SAFETY: `c_path` is a valid NUL-terminated string for the whole call.
    // remove(3) unlinks files and rmdirs directories.
    if unsafe { libc::remove(c_path.as_ptr()) } != 0 {
        return Err(os_error("remove"));
    }
    Ok(())
}

/// Remove one file or one empty directory
///
/// The entry's own attributes pick the native call: `RemoveDirectoryW` for
/// directories (including directory links), `DeleteFileW` otherwise.
///
/// # Errors
///
/// Returns an error if the entry does not exist, is a non-empty directory,
/// permission is denied, or the path contains a NUL character.
#[cfg(windows)]
pub fn remove(path: &[NativeChar]) -> Result<()> {
    use crate::encoding::to_wide_nul;
    use crate::error::os_error;
    use windows_sys::Win32::Storage::FileSystem::{
        DeleteFileW, GetFileAttributesW, RemoveDirectoryW, FILE_ATTRIBUTE_DIRECTORY,
        INVALID_FILE_ATTRIBUTES,
    };

    let wide = to_wide_nul(path)?;
    // SAFETY: `wide` is NUL-terminated for every call below
    let attributes = unsafe { GetFileAttributesW(wide.as_ptr()) };
    if attributes == INVALID_FILE_ATTRIBUTES {
        return Err(os_error("GetFileAttributesW"));
    }
    if attributes & FILE_ATTRIBUTE_DIRECTORY != 0 {
        // SAFETY: as above
        if unsafe { RemoveDirectoryW(wide.as_ptr()) } == 0 {
            return Err(os_error("RemoveDirectoryW"));
        }
    } else {
        // SAFETY: as above
        if unsafe { DeleteFileW(wide.as_ptr()) } == 0 {
            return Err(os_error("DeleteFileW"));
        }
    }
    Ok(())
}
