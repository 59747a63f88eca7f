//! Error types for native filesystem primitives

use std::io;
use thiserror::Error;

/// Result alias used by every native primitive
pub type Result<T> = std::result::Result<T, NativeError>;

/// Failure of a native filesystem primitive
///
/// The native error state (`errno` or `GetLastError()`) is captured at the
/// failure site and kept as the `source`, so it survives past the next call
/// that would otherwise overwrite it.
#[derive(Debug, Error)]
pub enum NativeError {
    /// A native call reported failure
    #[error("{operation} failed: {source}")]
    Os {
        /// Name of the native call that failed
        operation: &'static str,
        /// Error state captured right after the call
        #[source]
        source: io::Error,
    },

    /// A path handed to a native call contained a NUL character
    #[error("path contains an interior NUL character")]
    InteriorNul,

    /// Native characters could not be converted to UTF-8
    #[error("path is not valid Unicode")]
    InvalidUnicode,
}

impl NativeError {
    /// Raw OS error code, if this error came from a native call
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Os { source, .. } => source.raw_os_error(),
            Self::InteriorNul | Self::InvalidUnicode => None,
        }
    }

    /// Portable classification of the failure
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Os { source, .. } => source.kind(),
            Self::InteriorNul | Self::InvalidUnicode => io::ErrorKind::InvalidInput,
        }
    }
}

/// Capture the current native error state for `operation`
///
/// Must be called immediately after the failing native call.
pub(crate) fn os_error(operation: &'static str) -> NativeError {
    NativeError::Os {
        operation,
        source: io::Error::last_os_error(),
    }
}

/// Wrap an already-captured error for `operation`
pub(crate) fn os_error_from(operation: &'static str, source: io::Error) -> NativeError {
    NativeError::Os { operation, source }
}
