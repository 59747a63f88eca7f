//! Error types for portable filesystem operations
//!
//! Each variant names the operation that failed and the path it failed on.
//! The native cause is kept as the error source so callers that need to
//! tell "not found" from "permission denied" can inspect it.

use pfs_sys::NativeError;
use std::io;
use thiserror::Error;

/// Result alias for portable filesystem operations
pub type Result<T> = std::result::Result<T, FsError>;

/// Failure of a portable filesystem operation
#[derive(Debug, Error)]
pub enum FsError {
    /// Metadata could not be fetched
    #[error("cannot stat '{path}': {source}")]
    Metadata {
        /// Path as text
        path: String,
        /// Native cause
        #[source]
        source: NativeError,
    },

    /// Directory could not be opened for iteration
    #[error("cannot open directory '{path}': {source}")]
    OpenDirectory {
        /// Path as text
        path: String,
        /// Native cause
        #[source]
        source: NativeError,
    },

    /// Directory enumeration failed after opening
    #[error("cannot read directory '{path}': {source}")]
    ReadDirectory {
        /// Path as text
        path: String,
        /// Native cause
        #[source]
        source: NativeError,
    },

    /// Directory could not be created
    #[error("cannot create directory '{path}': {source}")]
    CreateDirectory {
        /// Path as text
        path: String,
        /// Native cause
        #[source]
        source: NativeError,
    },

    /// Entry could not be removed
    #[error("cannot remove '{path}': {source}")]
    Remove {
        /// Path as text
        path: String,
        /// Native cause
        #[source]
        source: NativeError,
    },

    /// File could not be opened
    #[error("cannot open '{path}': {source}")]
    OpenFile {
        /// Path as text
        path: String,
        /// Native cause
        #[source]
        source: io::Error,
    },

    /// Open mode string was not understood
    #[error("invalid open mode '{mode}'")]
    InvalidMode {
        /// The mode string as given
        mode: String,
    },

    /// Native characters could not be converted to text
    #[error("path '{path}' is not valid Unicode")]
    Encoding {
        /// Path rendered lossily
        path: String,
    },
}

impl FsError {
    /// Portable classification of the underlying failure
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Metadata { source, .. }
            | Self::OpenDirectory { source, .. }
            | Self::ReadDirectory { source, .. }
            | Self::CreateDirectory { source, .. }
            | Self::Remove { source, .. } => source.kind(),
            Self::OpenFile { source, .. } => source.kind(),
            Self::InvalidMode { .. } | Self::Encoding { .. } => io::ErrorKind::InvalidInput,
        }
    }

    /// Whether the failure was caused by a missing entry
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == io::ErrorKind::NotFound
    }
}
