//! Encoding-aware path representation
//!
//! A [`FsPath`] holds a location in native character units: UTF-8 bytes on
//! byte-string platforms, UTF-16 units on wide-character platforms. It is
//! either borrowed (a view into caller or iterator memory) or owned
//! (allocated here and released on drop).
//!
//! Construction from text borrows on byte-string platforms and allocates on
//! wide-character platforms, so conversion cost is paid once at the API
//! boundary.

use crate::error::{FsError, Result};
use pfs_sys::encoding::{self, NativeChar, SEPARATOR};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// Filesystem location in native character units
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FsPath<'a> {
    units: Cow<'a, [NativeChar]>,
}

impl<'a> FsPath<'a> {
    /// Build a path from UTF-8 text
    ///
    /// Borrows `text` unchanged on byte-string platforms; converts to an
    /// owned UTF-16 buffer on wide-character platforms.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            units: encoding::utf8_to_native(text),
        }
    }

    /// Borrow native units as a path
    #[must_use]
    pub const fn from_native(units: &'a [NativeChar]) -> Self {
        Self {
            units: Cow::Borrowed(units),
        }
    }

    /// Take ownership of native units as a path
    #[must_use]
    pub fn from_native_owned(units: Vec<NativeChar>) -> FsPath<'static> {
        FsPath {
            units: Cow::Owned(units),
        }
    }

    /// Native units, suitable for handing to `pfs_sys`
    #[must_use]
    pub fn as_native(&self) -> &[NativeChar] {
        &self.units
    }

    /// Length in native character units
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the path has no characters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether this path owns its buffer
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        matches!(self.units, Cow::Owned(_))
    }

    /// Detach from whatever this path borrows, copying if needed
    #[must_use]
    pub fn into_owned(self) -> FsPath<'static> {
        FsPath::from_native_owned(self.units.into_owned())
    }

    /// Convert to a UTF-8 byte string
    ///
    /// Borrows on byte-string platforms; allocates on wide-character
    /// platforms.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Encoding`] if the native units hold an unpaired
    /// surrogate (wide-character platforms only).
    pub fn to_text(&self) -> Result<Cow<'_, [u8]>> {
        encoding::native_to_utf8(&self.units).map_err(|_| FsError::Encoding {
            path: self.to_text_lossy().into_owned(),
        })
    }

    /// Convert to text, replacing anything undecodable with U+FFFD
    #[must_use]
    pub fn to_text_lossy(&self) -> Cow<'_, str> {
        encoding::native_to_utf8_lossy(&self.units)
    }

    /// Convert to an `OsString` for use with `std::fs`
    #[must_use]
    pub fn to_os_string(&self) -> OsString {
        encoding::native_to_os(&self.units).into_owned()
    }

    /// View as an `OsStr`, borrowing where the platform allows
    #[must_use]
    pub fn to_os_str(&self) -> Cow<'_, OsStr> {
        encoding::native_to_os(&self.units)
    }

    /// Whether this is a bare self (`.`) or parent (`..`) reference
    #[must_use]
    pub fn is_dot_or_dotdot(&self) -> bool {
        let dot = NativeChar::from(b'.');
        match *self.units {
            [c] => c == dot,
            [a, b] => a == dot && b == dot,
            _ => false,
        }
    }

    /// Join `other` onto this path
    ///
    /// A separator is inserted only when both sides are non-empty, so
    /// joining with an empty component yields a copy of the other one.
    #[must_use]
    pub fn join(&self, other: &FsPath<'_>) -> FsPath<'static> {
        let mut units = Vec::with_capacity(self.len() + other.len() + 1);
        units.extend_from_slice(&self.units);
        if !self.is_empty() && !other.is_empty() {
            units.push(SEPARATOR);
        }
        units.extend_from_slice(&other.units);
        FsPath::from_native_owned(units)
    }
}

impl<'a> From<&'a str> for FsPath<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for FsPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text_lossy())
    }
}

impl fmt::Debug for FsPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsPath")
            .field("text", &self.to_text_lossy())
            .field("owned", &self.is_owned())
            .finish()
    }
}
