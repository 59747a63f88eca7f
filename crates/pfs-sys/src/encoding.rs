//! Conversion between UTF-8 text and native path characters
//!
//! On byte-string platforms a native path is the UTF-8 byte sequence itself,
//! so every conversion here borrows. On wide-character platforms a native
//! path is UTF-16 and conversion allocates.

use crate::error::{NativeError, Result};
use std::borrow::Cow;
use std::ffi::OsStr;

/// Character unit used by the platform's filesystem calls
#[cfg(unix)]
pub type NativeChar = u8;

/// Character unit used by the platform's filesystem calls
#[cfg(windows)]
pub type NativeChar = u16;

/// Directory separator in native units
#[cfg(unix)]
pub const SEPARATOR: NativeChar = b'/';

/// Directory separator in native units
#[cfg(windows)]
pub const SEPARATOR: NativeChar = b'\\' as NativeChar;

/// Directory separator as UTF-8 text
#[cfg(unix)]
pub const SEPARATOR_STR: &str = "/";

/// Directory separator as UTF-8 text
#[cfg(windows)]
pub const SEPARATOR_STR: &str = "\\";

/// Convert UTF-8 text to native units
///
/// Borrows `text` unchanged on byte-string platforms.
#[cfg(unix)]
#[must_use]
pub fn utf8_to_native(text: &str) -> Cow<'_, [NativeChar]> {
    Cow::Borrowed(text.as_bytes())
}

/// Convert UTF-8 text to native units
///
/// Always allocates a UTF-16 buffer on wide-character platforms.
#[cfg(windows)]
#[must_use]
pub fn utf8_to_native(text: &str) -> Cow<'_, [NativeChar]> {
    Cow::Owned(text.encode_utf16().collect())
}

/// Convert native units to a UTF-8 byte string
///
/// Byte-string platforms return the units as-is without validating them.
///
/// # Errors
///
/// Never fails on byte-string platforms.
#[cfg(unix)]
pub fn native_to_utf8(units: &[NativeChar]) -> Result<Cow<'_, [u8]>> {
    Ok(Cow::Borrowed(units))
}

/// Convert native units to a UTF-8 byte string
///
/// # Errors
///
/// Returns [`NativeError::InvalidUnicode`] if `units` holds an unpaired
/// surrogate.
#[cfg(windows)]
pub fn native_to_utf8(units: &[NativeChar]) -> Result<Cow<'_, [u8]>> {
    String::from_utf16(units)
        .map(|text| Cow::Owned(text.into_bytes()))
        .map_err(|_| NativeError::InvalidUnicode)
}

/// Convert native units to text, replacing anything undecodable with U+FFFD
#[cfg(unix)]
#[must_use]
pub fn native_to_utf8_lossy(units: &[NativeChar]) -> Cow<'_, str> {
    String::from_utf8_lossy(units)
}

/// Convert native units to text, replacing anything undecodable with U+FFFD
#[cfg(windows)]
#[must_use]
pub fn native_to_utf8_lossy(units: &[NativeChar]) -> Cow<'_, str> {
    Cow::Owned(String::from_utf16_lossy(units))
}

/// View native units as an `OsStr` for handing to `std`
#[cfg(unix)]
#[must_use]
pub fn native_to_os(units: &[NativeChar]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(OsStr::from_bytes(units))
}

/// View native units as an `OsStr` for handing to `std`
#[cfg(windows)]
#[must_use]
pub fn native_to_os(units: &[NativeChar]) -> Cow<'_, OsStr> {
    use std::os::windows::ffi::OsStringExt;
    Cow::Owned(std::ffi::OsString::from_wide(units))
}

/// Copy `units` into a NUL-terminated buffer for a native call
///
/// # Errors
///
/// Returns [`NativeError::InteriorNul`] if `units` already contains a NUL.
#[cfg(unix)]
pub(crate) fn to_c_string(units: &[NativeChar]) -> Result<std::ffi::CString> {
    std::ffi::CString::new(units).map_err(|_| NativeError::InteriorNul)
}

/// Copy `units` into a NUL-terminated buffer for a native call
///
/// # Errors
///
/// Returns [`NativeError::InteriorNul`] if `units` already contains a NUL.
#[cfg(windows)]
pub(crate) fn to_wide_nul(units: &[NativeChar]) -> Result<Vec<NativeChar>> {
    if units.contains(&0) {
        return Err(NativeError::InteriorNul);
    }
    let mut wide = Vec::with_capacity(units.len() + 1);
    wide.extend_from_slice(units);
    wide.push(0);
    Ok(wide)
}
