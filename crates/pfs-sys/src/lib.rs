//! # pfs-sys
//!
//! Native filesystem primitives behind `portable-fs`.
//!
//! Each primitive has exactly two implementations selected at compile time:
//! - **Byte-string platforms** (`cfg(unix)`): `libc`/`nix` calls on
//!   NUL-terminated byte paths (`stat`, `opendir`/`readdir`/`closedir`,
//!   `mkdir`, `remove`).
//! - **Wide-character platforms** (`cfg(windows)`): `windows-sys` calls on
//!   NUL-terminated UTF-16 paths (`GetFileAttributesExW`,
//!   `FindFirstFileW`/`FindNextFileW`/`FindClose`, `CreateDirectoryW`,
//!   `RemoveDirectoryW`/`DeleteFileW`).
//!
//! Everything here works in [`NativeChar`] units. Conversion to and from
//! UTF-8 happens only in [`encoding`], at the API boundary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pfs_sys::{encoding, stat};
//!
//! # fn example() -> pfs_sys::Result<()> {
//! let path = encoding::utf8_to_native("/tmp");
//! let st = stat::stat(&path)?;
//! println!("{:?} {} bytes", st.file_type(), st.size());
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(unix, windows)))]
compile_error!("pfs-sys supports only unix and windows targets");

pub mod directory;
pub mod encoding;
pub mod error;
pub mod ops;
pub mod stat;
pub mod types;

pub use directory::DirStream;
pub use encoding::{NativeChar, SEPARATOR};
pub use error::{NativeError, Result};
pub use stat::NativeStat;
pub use types::{FileType, Timestamp};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
