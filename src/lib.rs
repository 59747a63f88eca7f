//! # portable-fs
//!
//! One filesystem interface over two incompatible native APIs: byte-string
//! calls on unix and wide-character calls on windows.
//!
//! ## Modules
//!
//! - [`path`]: [`FsPath`], a borrowed or owned path in native units
//! - [`join`]: text-level joining with no doubled or dangling separators
//! - [`metadata`]: [`Metadata`] snapshots and the `exists`/`is_*` predicates
//! - [`dir_iter`]: [`DirIter`], one create/advance/drop state machine for
//!   both enumeration protocols
//! - [`ops`]: create one directory, remove one entry, open a file
//! - [`recursive`]: fail-fast depth-first [`remove_recursive`]
//! - [`listing`]: output formatting for the `pfs-ls` tool
//!
//! Native calls live in the `pfs-sys` crate. Everything here is synchronous;
//! a [`DirIter`] or [`FsPath`] must not be shared across threads without
//! external locking.
//!
//! ## Example
//!
//! ```rust,no_run
//! use portable_fs::{DirIter, FsPath, Metadata};
//!
//! # fn example() -> portable_fs::Result<()> {
//! let dir = FsPath::new("/tmp");
//! let mut iter = DirIter::open(&dir)?;
//! while iter.advance()? {
//!     let Some(name) = iter.current_name() else { continue };
//!     if name.is_dot_or_dotdot() {
//!         continue;
//!     }
//!     let metadata = Metadata::fetch(&dir.join(&name))?;
//!     println!("{name}: {} bytes", metadata.size());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod dir_iter;
pub mod error;
pub mod join;
pub mod listing;
pub mod metadata;
pub mod ops;
pub mod path;
pub mod recursive;

pub use dir_iter::DirIter;
pub use error::{FsError, Result};
pub use join::{join, join2};
pub use metadata::{exists, is_directory, is_file, symlink_metadata, FileType, Metadata, Timestamp};
pub use ops::{create_directory, open, remove, OpenMode};
pub use path::FsPath;
pub use recursive::remove_recursive;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
