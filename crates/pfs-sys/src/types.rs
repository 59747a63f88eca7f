//! Portable value types shared by stat records and directory streams

use std::fmt;
use std::time::{Duration, SystemTime};

/// Kind of filesystem entry
///
/// Not every platform can report every kind. `Unknown` is a normal value,
/// returned when the native data does not say what the entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Block device
    BlockDevice,
    /// Character device
    CharDevice,
    /// Directory
    Directory,
    /// Named pipe
    Fifo,
    /// Symbolic link (or reparse point on wide-character platforms)
    Symlink,
    /// Regular file
    Regular,
    /// Unix domain socket
    Socket,
    /// Type could not be determined
    Unknown,
}

impl FileType {
    /// Short lowercase name, e.g. `"directory"`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlockDevice => "block device",
            Self::CharDevice => "char device",
            Self::Directory => "directory",
            Self::Fifo => "fifo",
            Self::Symlink => "symlink",
            Self::Regular => "regular",
            Self::Socket => "socket",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point in time as seconds since the Unix epoch plus a nanosecond remainder
///
/// `nanos` is always in `0..1_000_000_000`. Platforms whose native record
/// has no sub-second field report `nanos == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    /// Whole seconds since 1970-01-01T00:00:00Z (negative before the epoch)
    pub secs: i64,
    /// Nanosecond remainder
    pub nanos: u32,
}

impl Timestamp {
    /// Build a timestamp, folding any excess nanoseconds into `secs`
    ///
    /// `secs` saturates at `i64::MAX` rather than overflowing.
    #[must_use]
    pub const fn new(secs: i64, nanos: u32) -> Self {
        Self {
            secs: secs.saturating_add((nanos / 1_000_000_000) as i64),
            nanos: nanos % 1_000_000_000,
        }
    }

    /// Convert to `SystemTime`, handling pre-epoch values
    #[must_use]
    pub fn to_system_time(self) -> SystemTime {
        if self.secs >= 0 {
            SystemTime::UNIX_EPOCH + Duration::new(self.secs.unsigned_abs(), self.nanos)
        } else {
            // secs is floored, so the remainder still moves forward in time
            SystemTime::UNIX_EPOCH - Duration::from_secs(self.secs.unsigned_abs())
                + Duration::from_nanos(u64::from(self.nanos))
        }
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => Self::new(
                i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                after.subsec_nanos(),
            ),
            Err(before) => {
                let before = before.duration();
                let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                match before.subsec_nanos() {
                    0 => Self::new(-secs, 0),
                    nanos => Self::new(-secs - 1, 1_000_000_000 - nanos),
                }
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}
