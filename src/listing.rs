//! Directory listing output for `pfs-ls`
//!
//! One line per entry, self and parent references skipped:
//!
//! ```text
//! T|Size|      Last Modification Time      | Filename
//! d 4096 2024-05-01T12:00:00.000000000+0200 src
//! - 123K 2024-05-01T12:00:00.123456789+0200 big.bin
//! ```
//!
//! Timestamps are local time with nanoseconds and UTC offset by default, or
//! UTC to the second when `utc` is set (the default on wide-character
//! platforms).

use crate::dir_iter::DirIter;
use crate::metadata::{FileType, Metadata, Timestamp};
use crate::path::FsPath;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::io::Write;

/// Header line for local timestamps
pub const HEADER_LOCAL: &str = "T|Size|      Last Modification Time      | Filename";

/// Header line for UTC timestamps
pub const HEADER_UTC: &str = "T|Size|   Last Mod Time    | Filename";

/// Unit suffixes, each a factor of 1000 above the previous
const SIZE_SUFFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Header line matching the chosen timestamp rendering
#[must_use]
pub const fn header(utc: bool) -> &'static str {
    if utc {
        HEADER_UTC
    } else {
        HEADER_LOCAL
    }
}

/// Render a byte count in four columns
///
/// Sizes under 10000 print as-is. Larger sizes are divided by 1000 until
/// under 1000 and get a unit suffix.
#[must_use]
pub fn format_size(size: u64) -> String {
    if size < 10_000 {
        return format!("{size:4}");
    }
    let mut scaled = size / 1000;
    let mut unit = 0;
    while scaled >= 1000 && unit < SIZE_SUFFIXES.len() - 1 {
        scaled /= 1000;
        unit += 1;
    }
    format!("{scaled:3}{}", SIZE_SUFFIXES[unit])
}

/// Render a timestamp as ISO-8601
///
/// Falls back to `secs.nanos` if the value is outside chrono's range.
#[must_use]
pub fn format_timestamp(timestamp: Timestamp, utc: bool) -> String {
    if utc {
        DateTime::<Utc>::from_timestamp(timestamp.secs, 0).map_or_else(
            || timestamp.to_string(),
            |time| time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        )
    } else {
        Local
            .timestamp_opt(timestamp.secs, timestamp.nanos)
            .earliest()
            .map_or_else(
                || timestamp.to_string(),
                |time| time.format("%Y-%m-%dT%H:%M:%S%.9f%z").to_string(),
            )
    }
}

/// One-character type column: `d` for directories, `-` otherwise
#[must_use]
pub fn type_flag(file_type: Option<FileType>) -> char {
    match file_type {
        Some(FileType::Directory) => 'd',
        _ => '-',
    }
}

/// Write the header and one line per entry of `dir` to `out`
///
/// # Errors
///
/// Returns an error if the directory cannot be opened or read, an entry's
/// metadata cannot be fetched, or writing to `out` fails.
pub fn list_directory<W: Write>(dir: &FsPath<'_>, utc: bool, out: &mut W) -> Result<()> {
    let mut iter = DirIter::open(dir)?;
    writeln!(out, "{}", header(utc))?;

    while iter.advance()? {
        let Some(name) = iter.current_name() else {
            continue;
        };
        if name.is_dot_or_dotdot() {
            continue;
        }
        let entry_path = dir.join(&name);
        let metadata = Metadata::fetch(&entry_path)
            .with_context(|| format!("Failed to list entry {name}"))?;

        writeln!(
            out,
            "{} {} {} {}",
            type_flag(iter.current_type()),
            format_size(metadata.size()),
            format_timestamp(metadata.modified(), utc),
            name.to_text_lossy()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case(0, "   0")]
    #[case(42, "  42")]
    #[case(9_999, "9999")]
    #[case(10_000, " 10K")]
    #[case(999_999, "999K")]
    #[case(1_000_000, "  1M")]
    #[case(123_456_789, "123M")]
    #[case(5_000_000_000, "  5G")]
    #[case(u64::MAX, " 18E")]
    fn test_format_size(#[case] size: u64, #[case] expected: &str) {
        assert_eq!(format_size(size), expected);
    }

    #[test]
    fn test_format_timestamp_utc() {
        let ts = Timestamp::new(1_700_000_000, 123_456_789);
        assert_eq!(format_timestamp(ts, true), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_format_timestamp_local_keeps_nanos() {
        let ts = Timestamp::new(1_700_000_000, 123_456_789);
        let rendered = format_timestamp(ts, false);
        assert!(rendered.contains(".123456789"), "{rendered}");
        // Offset is +HHMM or -HHMM
        let offset = &rendered[rendered.len() - 5..];
        assert!(offset.starts_with('+') || offset.starts_with('-'), "{rendered}");
        assert_eq!(rendered.len(), "YYYY-MM-DDTHH:MM:SS.000000000+0000".len());
    }

    #[test]
    fn test_type_flag() {
        assert_eq!(type_flag(Some(FileType::Directory)), 'd');
        assert_eq!(type_flag(Some(FileType::Regular)), '-');
        assert_eq!(type_flag(Some(FileType::Unknown)), '-');
        assert_eq!(type_flag(None), '-');
    }

    #[test]
    fn test_list_directory_output() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("small.txt"), b"hello").unwrap();
        std::fs::write(temp_dir.path().join("big.bin"), vec![0u8; 20_000]).unwrap();

        let dir = FsPath::new(temp_dir.path().to_str().unwrap());
        let mut out = Vec::new();
        list_directory(&dir, true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER_UTC));
        let mut entries: Vec<&str> = lines.collect();
        entries.sort_by_key(|line| line.rsplit(' ').next().map(str::to_owned));
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with("-  20K "), "{}", entries[0]);
        assert!(entries[0].ends_with(" big.bin"));
        assert!(entries[1].starts_with("-    5 "), "{}", entries[1]);
        assert!(entries[1].ends_with(" small.txt"));
        assert!(!text.contains(" .\n") && !text.contains(" ..\n"));
    }

    #[test]
    fn test_list_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let mut out = Vec::new();
        assert!(list_directory(&FsPath::new(missing.to_str().unwrap()), true, &mut out).is_err());
        assert!(out.is_empty());
    }
}
