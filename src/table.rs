//! Mount-table enumeration via `/proc/self/mounts`.
//!
//! Each table line carries five space-separated fields: device, mountpoint,
//! filesystem type, options, and the dump/pass placeholders. Fields with
//! embedded spaces are kept in their kernel-escaped form (`\040` etc.).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TABLE_LINE, PROC_MOUNTS};
use crate::error::{MountError, Result};

/// One row of the mount table, an immutable snapshot taken at enumeration
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Device or pseudo-device backing the mount.
    pub device: String,
    /// Path the filesystem is mounted at.
    pub path: PathBuf,
    /// Filesystem type name as reported by the kernel.
    pub filesystem: String,
    /// Comma-separated mount options, unparsed.
    pub options: String,
}

/// Enumerates the active mounts of the calling process, in table order.
///
/// # Errors
///
/// Returns [`MountError::Io`] if the mount table cannot be read and
/// [`MountError::MalformedTable`] for any line that does not carry the
/// expected five fields or exceeds [`MAX_TABLE_LINE`] bytes.
pub fn list_mounts() -> Result<Vec<MountEntry>> {
    let path = Path::new(PROC_MOUNTS);
    let file = File::open(path).map_err(|e| MountError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let entries = parse_table(BufReader::new(file), path)?;
    tracing::debug!(count = entries.len(), "enumerated mount table");
    Ok(entries)
}

/// Parses an entire mount table from a buffered reader.
///
/// `origin` names the table source in I/O errors.
fn parse_table<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<MountEntry>> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| MountError::Io {
            path: origin.to_path_buf(),
            source: e,
        })?;
        entries.push(parse_line(&line, index + 1)?);
    }
    Ok(entries)
}

/// Parses a single mount-table line into a [`MountEntry`].
fn parse_line(line: &str, number: usize) -> Result<MountEntry> {
    if line.len() > MAX_TABLE_LINE {
        return Err(MountError::MalformedTable {
            line: number,
            reason: format!("line exceeds {MAX_TABLE_LINE} bytes"),
        });
    }
    let mut fields = line.splitn(5, ' ');
    let (Some(device), Some(path), Some(filesystem), Some(options), Some(_rest)) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(MountError::MalformedTable {
            line: number,
            reason: "expected 5 space-separated fields".into(),
        });
    };
    Ok(MountEntry {
        device: device.to_string(),
        path: PathBuf::from(path),
        filesystem: filesystem.to_string(),
        options: options.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::io::Cursor;

    use super::*;

    #[test]
    fn parse_line_keeps_fields_in_order() {
        let entry = parse_line("/dev/sda1 / ext4 rw,relatime,errors=remount-ro 0 0", 1)
            .expect("well-formed line");
        assert_eq!(entry.device, "/dev/sda1");
        assert_eq!(entry.path, PathBuf::from("/"));
        assert_eq!(entry.filesystem, "ext4");
        assert_eq!(entry.options, "rw,relatime,errors=remount-ro");
    }

    #[test]
    fn parse_line_rejects_four_fields() {
        let err = parse_line("tmpfs /dev/shm tmpfs rw,nosuid", 3)
            .expect_err("four fields must fail");
        assert!(matches!(err, MountError::MalformedTable { line: 3, .. }));
    }

    #[test]
    fn parse_line_rejects_empty_line() {
        let err = parse_line("", 1).expect_err("empty line must fail");
        assert!(matches!(err, MountError::MalformedTable { line: 1, .. }));
    }

    #[test]
    fn parse_line_rejects_overlong_line() {
        let options = "x".repeat(MAX_TABLE_LINE);
        let line = format!("tmpfs /tmp tmpfs {options} 0 0");
        let err = parse_line(&line, 7).expect_err("overlong line must fail");
        assert!(matches!(err, MountError::MalformedTable { line: 7, .. }));
    }

    #[test]
    fn parse_table_preserves_table_order() {
        let table = "\
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
tmpfs /dev/shm tmpfs rw,nosuid,nodev 0 0
/dev/sda1 / ext4 rw,relatime 0 0
";
        let entries =
            parse_table(Cursor::new(table), Path::new("test")).expect("well-formed table");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].filesystem, "proc");
        assert_eq!(entries[1].path, PathBuf::from("/dev/shm"));
        assert_eq!(entries[2].device, "/dev/sda1");
    }

    #[test]
    fn parse_table_reports_offending_line_number() {
        let table = "\
proc /proc proc rw 0 0
broken line
";
        let err =
            parse_table(Cursor::new(table), Path::new("test")).expect_err("short line must fail");
        assert!(matches!(err, MountError::MalformedTable { line: 2, .. }));
    }

    #[test]
    fn entry_serializes_roundtrip() {
        let entry = parse_line("tmpfs /run tmpfs rw,nosuid,nodev,mode=755 0 0", 1)
            .expect("well-formed line");
        let json = serde_json::to_string(&entry).expect("serialize");
        let back: MountEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, entry);
    }
}
