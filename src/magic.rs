//! Filesystem magic numbers as reported by `statfs(2)`.
//!
//! The values mirror `<linux/magic.h>` but are fixed constants here, so
//! classification does not depend on the build host's kernel headers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `TMPFS_MAGIC` from `<linux/magic.h>`.
pub const TMPFS_MAGIC: i64 = 0x0102_1994;

/// `HUGETLBFS_MAGIC` from `<linux/magic.h>`.
pub const HUGETLBFS_MAGIC: i64 = 0x9584_58F6;

/// `BTRFS_SUPER_MAGIC` from `<linux/magic.h>`.
pub const BTRFS_SUPER_MAGIC: i64 = 0x9123_683E;

/// `EXT4_SUPER_MAGIC` from `<linux/magic.h>` (shared with ext2/ext3).
pub const EXT4_SUPER_MAGIC: i64 = 0xEF53;

/// Filesystem types this crate can classify and mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilesystemKind {
    /// RAM-backed temporary filesystem.
    Tmpfs,
    /// Filesystem backed by huge memory pages.
    Hugetlbfs,
    /// Btrfs copy-on-write filesystem.
    Btrfs,
    /// Ext4 journaling filesystem.
    Ext4,
}

impl FilesystemKind {
    /// Returns the kernel magic number for this filesystem type.
    #[must_use]
    pub const fn magic(self) -> i64 {
        match self {
            Self::Tmpfs => TMPFS_MAGIC,
            Self::Hugetlbfs => HUGETLBFS_MAGIC,
            Self::Btrfs => BTRFS_SUPER_MAGIC,
            Self::Ext4 => EXT4_SUPER_MAGIC,
        }
    }

    /// Returns the filesystem type name as used in the mount table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tmpfs => "tmpfs",
            Self::Hugetlbfs => "hugetlbfs",
            Self::Btrfs => "btrfs",
            Self::Ext4 => "ext4",
        }
    }
}

impl fmt::Display for FilesystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_values_match_linux_magic_h() {
        assert_eq!(FilesystemKind::Tmpfs.magic(), 0x0102_1994);
        assert_eq!(FilesystemKind::Hugetlbfs.magic(), 0x9584_58F6);
        assert_eq!(FilesystemKind::Btrfs.magic(), 0x9123_683E);
        assert_eq!(FilesystemKind::Ext4.magic(), 0xEF53);
    }

    #[test]
    fn display_uses_mount_table_names() {
        assert_eq!(FilesystemKind::Tmpfs.to_string(), "tmpfs");
        assert_eq!(FilesystemKind::Hugetlbfs.to_string(), "hugetlbfs");
        assert_eq!(FilesystemKind::Btrfs.to_string(), "btrfs");
        assert_eq!(FilesystemKind::Ext4.to_string(), "ext4");
    }
}
