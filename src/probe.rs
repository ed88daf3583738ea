//! Filesystem classification via `statfs(2)` magic numbers.
//!
//! Every query is a single syscall against the live mount; repeated calls on
//! an unchanged mount return the same result. Failures propagate as
//! [`MountError::PathUnreadable`] and are never retried.

use std::path::Path;

use crate::error::Result;
use crate::magic::FilesystemKind;

/// Queries the filesystem magic number backing `path`.
///
/// # Errors
///
/// Returns [`MountError::PathUnreadable`] if the `statfs(2)` call fails.
///
/// [`MountError::PathUnreadable`]: crate::error::MountError::PathUnreadable
#[cfg(target_os = "linux")]
fn filesystem_magic(path: &Path) -> Result<i64> {
    let stat = nix::sys::statfs::statfs(path).map_err(|e| {
        crate::error::MountError::PathUnreadable {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    // fs_type_t is a signed or unsigned word depending on the libc target.
    #[allow(clippy::unnecessary_cast, clippy::cast_possible_wrap)]
    let magic = stat.filesystem_type().0 as i64;
    Ok(magic)
}

/// Stub for non-Linux platforms.
#[cfg(not(target_os = "linux"))]
fn filesystem_magic(_path: &Path) -> Result<i64> {
    Err(crate::error::MountError::Unsupported {
        message: "Linux required for statfs classification".into(),
    })
}

/// Returns whether `path` is backed by a filesystem of the given kind.
///
/// # Errors
///
/// Returns an error if the classification query cannot be performed.
pub fn is_filesystem_type(path: &Path, kind: FilesystemKind) -> Result<bool> {
    Ok(filesystem_magic(path)? == kind.magic())
}

/// Returns whether `path` is backed by a pure in-memory filesystem
/// (tmpfs or hugetlbfs).
///
/// # Errors
///
/// Returns an error if the classification query cannot be performed.
pub fn is_memory_backed(path: &Path) -> Result<bool> {
    let magic = filesystem_magic(path)?;
    Ok(magic == FilesystemKind::Tmpfs.magic() || magic == FilesystemKind::Hugetlbfs.magic())
}

/// Returns whether `path` is on a tmpfs filesystem.
///
/// # Errors
///
/// Returns an error if the classification query cannot be performed.
pub fn is_tmpfs(path: &Path) -> Result<bool> {
    is_filesystem_type(path, FilesystemKind::Tmpfs)
}

/// Returns whether `path` is on a hugetlbfs filesystem.
///
/// # Errors
///
/// Returns an error if the classification query cannot be performed.
pub fn is_hugetlbfs(path: &Path) -> Result<bool> {
    is_filesystem_type(path, FilesystemKind::Hugetlbfs)
}

/// Returns whether `path` is on a btrfs filesystem.
///
/// # Errors
///
/// Returns an error if the classification query cannot be performed.
pub fn is_btrfs(path: &Path) -> Result<bool> {
    is_filesystem_type(path, FilesystemKind::Btrfs)
}

/// Returns whether `path` is on an ext4 filesystem.
///
/// # Errors
///
/// Returns an error if the classification query cannot be performed.
pub fn is_ext4(path: &Path) -> Result<bool> {
    is_filesystem_type(path, FilesystemKind::Ext4)
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::error::MountError;

    #[test]
    fn nonexistent_path_is_unreadable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("does-not-exist");
        let err = is_tmpfs(&missing).expect_err("missing path must fail");
        assert!(matches!(err, MountError::PathUnreadable { .. }));
    }

    #[test]
    fn classification_is_idempotent() {
        let first = is_memory_backed(Path::new("/")).expect("statfs on /");
        let second = is_memory_backed(Path::new("/")).expect("statfs on /");
        assert_eq!(first, second);
    }

    #[test]
    fn proc_is_not_a_mountable_kind() {
        for kind in [
            FilesystemKind::Tmpfs,
            FilesystemKind::Hugetlbfs,
            FilesystemKind::Btrfs,
            FilesystemKind::Ext4,
        ] {
            let matched = is_filesystem_type(Path::new("/proc"), kind).expect("statfs on /proc");
            assert!(!matched, "/proc should not classify as {kind}");
        }
    }
}
