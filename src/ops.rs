//! Privileged mount, remount, and unmount operations.
//!
//! Every operation issues exactly one `mount(2)` or `umount2(2)` call with a
//! fixed flag set and surfaces kernel failures wrapped with the operation
//! name and target path. Arguments are validated before any syscall;
//! nothing is retried and no argument is silently clamped.

use std::path::Path;

use crate::error::{MountError, Result};

#[cfg(target_os = "linux")]
use crate::constants::{EXT4_MOUNT_OPTIONS, HUGE_PAGE_1GIB, HUGE_PAGE_2MIB};
#[cfg(not(target_os = "linux"))]
use crate::constants::{HUGE_PAGE_1GIB, HUGE_PAGE_2MIB};

fn ensure_size(operation: &str, size_bytes: i64) -> Result<()> {
    if size_bytes < 0 {
        return Err(MountError::InvalidArgument {
            message: format!("{operation}: negative size {size_bytes}"),
        });
    }
    Ok(())
}

fn ensure_page_size(page_size: i64) -> Result<()> {
    if page_size != HUGE_PAGE_2MIB && page_size != HUGE_PAGE_1GIB {
        return Err(MountError::InvalidArgument {
            message: format!(
                "mount_hugetlbfs: unsupported page size {page_size}, \
                 expected {HUGE_PAGE_2MIB} or {HUGE_PAGE_1GIB}"
            ),
        });
    }
    Ok(())
}

/// Mounts a tmpfs bounded by `size_bytes` at `path`.
///
/// The mount carries `noatime,silent,nodev,noexec,nosuid`.
///
/// # Errors
///
/// Returns [`MountError::InvalidArgument`] for a negative size (checked
/// before the syscall) and [`MountError::OperationFailed`] if the kernel
/// rejects the mount.
#[cfg(target_os = "linux")]
pub fn mount_tmpfs(path: &Path, size_bytes: i64) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    ensure_size("mount_tmpfs", size_bytes)?;
    let flags = MsFlags::MS_NOATIME
        | MsFlags::MS_SILENT
        | MsFlags::MS_NODEV
        | MsFlags::MS_NOEXEC
        | MsFlags::MS_NOSUID;
    let options = format!("size={size_bytes}");
    mount(
        Some("tmpfs"),
        path,
        Some("tmpfs"),
        flags,
        Some(options.as_str()),
    )
    .map_err(|e| MountError::OperationFailed {
        operation: "mount_tmpfs",
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), size_bytes, "tmpfs mounted");
    Ok(())
}

/// Mounts a hugetlbfs bounded by `size_bytes` at `path`, using pages of
/// `page_size` bytes.
///
/// # Errors
///
/// Returns [`MountError::InvalidArgument`] unless `page_size` is exactly
/// 2 MiB or 1 GiB and `size_bytes` is non-negative, and
/// [`MountError::OperationFailed`] if the kernel rejects the mount.
#[cfg(target_os = "linux")]
pub fn mount_hugetlbfs(path: &Path, page_size: i64, size_bytes: i64) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    ensure_page_size(page_size)?;
    ensure_size("mount_hugetlbfs", size_bytes)?;
    let flags =
        MsFlags::MS_NOATIME | MsFlags::MS_NODEV | MsFlags::MS_NOEXEC | MsFlags::MS_NOSUID;
    let options = format!("pagesize={page_size},size={size_bytes}");
    mount(
        Some("hugetlbfs"),
        path,
        Some("hugetlbfs"),
        flags,
        Some(options.as_str()),
    )
    .map_err(|e| MountError::OperationFailed {
        operation: "mount_hugetlbfs",
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), page_size, size_bytes, "hugetlbfs mounted");
    Ok(())
}

/// Atomically remounts the filesystem on `device` at `path` as read-only.
///
/// # Errors
///
/// Returns [`MountError::OperationFailed`] if the kernel rejects the
/// remount.
#[cfg(target_os = "linux")]
pub fn remount_read_only(device: &Path, path: &Path) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    mount(
        Some(device),
        path,
        None::<&str>,
        MsFlags::MS_RDONLY | MsFlags::MS_REMOUNT,
        None::<&str>,
    )
    .map_err(|e| MountError::OperationFailed {
        operation: "remount_read_only",
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(device = %device.display(), path = %path.display(), "remounted read-only");
    Ok(())
}

/// Mounts the ext4 volume on `device` at `path` with fixed durability
/// options ([`EXT4_MOUNT_OPTIONS`]).
///
/// `read_only` adds `MS_RDONLY`; `synchronous` forces synchronous file and
/// directory I/O.
///
/// # Errors
///
/// Returns [`MountError::OperationFailed`] if the kernel rejects the mount.
#[cfg(target_os = "linux")]
pub fn mount_ext4(device: &Path, path: &Path, read_only: bool, synchronous: bool) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    let mut flags = MsFlags::MS_NOATIME
        | MsFlags::MS_SILENT
        | MsFlags::MS_NODEV
        | MsFlags::MS_NOEXEC
        | MsFlags::MS_NOSUID;
    if read_only {
        flags |= MsFlags::MS_RDONLY;
    }
    if synchronous {
        flags |= MsFlags::MS_SYNCHRONOUS | MsFlags::MS_DIRSYNC;
    }
    mount(
        Some(device),
        path,
        Some("ext4"),
        flags,
        Some(EXT4_MOUNT_OPTIONS),
    )
    .map_err(|e| MountError::OperationFailed {
        operation: "mount_ext4",
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(
        device = %device.display(),
        path = %path.display(),
        read_only,
        synchronous,
        "ext4 mounted"
    );
    Ok(())
}

/// Lazily detaches the mount at `path` via `umount2(MNT_DETACH)`.
///
/// # Errors
///
/// Returns [`MountError::OperationFailed`] if the kernel rejects the
/// unmount.
#[cfg(target_os = "linux")]
pub fn unmount(path: &Path) -> Result<()> {
    nix::mount::umount2(path, nix::mount::MntFlags::MNT_DETACH).map_err(|e| {
        MountError::OperationFailed {
            operation: "unmount",
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    tracing::debug!(path = %path.display(), "unmounted");
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn unsupported() -> MountError {
    MountError::Unsupported {
        message: "Linux required for mount operations".into(),
    }
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error after argument validation — tmpfs mounting
/// requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn mount_tmpfs(_path: &Path, size_bytes: i64) -> Result<()> {
    ensure_size("mount_tmpfs", size_bytes)?;
    Err(unsupported())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error after argument validation — hugetlbfs mounting
/// requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn mount_hugetlbfs(_path: &Path, page_size: i64, size_bytes: i64) -> Result<()> {
    ensure_page_size(page_size)?;
    ensure_size("mount_hugetlbfs", size_bytes)?;
    Err(unsupported())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — remounting requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn remount_read_only(_device: &Path, _path: &Path) -> Result<()> {
    Err(unsupported())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — ext4 mounting requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn mount_ext4(_device: &Path, _path: &Path, _read_only: bool, _synchronous: bool) -> Result<()> {
    Err(unsupported())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — unmounting requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn unmount(_path: &Path) -> Result<()> {
    Err(unsupported())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::constants::{HUGE_PAGE_1GIB, HUGE_PAGE_2MIB};

    #[test]
    fn tmpfs_rejects_negative_size_before_syscall() {
        let err = mount_tmpfs(Path::new("/nonexistent-target"), -1)
            .expect_err("negative size must fail");
        assert!(matches!(err, MountError::InvalidArgument { .. }));
    }

    #[test]
    fn hugetlbfs_rejects_unsupported_page_sizes() {
        for page_size in [0, 4096, HUGE_PAGE_2MIB - 1, HUGE_PAGE_1GIB + 1, -1] {
            let err = mount_hugetlbfs(Path::new("/nonexistent-target"), page_size, 0)
                .expect_err("unsupported page size must fail");
            assert!(
                matches!(err, MountError::InvalidArgument { .. }),
                "page size {page_size} should be rejected as invalid"
            );
        }
    }

    #[test]
    fn hugetlbfs_rejects_negative_size() {
        let err = mount_hugetlbfs(Path::new("/nonexistent-target"), HUGE_PAGE_2MIB, -1)
            .expect_err("negative size must fail");
        assert!(matches!(err, MountError::InvalidArgument { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unprivileged_tmpfs_mount_reports_operation_and_path() {
        // Valid arguments against a target we cannot mount on without
        // CAP_SYS_ADMIN (or that does not exist) must come back as a kernel
        // failure, not a validation failure.
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("shm");
        std::fs::create_dir(&target).expect("mkdir");
        if let Err(err) = mount_tmpfs(&target, 1 << 20) {
            assert!(matches!(
                err,
                MountError::OperationFailed {
                    operation: "mount_tmpfs",
                    ..
                }
            ));
        } else {
            // Running privileged: undo the mount.
            unmount(&target).expect("unmount");
        }
    }
}
