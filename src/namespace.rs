//! Mount-namespace identity checks and propagation control.
//!
//! A process in its own mount namespace sees a mount table distinct from
//! process 1's. The check compares the first `mountinfo` line of both; equal
//! lines mean the namespace is shared.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::constants::{PROC_INIT_MOUNTINFO, PROC_SELF_MOUNTINFO};
use crate::error::{MountError, Result};

/// Reads the first line of a mountinfo pseudo-file.
fn identity_line(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| MountError::NamespaceUnknown {
        reason: format!("cannot open {}: {e}", path.display()),
    })?;
    let mut line = String::new();
    let _ = BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| MountError::NamespaceUnknown {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
    Ok(line.trim_end_matches('\n').to_string())
}

/// Compares two mountinfo identity lines.
fn identities_differ(init_line: &str, self_line: &str) -> Result<bool> {
    if init_line.is_empty() || self_line.is_empty() {
        return Err(MountError::NamespaceUnknown {
            reason: "empty mountinfo identity line".into(),
        });
    }
    Ok(init_line != self_line)
}

/// Returns whether the calling process occupies a mount namespace separate
/// from process 1's.
///
/// # Errors
///
/// Returns [`MountError::NamespaceUnknown`] if either identity cannot be
/// read.
#[cfg(target_os = "linux")]
pub fn in_mount_namespace() -> Result<bool> {
    let init_line = identity_line(Path::new(PROC_INIT_MOUNTINFO))?;
    let self_line = identity_line(Path::new(PROC_SELF_MOUNTINFO))?;
    identities_differ(&init_line, &self_line)
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — mount namespaces require Linux.
#[cfg(not(target_os = "linux"))]
pub fn in_mount_namespace() -> Result<bool> {
    Err(MountError::Unsupported {
        message: "Linux required for mount namespaces".into(),
    })
}

/// Disables shared mount propagation for a process that already occupies
/// its own mount namespace.
///
/// The isolation precondition is verified first; a process still sharing
/// the initial namespace never proceeds to the propagation change.
///
/// # Errors
///
/// Returns [`MountError::NotIsolated`] if the process shares process 1's
/// mount namespace, [`MountError::NamespaceUnknown`] if that cannot be
/// determined, and [`MountError::OperationFailed`] if the propagation
/// remount fails.
#[cfg(target_os = "linux")]
pub fn establish_mount_namespace() -> Result<()> {
    use nix::mount::{MsFlags, mount};

    if !in_mount_namespace()? {
        return Err(MountError::NotIsolated);
    }
    mount(
        Some("none"),
        "/",
        Some("none"),
        MsFlags::MS_REC | MsFlags::MS_PRIVATE,
        None::<&str>,
    )
    .map_err(|e| MountError::OperationFailed {
        operation: "establish_mount_namespace",
        path: Path::new("/").to_path_buf(),
        source: e,
    })?;
    tracing::info!("mount propagation set to private");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — mount namespaces require Linux.
#[cfg(not(target_os = "linux"))]
pub fn establish_mount_namespace() -> Result<()> {
    Err(MountError::Unsupported {
        message: "Linux required for mount namespaces".into(),
    })
}
