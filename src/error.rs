//! Error types for mount-table parsing, classification, and mount syscalls.
//!
//! Argument violations are reported as [`MountError::InvalidArgument`]
//! before any syscall is issued; nothing is retried or clamped internally.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by mountkit operations.
#[derive(Debug, Error)]
pub enum MountError {
    /// A mount-table line did not have the expected shape.
    #[error("malformed mount table at line {line}: {reason}")]
    MalformedTable {
        /// 1-based line number within the table.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// An I/O operation on a pseudo-file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A `statfs(2)` classification query could not be performed.
    #[error("statfs failed for {path}: {source}")]
    PathUnreadable {
        /// Path that could not be queried.
        path: PathBuf,
        /// Underlying errno.
        source: nix::Error,
    },

    /// The caller passed an argument the kernel would never accept.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// The kernel rejected a mount, remount, or unmount.
    #[error("{operation} failed for {path}: {source}")]
    OperationFailed {
        /// Name of the operation that failed.
        operation: &'static str,
        /// Target path of the operation.
        path: PathBuf,
        /// Underlying errno.
        source: nix::Error,
    },

    /// The mount-namespace identity of this process could not be determined.
    #[error("mount namespace identity unknown: {reason}")]
    NamespaceUnknown {
        /// Why the identity comparison was impossible.
        reason: String,
    },

    /// The process still shares the initial mount namespace.
    #[error("process shares the initial mount namespace")]
    NotIsolated,

    /// The operation is not available on this platform.
    #[error("unsupported platform: {message}")]
    Unsupported {
        /// Description of the missing platform support.
        message: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MountError>;
