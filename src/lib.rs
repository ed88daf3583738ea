//! # mountkit
//!
//! Typed Linux mount-table inspection and privileged mount operations.
//!
//! This crate provides safe abstractions over three kernel interfaces:
//! - **Mount table**: line-based enumeration of `/proc/self/mounts`.
//! - **Classification**: `statfs(2)` magic-number checks for a path's
//!   backing filesystem.
//! - **Mount operations**: `mount(2)`/`umount2(2)` with fixed, vetted flag
//!   sets for tmpfs, hugetlbfs, ext4, read-only remounts, and
//!   mount-namespace propagation control.
//!
//! Every operation is synchronous, holds no shared state, and surfaces
//! kernel failures as typed [`error::MountError`] values. Mount operations
//! require `CAP_SYS_ADMIN`; enumeration and classification do not.

pub mod constants;
pub mod error;
pub mod magic;
pub mod namespace;
pub mod ops;
pub mod probe;
pub mod table;

pub use error::{MountError, Result};
pub use magic::FilesystemKind;
pub use table::{MountEntry, list_mounts};
