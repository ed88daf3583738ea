//! Kernel interface paths and fixed mount parameters.

/// Mount table of the calling process.
pub const PROC_MOUNTS: &str = "/proc/self/mounts";

/// Mount-namespace identity source for the calling process.
pub const PROC_SELF_MOUNTINFO: &str = "/proc/self/mountinfo";

/// Mount-namespace identity source for process 1.
pub const PROC_INIT_MOUNTINFO: &str = "/proc/1/mountinfo";

/// Upper bound on a single mount-table line, in bytes.
pub const MAX_TABLE_LINE: usize = 64 * 1024;

/// 2 MiB huge page size.
pub const HUGE_PAGE_2MIB: i64 = 2 << 20;

/// 1 GiB huge page size.
pub const HUGE_PAGE_1GIB: i64 = 1 << 30;

/// Durability and safety options applied to every ext4 mount: checksummed
/// ordered journaling, write barriers, and read-only remount on error.
pub const EXT4_MOUNT_OPTIONS: &str =
    "journal_checksum,journal_ioprio=0,barrier=1,data=ordered,errors=remount-ro";
