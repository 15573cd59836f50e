// zpoolmon-kstat: Read-only access layer for the ZFS kstat pseudo-filesystem.
//
// The kernel exposes one directory per imported pool under
// `/proc/spl/kstat/zfs/`, each carrying a small `state` file with the
// pool's health as plain text. This crate owns the domain value types
// and the two filesystem operations everything else is built on:
// discovering which pools exist, and reading one pool's state.

pub mod fs;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use fs::{DEFAULT_BASE, KstatFs, STATE_FILE};
pub use state::{PoolHealth, PoolName, PoolState};
