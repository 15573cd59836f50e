// ── Kstat filesystem reader ──
//
// Discovery and per-pool state reads against the kernel's ZFS kstat
// tree. Both operations are total: discovery yields an empty set when
// the module is not loaded, and a state read folds every failure mode
// into the UNAVAIL sentinel. A pool can vanish between discovery and
// read, so nothing here may assume a path still exists.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::state::{PoolName, PoolState};

/// Where the kernel exposes per-pool statistics.
pub const DEFAULT_BASE: &str = "/proc/spl/kstat/zfs";

/// Marker file that qualifies a kstat subdirectory as a pool.
///
/// The kstat tree holds more than pools (e.g. `dbgmsg`, `fm`); only
/// directories carrying a `state` file represent one.
pub const STATE_FILE: &str = "state";

/// Handle on a kstat tree. Cheap, stateless, safe to call at any
/// frequency — it caches nothing.
#[derive(Debug, Clone)]
pub struct KstatFs {
    base: PathBuf,
}

impl Default for KstatFs {
    fn default() -> Self {
        Self {
            base: PathBuf::from(DEFAULT_BASE),
        }
    }
}

impl KstatFs {
    /// Kstat tree at the kernel's default location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kstat tree rooted elsewhere. Constructor seam for tests; the
    /// shipped binary always uses [`DEFAULT_BASE`].
    pub fn at(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Names of the pools currently present on this system.
    ///
    /// An absent (or non-directory) base is a valid condition — the ZFS
    /// module simply is not loaded — and yields the empty set rather
    /// than an error.
    pub fn discover_pools(&self) -> BTreeSet<PoolName> {
        let mut pools = BTreeSet::new();

        let entries = match fs::read_dir(&self.base) {
            Ok(entries) => entries,
            Err(err) => {
                trace!(base = %self.base.display(), error = %err, "kstat base not readable");
                return pools;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            // No state file means this directory doesn't represent a pool.
            if !path.join(STATE_FILE).is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                pools.insert(PoolName::from(name));
            }
        }

        pools
    }

    /// Current state of `pool`, or the UNAVAIL sentinel if it cannot be
    /// determined (missing file, read error, non-UTF-8 or empty content).
    pub fn read_state(&self, pool: &PoolName) -> PoolState {
        let path = self.base.join(pool.as_str()).join(STATE_FILE);

        match fs::read_to_string(&path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    trace!(pool = %pool, "state file empty");
                    PoolState::unavail()
                } else {
                    PoolState::from(trimmed)
                }
            }
            Err(err) => {
                trace!(pool = %pool, error = %err, "state read failed");
                PoolState::unavail()
            }
        }
    }
}
