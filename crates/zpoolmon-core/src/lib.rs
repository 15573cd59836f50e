// zpoolmon-core: Reconciliation layer between zpoolmon-kstat and the
// display surface (TUI or anything else implementing DisplaySurface).
//
// One Reconciler owns one PoolRegistry and the previous discovery
// snapshot; one Monitor owns one Reconciler and the timer task driving
// it. Ticks are strictly serial — the poll task is the sole mutator.

pub mod display;
pub mod error;
pub mod monitor;
pub mod reconcile;
pub mod registry;

#[cfg(test)]
mod test_support;

// ── Primary re-exports ──────────────────────────────────────────────
pub use display::DisplaySurface;
pub use error::MonitorError;
pub use monitor::{Monitor, MonitorOptions};
pub use reconcile::Reconciler;
pub use registry::{PoolEntry, PoolRegistry};

// Re-export the kstat domain types for consumers of this crate.
pub use zpoolmon_kstat::{KstatFs, PoolHealth, PoolName, PoolState};
