// ── Core error types ──
//
// Almost nothing in this crate can fail: discovery and state reads
// degrade to empty/UNAVAIL at the kstat boundary, and display calls are
// infallible. The one genuine failure is the poll task dying before
// deactivation could run its teardown.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MonitorError {
    /// The poll task panicked or was aborted; the registry it owned
    /// never reached teardown.
    #[error("poll task failed before teardown: {0}")]
    PollTask(#[from] tokio::task::JoinError),
}
