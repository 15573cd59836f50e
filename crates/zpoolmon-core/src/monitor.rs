// ── Monitor lifecycle ──
//
// Activation runs one immediate sweep, then hands the reconciler to a
// recurring poll task. Deactivation stops the timer FIRST, then tears
// the registry down — that ordering is what keeps the timer from firing
// into a dismantled registry.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use zpoolmon_kstat::KstatFs;

use crate::display::DisplaySurface;
use crate::error::MonitorError;
use crate::reconcile::Reconciler;

/// Sweep cadence of the reference behavior.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Construction-time tuning for a [`Monitor`].
///
/// The shipped binary always runs the defaults — neither the interval
/// nor the kstat location is user-configurable. This exists as the
/// constructor seam for tests and embedders.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub kstat: KstatFs,
    pub poll_interval: Duration,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            kstat: KstatFs::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// An active pool monitor: a reconciler owned by a recurring poll task.
///
/// Ticks are strictly serial — the task is the reconciler's only owner,
/// so no tick can begin before the previous one completes. Must be
/// created inside a Tokio runtime.
pub struct Monitor<D: DisplaySurface> {
    cancel: CancellationToken,
    task: JoinHandle<Reconciler<D>>,
    last_sweep: watch::Receiver<Option<DateTime<Utc>>>,
}

impl<D> Monitor<D>
where
    D: DisplaySurface + Send + 'static,
    D::Handle: Send + 'static,
{
    /// Activate against the kernel's kstat tree with the default cadence.
    pub fn activate(surface: D) -> Self {
        Self::with_options(surface, MonitorOptions::default())
    }

    pub fn with_options(surface: D, options: MonitorOptions) -> Self {
        let mut reconciler = Reconciler::new(options.kstat, surface);
        // First sweep runs before the timer exists, so the display is
        // populated the moment activation returns.
        reconciler.tick();

        let last_sweep = reconciler.subscribe_last_sweep();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_task(
            reconciler,
            options.poll_interval,
            cancel.clone(),
        ));

        info!(interval = ?options.poll_interval, "pool monitor active");
        Self {
            cancel,
            task,
            last_sweep,
        }
    }

    /// Completion timestamp of the most recent sweep.
    pub fn last_sweep(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_sweep.clone()
    }

    /// Stop polling and release every display slot.
    ///
    /// Cancels the poll task, waits for any in-flight sweep to finish
    /// (ticks always run to completion), then tears down the registry.
    /// Returns the display surface for the caller to dispose of.
    pub async fn deactivate(self) -> Result<D, MonitorError> {
        self.cancel.cancel();
        let reconciler = self.task.await?;
        let surface = reconciler.teardown();
        info!("pool monitor deactivated");
        Ok(surface)
    }
}

/// Recurring sweep driver. Owns the reconciler for the monitor's active
/// lifetime and returns it at cancellation so teardown can run.
async fn poll_task<D: DisplaySurface>(
    mut reconciler: Reconciler<D>,
    period: Duration,
    cancel: CancellationToken,
) -> Reconciler<D> {
    let mut interval = tokio::time::interval(period);
    // A stalled host should not cause a burst of catch-up sweeps.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => reconciler.tick(),
        }
    }

    debug!("poll task stopped");
    reconciler
}
