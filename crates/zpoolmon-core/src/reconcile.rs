// ── Pool-set reconciliation ──
//
// One tick: discover the current pool set, diff it against the previous
// snapshot, and issue the minimal registry mutations — removals first,
// then in-place refreshes, then insertions. The previous snapshot is
// replaced wholesale at the end, never merged.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;
use zpoolmon_kstat::{KstatFs, PoolName};

use crate::display::DisplaySurface;
use crate::registry::PoolRegistry;

/// Owns the registry, the previous discovery snapshot, and the display
/// surface. [`tick`](Self::tick) is the sole mutator of all three; the
/// caller must invoke it strictly serially.
pub struct Reconciler<D: DisplaySurface> {
    kstat: KstatFs,
    surface: D,
    registry: PoolRegistry<D>,
    previous: BTreeSet<PoolName>,
    last_sweep: watch::Sender<Option<DateTime<Utc>>>,
}

impl<D: DisplaySurface> Reconciler<D> {
    pub fn new(kstat: KstatFs, surface: D) -> Self {
        let (last_sweep, _) = watch::channel(None);
        Self {
            kstat,
            surface,
            registry: PoolRegistry::new(),
            previous: BTreeSet::new(),
            last_sweep,
        }
    }

    /// Run one full reconciliation pass.
    ///
    /// Total: discovery failure degrades to "no pools" (purging the
    /// registry), and per-pool read failures degrade to an UNAVAIL
    /// display rather than a removal, so a transiently unreadable pool
    /// never flickers out of the list.
    pub fn tick(&mut self) {
        let current = self.kstat.discover_pools();

        // Removals run first so a vanished pool never lingers alongside
        // refreshed entries.
        for name in self.previous.difference(&current) {
            if self.registry.remove(name, &mut self.surface) {
                debug!(pool = %name, "pool disappeared");
            }
        }

        // Survivors refresh in place; an unchanged state touches nothing.
        for name in self.previous.intersection(&current) {
            let observed = self.kstat.read_state(name);
            if let Some(entry) = self.registry.find_mut(name) {
                entry.apply_state(observed, &mut self.surface);
            }
        }

        // New pools enter at UNAVAIL and take their first observed state
        // immediately.
        for name in current.difference(&self.previous) {
            let observed = self.kstat.read_state(name);
            debug!(pool = %name, state = %observed, "pool appeared");
            self.registry
                .insert(name.clone(), observed, &mut self.surface);
        }

        self.previous = current;
        let _ = self.last_sweep.send(Some(Utc::now()));
    }

    pub fn registry(&self) -> &PoolRegistry<D> {
        &self.registry
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Subscribe to the completion timestamp of each sweep.
    pub fn subscribe_last_sweep(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_sweep.subscribe()
    }

    /// Release every registry entry and clear the snapshot, handing the
    /// surface back to the caller.
    pub fn teardown(mut self) -> D {
        let count = self.registry.len();
        self.registry.clear(&mut self.surface);
        self.previous.clear();
        if count > 0 {
            debug!(pools = count, "registry torn down");
        }
        self.surface
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use zpoolmon_kstat::STATE_FILE;

    use super::*;
    use crate::test_support::SpySurface;

    fn make_pool(base: &Path, name: &str, state: &str) {
        let dir = base.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(STATE_FILE), state).unwrap();
    }

    fn reconciler_at(base: &Path) -> Reconciler<SpySurface> {
        Reconciler::new(KstatFs::at(base), SpySurface::default())
    }

    fn tracked(reconciler: &Reconciler<SpySurface>) -> Vec<String> {
        reconciler
            .registry()
            .names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn first_tick_inserts_all_discovered_pools() {
        let tmp = TempDir::new().unwrap();
        make_pool(tmp.path(), "tank", "ONLINE\n");
        make_pool(tmp.path(), "backup", "DEGRADED\n");

        let mut reconciler = reconciler_at(tmp.path());
        reconciler.tick();

        // Sorted discovery: backup before tank.
        assert_eq!(tracked(&reconciler), vec!["backup", "tank"]);
        let surface = reconciler.surface();
        assert_eq!(surface.created.len(), 2);
        assert_eq!(surface.labels[0].1, "DEGRADED");
        assert_eq!(surface.labels[1].1, "ONLINE");
        assert!(surface.destroyed.is_empty());
    }

    #[test]
    fn unchanged_tick_performs_zero_display_mutations() {
        let tmp = TempDir::new().unwrap();
        make_pool(tmp.path(), "tank", "ONLINE\n");
        make_pool(tmp.path(), "backup", "ONLINE\n");

        let mut reconciler = reconciler_at(tmp.path());
        reconciler.tick();
        let created = reconciler.surface().created.len();
        let mutations = reconciler.surface().mutation_count();

        reconciler.tick();

        let surface = reconciler.surface();
        assert_eq!(surface.created.len(), created);
        assert_eq!(surface.mutation_count(), mutations);
        assert!(surface.destroyed.is_empty());
    }

    #[test]
    fn appearing_pool_is_inserted_without_touching_survivors() {
        let tmp = TempDir::new().unwrap();
        make_pool(tmp.path(), "tank", "ONLINE\n");

        let mut reconciler = reconciler_at(tmp.path());
        reconciler.tick();
        let mutations = reconciler.surface().mutation_count();

        make_pool(tmp.path(), "backup", "ONLINE\n");
        reconciler.tick();

        let surface = reconciler.surface();
        assert_eq!(surface.created.len(), 2);
        assert_eq!(surface.created[1].0, "backup");
        // Exactly one label + one style for backup's first refresh;
        // tank saw zero calls.
        assert_eq!(surface.mutation_count(), mutations + 2);
        assert!(surface.destroyed.is_empty());
        assert_eq!(tracked(&reconciler), vec!["tank", "backup"]);
    }

    #[test]
    fn disappearing_pool_is_removed_without_touching_survivors() {
        let tmp = TempDir::new().unwrap();
        make_pool(tmp.path(), "tank", "ONLINE\n");
        make_pool(tmp.path(), "backup", "ONLINE\n");

        let mut reconciler = reconciler_at(tmp.path());
        reconciler.tick();
        let mutations = reconciler.surface().mutation_count();

        fs::remove_dir_all(tmp.path().join("backup")).unwrap();
        reconciler.tick();

        let surface = reconciler.surface();
        assert_eq!(surface.destroyed.len(), 1);
        assert_eq!(surface.mutation_count(), mutations);
        assert_eq!(tracked(&reconciler), vec!["tank"]);
    }

    #[test]
    fn surviving_entry_is_refreshed_not_recreated() {
        let tmp = TempDir::new().unwrap();
        make_pool(tmp.path(), "tank", "ONLINE\n");

        let mut reconciler = reconciler_at(tmp.path());
        reconciler.tick();
        let original_slot = *reconciler
            .registry()
            .find(&PoolName::from("tank"))
            .unwrap()
            .slot();

        make_pool(tmp.path(), "backup", "ONLINE\n");
        reconciler.tick();

        let entry_slot = *reconciler
            .registry()
            .find(&PoolName::from("tank"))
            .unwrap()
            .slot();
        assert_eq!(entry_slot, original_slot);
    }

    #[test]
    fn state_change_updates_label_and_style() {
        let tmp = TempDir::new().unwrap();
        make_pool(tmp.path(), "tank", "ONLINE\n");

        let mut reconciler = reconciler_at(tmp.path());
        reconciler.tick();

        fs::write(tmp.path().join("tank").join(STATE_FILE), "DEGRADED\n").unwrap();
        reconciler.tick();

        let surface = reconciler.surface();
        assert_eq!(surface.labels.last().unwrap().1, "DEGRADED");
        assert_eq!(surface.styles.last().unwrap().1, "degraded");
    }

    #[test]
    fn unreadable_state_degrades_to_unavail_without_removal() {
        let tmp = TempDir::new().unwrap();
        make_pool(tmp.path(), "tank", "ONLINE\n");

        let mut reconciler = reconciler_at(tmp.path());
        reconciler.tick();

        // The directory (and the state file) still exist, but the
        // content is gone — the pool must stay listed as UNAVAIL.
        fs::write(tmp.path().join("tank").join(STATE_FILE), "").unwrap();
        reconciler.tick();

        let surface = reconciler.surface();
        assert!(surface.destroyed.is_empty());
        assert_eq!(surface.labels.last().unwrap().1, "UNAVAIL");
        assert_eq!(surface.styles.last().unwrap().1, "unavail");
        assert_eq!(tracked(&reconciler), vec!["tank"]);
    }

    #[test]
    fn vanished_base_purges_the_registry() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("zfs");
        fs::create_dir_all(&base).unwrap();
        make_pool(&base, "tank", "ONLINE\n");

        let mut reconciler = reconciler_at(&base);
        reconciler.tick();
        assert_eq!(reconciler.registry().len(), 1);

        // Module unloaded: discovery finds nothing, which is valid.
        fs::remove_dir_all(&base).unwrap();
        reconciler.tick();

        assert!(reconciler.registry().is_empty());
        assert_eq!(reconciler.surface().destroyed.len(), 1);
    }

    #[test]
    fn teardown_destroys_all_slots_and_returns_the_surface() {
        let tmp = TempDir::new().unwrap();
        make_pool(tmp.path(), "tank", "ONLINE\n");
        make_pool(tmp.path(), "backup", "ONLINE\n");

        let mut reconciler = reconciler_at(tmp.path());
        reconciler.tick();

        let surface = reconciler.teardown();
        assert_eq!(surface.destroyed.len(), 2);
    }

    #[test]
    fn tick_stamps_the_last_sweep_channel() {
        let tmp = TempDir::new().unwrap();
        let mut reconciler = reconciler_at(tmp.path());
        let rx = reconciler.subscribe_last_sweep();
        assert!(rx.borrow().is_none());

        reconciler.tick();
        assert!(rx.borrow().is_some());
    }
}
