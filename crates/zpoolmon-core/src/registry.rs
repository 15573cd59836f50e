// ── Pool registry ──
//
// Ordered container of per-pool display entries, keyed by pool name.
// There is exactly one mutator (the poll task), so this is a plain Vec
// with linear lookup — pool counts are single digits in practice.
// Invariant: at most one entry per pool name.

use tracing::debug;
use zpoolmon_kstat::{PoolName, PoolState};

use crate::display::DisplaySurface;

/// One tracked pool: its name, the last state observed for it, and the
/// display slot it owns.
#[derive(Debug)]
pub struct PoolEntry<H> {
    name: PoolName,
    state: PoolState,
    slot: H,
}

impl<H> PoolEntry<H> {
    pub fn name(&self) -> &PoolName {
        &self.name
    }

    /// The last state observed for this pool.
    pub fn state(&self) -> &PoolState {
        &self.state
    }

    /// The display slot owned by this entry.
    pub fn slot(&self) -> &H {
        &self.slot
    }

    /// Record a newly observed state, mutating the display only if it
    /// actually differs from the cached one.
    pub fn apply_state<D>(&mut self, observed: PoolState, surface: &mut D)
    where
        D: DisplaySurface<Handle = H>,
    {
        if observed == self.state {
            return;
        }
        surface.set_label(&mut self.slot, observed.as_str());
        surface.set_style_tag(&mut self.slot, &observed.style_tag());
        debug!(pool = %self.name, from = %self.state, to = %observed, "pool state changed");
        self.state = observed;
    }
}

/// Insertion-ordered collection of [`PoolEntry`] values.
pub struct PoolRegistry<D: DisplaySurface> {
    entries: Vec<PoolEntry<D::Handle>>,
}

impl<D: DisplaySurface> PoolRegistry<D> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Track a new pool.
    ///
    /// The entry starts at UNAVAIL (so the slot shows something from the
    /// instant it exists) and takes `observed` as its first refresh
    /// immediately. The caller must guarantee `name` is not already
    /// tracked; a duplicate is a reconciliation bug, not a runtime
    /// condition.
    pub fn insert(&mut self, name: PoolName, observed: PoolState, surface: &mut D) {
        debug_assert!(
            self.find(&name).is_none(),
            "duplicate pool entry: {name}"
        );

        let slot = surface.create_slot(&name, PoolState::unavail().as_str());
        let mut entry = PoolEntry {
            name,
            state: PoolState::unavail(),
            slot,
        };
        entry.apply_state(observed, surface);
        self.entries.push(entry);
    }

    pub fn find(&self, name: &PoolName) -> Option<&PoolEntry<D::Handle>> {
        self.entries.iter().find(|e| e.name == *name)
    }

    pub fn find_mut(&mut self, name: &PoolName) -> Option<&mut PoolEntry<D::Handle>> {
        self.entries.iter_mut().find(|e| e.name == *name)
    }

    /// Stop tracking `name`, destroying its display slot. Returns
    /// `false` if the pool was not tracked (safe to call regardless).
    pub fn remove(&mut self, name: &PoolName, surface: &mut D) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.name == *name) else {
            return false;
        };
        let entry = self.entries.remove(pos);
        surface.destroy_slot(entry.slot);
        true
    }

    /// Destroy every slot and drop all entries.
    pub fn clear(&mut self, surface: &mut D) {
        for entry in self.entries.drain(..) {
            surface.destroy_slot(entry.slot);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked pool names, in insertion order.
    pub fn names(&self) -> Vec<&PoolName> {
        self.entries.iter().map(|e| &e.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoolEntry<D::Handle>> {
        self.entries.iter()
    }
}

impl<D: DisplaySurface> Default for PoolRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
