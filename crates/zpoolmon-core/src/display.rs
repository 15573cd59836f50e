// ── Display surface abstraction ──
//
// The reconciliation core never talks to a rendering toolkit. It owns
// per-pool display slots through this narrow seam: construct on insert,
// label/style updates on a state change, destroy on removal. Any
// renderer that can do those four things can host the monitor.

use zpoolmon_kstat::PoolName;

/// Rendering seam for the monitor.
///
/// A `Handle` identifies one pool's display slot and is owned
/// exclusively by that pool's registry entry for the entry's lifetime.
/// Implementations decide what a slot looks like; the core only
/// guarantees the call sites:
///
/// - [`create_slot`](Self::create_slot) when a pool appears,
/// - [`set_label`](Self::set_label) / [`set_style_tag`](Self::set_style_tag)
///   when (and only when) its observed state changes,
/// - [`destroy_slot`](Self::destroy_slot) when it disappears.
pub trait DisplaySurface {
    type Handle;

    /// Create a display slot for `pool`, initially showing `initial_label`.
    fn create_slot(&mut self, pool: &PoolName, initial_label: &str) -> Self::Handle;

    /// Replace the slot's state text.
    fn set_label(&mut self, slot: &mut Self::Handle, text: &str);

    /// Replace the slot's style tag (lower-cased state, e.g. `online`).
    fn set_style_tag(&mut self, slot: &mut Self::Handle, tag: &str);

    /// Tear down the slot and release everything it owns.
    fn destroy_slot(&mut self, slot: Self::Handle);
}
