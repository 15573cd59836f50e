//! Pool board — the [`DisplaySurface`] behind the status screen.
//!
//! The monitor's poll task owns the board and mutates it through the
//! display trait; every mutation rebuilds a cheap snapshot and pushes it
//! over a `watch` channel, so the render loop never touches monitor state.

use std::sync::Arc;

use tokio::sync::watch;
use zpoolmon_core::DisplaySurface;
use zpoolmon_kstat::PoolName;

/// Identifier of one board slot. Issued once per pool entry and owned
/// by it until the pool disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotId(u64);

/// Render-ready view of one pool slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSlotView {
    pub name: String,
    /// State text, verbatim (e.g. `ONLINE`).
    pub label: String,
    /// Lower-cased state, keyed into the theme.
    pub style_tag: String,
}

struct Row {
    id: u64,
    view: PoolSlotView,
}

/// Ordered collection of pool slots with push-based snapshot publication.
pub struct PoolBoard {
    rows: Vec<Row>,
    next_id: u64,
    snapshot: watch::Sender<Arc<Vec<PoolSlotView>>>,
}

impl PoolBoard {
    /// Create the board and the receiver the render loop watches.
    pub fn new() -> (Self, watch::Receiver<Arc<Vec<PoolSlotView>>>) {
        let (snapshot, rx) = watch::channel(Arc::new(Vec::new()));
        (
            Self {
                rows: Vec::new(),
                next_id: 0,
                snapshot,
            },
            rx,
        )
    }

    /// Rebuild the snapshot vec and broadcast it.
    fn publish(&self) {
        let views: Vec<PoolSlotView> = self.rows.iter().map(|r| r.view.clone()).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(views));
    }
}

impl DisplaySurface for PoolBoard {
    type Handle = SlotId;

    fn create_slot(&mut self, pool: &PoolName, initial_label: &str) -> SlotId {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(Row {
            id,
            view: PoolSlotView {
                name: pool.to_string(),
                label: initial_label.to_owned(),
                style_tag: initial_label.to_ascii_lowercase(),
            },
        });
        self.publish();
        SlotId(id)
    }

    fn set_label(&mut self, slot: &mut SlotId, text: &str) {
        let id = slot.0;
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return;
        };
        row.view.label = text.to_owned();
        self.publish();
    }

    fn set_style_tag(&mut self, slot: &mut SlotId, tag: &str) {
        let id = slot.0;
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return;
        };
        row.view.style_tag = tag.to_owned();
        self.publish();
    }

    fn destroy_slot(&mut self, slot: SlotId) {
        self.rows.retain(|r| r.id != slot.0);
        self.publish();
    }
}
