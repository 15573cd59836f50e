// Call-recording display surface shared by the unit tests.

use zpoolmon_kstat::PoolName;

use crate::display::DisplaySurface;

/// Records every display call so tests can assert exact mutation counts
/// (the no-flicker properties depend on "zero calls", not just final
/// state).
#[derive(Debug, Default)]
pub(crate) struct SpySurface {
    next_slot: u64,
    /// `(pool name, initial label)` per create call.
    pub created: Vec<(String, String)>,
    /// `(slot, text)` per set_label call.
    pub labels: Vec<(u64, String)>,
    /// `(slot, tag)` per set_style_tag call.
    pub styles: Vec<(u64, String)>,
    pub destroyed: Vec<u64>,
}

impl SpySurface {
    /// Total label + style mutations so far.
    pub fn mutation_count(&self) -> usize {
        self.labels.len() + self.styles.len()
    }
}

impl DisplaySurface for SpySurface {
    type Handle = u64;

    fn create_slot(&mut self, pool: &PoolName, initial_label: &str) -> u64 {
        let slot = self.next_slot;
        self.next_slot += 1;
        self.created.push((pool.to_string(), initial_label.to_owned()));
        slot
    }

    fn set_label(&mut self, slot: &mut u64, text: &str) {
        self.labels.push((*slot, text.to_owned()));
    }

    fn set_style_tag(&mut self, slot: &mut u64, tag: &str) {
        self.styles.push((*slot, tag.to_owned()));
    }

    fn destroy_slot(&mut self, slot: u64) {
        self.destroyed.push(slot);
    }
}
