use crate::error::SimError;
use crate::model::topology::EdgeId;

/// Wavelength slots per link. Also the admission cap: a path is only
/// feasible if every edge stays at or under this many occupied slots
/// after accepting the request.
pub const WAVELENGTHS: usize = 10;

/// Per-edge wavelength occupancy. A cell holds 0 when the slot is free,
/// otherwise the remaining holding time of the request seated there.
#[derive(Debug, Clone)]
pub struct LinkStateStore {
    slots: Vec<[u32; WAVELENGTHS]>,
}

impl LinkStateStore {
    pub fn new(num_edges: usize) -> Self {
        Self {
            slots: vec![[0; WAVELENGTHS]; num_edges],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.slots {
            *row = [0; WAVELENGTHS];
        }
    }

    /// One round of holding-time decay: every positive cell drops by one.
    pub fn decay(&mut self) {
        for row in &mut self.slots {
            for cell in row.iter_mut() {
                if *cell > 0 {
                    *cell -= 1;
                }
            }
        }
    }

    /// Number of occupied slots on an edge.
    pub fn occupied(&self, edge: EdgeId) -> usize {
        self.slots[edge as usize]
            .iter()
            .filter(|cell| **cell > 0)
            .count()
    }

    /// Seats a holding time in the first free slot, scanning from the lowest
    /// index. Callers verify headroom first; a full row here means the
    /// feasibility check and the admission policy disagree.
    pub fn admit(&mut self, edge: EdgeId, holding_time: u32) -> Result<usize, SimError> {
        let row = &mut self.slots[edge as usize];
        let Some(slot) = row.iter().position(|cell| *cell == 0) else {
            return Err(SimError::CapacityViolation { edge });
        };
        row[slot] = holding_time;
        Ok(slot)
    }

    pub fn num_edges(&self) -> usize {
        self.slots.len()
    }

    pub fn snapshot(&self) -> Vec<[u32; WAVELENGTHS]> {
        self.slots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_floors_at_zero() {
        let mut store = LinkStateStore::new(1);
        store.admit(0, 2).expect("admit");
        store.decay();
        assert_eq!(store.occupied(0), 1);
        store.decay();
        assert_eq!(store.occupied(0), 0);
        store.decay();
        assert_eq!(store.occupied(0), 0);
    }

    #[test]
    fn slot_frees_after_exactly_holding_time_decays() {
        let mut store = LinkStateStore::new(1);
        store.admit(0, 13).expect("admit");
        for _ in 0..12 {
            store.decay();
            assert_eq!(store.occupied(0), 1);
        }
        store.decay();
        assert_eq!(store.occupied(0), 0);
    }

    #[test]
    fn admit_fills_lowest_free_slot_first() {
        let mut store = LinkStateStore::new(2);
        assert_eq!(store.admit(1, 10).expect("admit"), 0);
        assert_eq!(store.admit(1, 11).expect("admit"), 1);
        assert_eq!(store.occupied(1), 2);
        assert_eq!(store.occupied(0), 0);

        // Free the first slot, the next admission reuses it.
        for _ in 0..10 {
            store.decay();
        }
        assert_eq!(store.occupied(1), 1);
        assert_eq!(store.admit(1, 15).expect("admit"), 0);
    }

    #[test]
    fn admit_on_full_edge_reports_capacity_violation() {
        let mut store = LinkStateStore::new(1);
        for _ in 0..WAVELENGTHS {
            store.admit(0, 10).expect("admit");
        }
        assert_eq!(store.occupied(0), WAVELENGTHS);
        let err = store.admit(0, 10).expect_err("row is full");
        assert_eq!(err, SimError::CapacityViolation { edge: 0 });
    }

    #[test]
    fn clear_resets_every_slot() {
        let mut store = LinkStateStore::new(3);
        store.admit(0, 12).expect("admit");
        store.admit(2, 19).expect("admit");
        store.clear();
        for edge in 0..3 {
            assert_eq!(store.occupied(edge), 0);
        }
    }
}
