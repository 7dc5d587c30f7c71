//! Repository layer: in-memory schedule and reservation state

pub mod reservations;
pub mod schedules;

use std::sync::Arc;

/// Main repository struct holding the shared stores
#[derive(Clone, Debug)]
pub struct Repository {
    pub slots: Arc<schedules::SlotStore>,
    pub reservations: Arc<reservations::ReservationLedger>,
}

impl Repository {
    /// Create a repository with an empty schedule and ledger
    pub fn new() -> Self {
        let slots = Arc::new(schedules::SlotStore::new());
        Self {
            reservations: Arc::new(reservations::ReservationLedger::new(slots.clone())),
            slots,
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
