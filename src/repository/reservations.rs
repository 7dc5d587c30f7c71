//! Reservation ledger
//!
//! Guest reservations live in insertion order and are never deleted;
//! cancellation only flips the status. Each create/cancel mirrors its effect
//! onto the slot whose datetime equals the reservation date. A reservation
//! whose date matches no slot is still recorded.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::schedules::SlotStore;
use crate::models::{
    reservation::{Reservation, ReservationStatus},
    schedule::SlotStatus,
};

/// Result of a ledger write, with whether the linked slot was updated
#[derive(Debug, Clone)]
pub struct LedgerOutcome {
    pub reservation: Reservation,
    pub slot_updated: bool,
}

#[derive(Debug)]
struct Ledger {
    reservations: Vec<Reservation>,
    next_id: u64,
}

#[derive(Debug)]
pub struct ReservationLedger {
    ledger: Mutex<Ledger>,
    slots: Arc<SlotStore>,
}

impl ReservationLedger {
    pub fn new(slots: Arc<SlotStore>) -> Self {
        Self {
            ledger: Mutex::new(Ledger {
                reservations: Vec::new(),
                next_id: 1,
            }),
            slots,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a confirmed reservation and mark its slot as booked by `name`
    pub fn create(&self, name: &str, date: &str, guests: u32, comment: &str) -> LedgerOutcome {
        let mut ledger = self.lock();

        let reservation = Reservation {
            id: ledger.next_id,
            name: name.to_string(),
            date: date.to_string(),
            guests,
            comment: comment.to_string(),
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        };
        ledger.next_id += 1;

        let slot_updated = self
            .slots
            .set_slot_status(date, SlotStatus::Booked, Some(name))
            .is_some();

        ledger.reservations.push(reservation.clone());
        LedgerOutcome {
            reservation,
            slot_updated,
        }
    }

    /// Every reservation ever created, cancelled ones included
    pub fn list(&self) -> Vec<Reservation> {
        self.lock().reservations.clone()
    }

    pub fn get_by_id(&self, id: u64) -> Option<Reservation> {
        self.lock().reservations.iter().find(|r| r.id == id).cloned()
    }

    /// Mark a reservation cancelled and release its slot
    pub fn cancel(&self, id: u64) -> Option<LedgerOutcome> {
        let mut ledger = self.lock();
        let reservation = ledger.reservations.iter_mut().find(|r| r.id == id)?;

        reservation.status = ReservationStatus::Cancelled;
        let slot_updated = self
            .slots
            .set_slot_status(&reservation.date, SlotStatus::Available, None)
            .is_some();

        Some(LedgerOutcome {
            reservation: reservation.clone(),
            slot_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_slot(datetime: &str) -> (Arc<SlotStore>, ReservationLedger) {
        let slots = Arc::new(SlotStore::new());
        slots.add_slot(datetime, 1, SlotStatus::Available, None);
        let ledger = ReservationLedger::new(slots.clone());
        (slots, ledger)
    }

    #[test]
    fn test_create_books_matching_slot() {
        let (slots, ledger) = ledger_with_slot("2026-03-15T14:00:00");

        let outcome = ledger.create("Ann", "2026-03-15T14:00:00", 1, "");
        assert!(outcome.slot_updated);
        assert_eq!(outcome.reservation.id, 1);
        assert_eq!(outcome.reservation.status, ReservationStatus::Confirmed);

        let slot = &slots.slots_for_date("2026-03-15")[0];
        assert_eq!(slot.status, SlotStatus::Booked);
        assert_eq!(slot.note.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_create_without_slot_still_records() {
        let (slots, ledger) = ledger_with_slot("2026-03-15T14:00:00");

        let outcome = ledger.create("Bob", "2026-03-15T18:00:00", 3, "late");
        assert!(!outcome.slot_updated);
        assert_eq!(ledger.list().len(), 1);
        assert_eq!(ledger.get_by_id(1).unwrap().guests, 3);
        assert_eq!(slots.slots_for_date("2026-03-15").len(), 1);
        assert!(slots.slots_for_date("2026-03-15")[0].note.is_none());
    }

    #[test]
    fn test_ids_are_sequential() {
        let (_, ledger) = ledger_with_slot("2026-03-15T14:00:00");
        let ids: Vec<u64> = (0..3)
            .map(|i| ledger.create(&format!("guest {}", i), "x", 1, "").reservation.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_releases_slot_and_keeps_record() {
        let (slots, ledger) = ledger_with_slot("2026-03-15T14:00:00");
        let id = ledger.create("Ann", "2026-03-15T14:00:00", 2, "").reservation.id;

        let outcome = ledger.cancel(id).unwrap();
        assert!(outcome.slot_updated);
        assert_eq!(outcome.reservation.status, ReservationStatus::Cancelled);
        assert_eq!(slots.slots_for_date("2026-03-15")[0].status, SlotStatus::Available);

        let listed = ledger.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, ReservationStatus::Cancelled);

        // New ids never reuse cancelled ones
        assert_eq!(ledger.create("Cid", "x", 1, "").reservation.id, id + 1);
    }

    #[test]
    fn test_unknown_id() {
        let (slots, ledger) = ledger_with_slot("2026-03-15T14:00:00");
        slots.set_slot_status("2026-03-15T14:00:00", SlotStatus::Booked, None);

        assert!(ledger.get_by_id(42).is_none());
        assert!(ledger.cancel(42).is_none());
        assert_eq!(slots.slots_for_date("2026-03-15")[0].status, SlotStatus::Booked);
    }

    #[test]
    fn test_concurrent_creates_get_distinct_sequential_ids() {
        let (_, ledger) = ledger_with_slot("2026-03-15T14:00:00");

        std::thread::scope(|scope| {
            for n in 0..16 {
                let ledger = &ledger;
                scope.spawn(move || {
                    ledger.create(&format!("Guest {}", n), "2026-03-15T18:00:00", 1, "")
                });
            }
        });

        let mut ids: Vec<u64> = ledger.list().iter().map(|r| r.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
    }
}
