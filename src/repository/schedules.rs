//! Slot store: the authoritative date -> slots mapping
//!
//! Every read and write of schedule state goes through [`SlotStore`]. Each
//! method holds the store lock for its whole duration, so no caller ever
//! observes a half-updated bucket. After every call, slots within a bucket
//! are sorted by datetime, datetimes are unique within a bucket, and no
//! bucket is empty.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::schedule::{date_key_of, DaySlots, SlotStatus, TimeSlot};

type Schedule = BTreeMap<String, Vec<TimeSlot>>;

#[derive(Debug, Default)]
pub struct SlotStore {
    schedule: Mutex<Schedule>,
}

impl SlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Schedule> {
        self.schedule.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Slots of one date (empty when the date has none)
    pub fn slots_for_date(&self, date_key: &str) -> Vec<TimeSlot> {
        self.lock().get(date_key).cloned().unwrap_or_default()
    }

    /// Snapshot of the whole schedule, ordered by date-key
    pub fn all_slots(&self) -> Vec<DaySlots> {
        self.lock()
            .iter()
            .map(|(date_key, slots)| DaySlots {
                date_key: date_key.clone(),
                slots: slots.clone(),
            })
            .collect()
    }

    /// Insert a slot, or update the existing one with the same datetime.
    ///
    /// On update, status and duration are overwritten; the note only when one
    /// is given.
    pub fn add_slot(
        &self,
        datetime: &str,
        duration: u32,
        status: SlotStatus,
        note: Option<&str>,
    ) -> TimeSlot {
        let mut schedule = self.lock();
        let slots = schedule.entry(date_key_of(datetime).to_string()).or_default();

        if let Some(existing) = slots.iter_mut().find(|s| s.datetime == datetime) {
            existing.status = status;
            existing.duration = duration;
            if let Some(note) = note {
                existing.note = Some(note.to_string());
            }
            return existing.clone();
        }

        let slot = TimeSlot {
            datetime: datetime.to_string(),
            duration,
            status,
            note: note.map(str::to_string),
        };
        slots.push(slot.clone());
        slots.sort_by(|a, b| a.datetime.cmp(&b.datetime));
        slot
    }

    /// Remove the slot with this datetime; drops the bucket once it is empty
    pub fn remove_slot(&self, datetime: &str) -> bool {
        let mut schedule = self.lock();
        let date_key = date_key_of(datetime);
        let Some(slots) = schedule.get_mut(date_key) else {
            return false;
        };
        let Some(idx) = slots.iter().position(|s| s.datetime == datetime) else {
            return false;
        };

        slots.remove(idx);
        if slots.is_empty() {
            schedule.remove(date_key);
        }
        true
    }

    /// Change the status (and the note, when given) of an existing slot.
    ///
    /// Returns `None` when no slot has this exact datetime.
    pub fn set_slot_status(
        &self,
        datetime: &str,
        status: SlotStatus,
        note: Option<&str>,
    ) -> Option<TimeSlot> {
        let mut schedule = self.lock();
        let slot = schedule
            .get_mut(date_key_of(datetime))?
            .iter_mut()
            .find(|s| s.datetime == datetime)?;

        slot.status = status;
        if let Some(note) = note {
            slot.note = Some(note.to_string());
        }
        Some(slot.clone())
    }

    /// Delete every slot of a date, returning how many were removed
    pub fn clear_day(&self, date_key: &str) -> usize {
        self.lock().remove(date_key).map_or(0, |slots| slots.len())
    }
}
