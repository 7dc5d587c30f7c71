//! Schedule service: slot lifecycle workflows and read projections
//!
//! Built only on [`SlotStore`] primitives. Workflows spanning several store
//! calls (day generation, range booking) are not atomic as a whole; each
//! individual slot write is.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::{
    models::schedule::{hour_datetime, DaySlots, SlotStats, SlotStatus, TimeSlot},
    repository::{schedules::SlotStore, Repository},
};

#[derive(Clone)]
pub struct SchedulesService {
    slots: Arc<SlotStore>,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self {
            slots: repository.slots,
        }
    }

    // ---- Store primitives ----

    pub fn slots_for_date(&self, date_key: &str) -> Vec<TimeSlot> {
        self.slots.slots_for_date(date_key)
    }

    pub fn all_slots(&self) -> Vec<DaySlots> {
        self.slots.all_slots()
    }

    pub fn add_slot(
        &self,
        datetime: &str,
        duration: u32,
        status: SlotStatus,
        note: Option<&str>,
    ) -> TimeSlot {
        tracing::info!("Upserting slot {} ({}h, {})", datetime, duration, status);
        self.slots.add_slot(datetime, duration, status, note)
    }

    pub fn remove_slot(&self, datetime: &str) -> bool {
        let removed = self.slots.remove_slot(datetime);
        tracing::info!("Remove slot {}: removed={}", datetime, removed);
        removed
    }

    pub fn set_slot_status(
        &self,
        datetime: &str,
        status: SlotStatus,
        note: Option<&str>,
    ) -> Option<TimeSlot> {
        let slot = self.slots.set_slot_status(datetime, status, note);
        match &slot {
            Some(_) => tracing::info!("Slot {} set to {}", datetime, status),
            None => tracing::debug!("No slot at {} to set to {}", datetime, status),
        }
        slot
    }

    pub fn clear_day(&self, date_key: &str) -> usize {
        let count = self.slots.clear_day(date_key);
        tracing::info!("Cleared {} slots on {}", count, date_key);
        count
    }

    // ---- Workflows ----

    /// Upsert a one-hour available slot for every hour in `[start_hour, end_hour)`.
    ///
    /// Callers validate the range; hours are used as given.
    pub fn add_day_slots(&self, date_key: &str, start_hour: u32, end_hour: u32) -> Vec<TimeSlot> {
        let added: Vec<TimeSlot> = (start_hour..end_hour)
            .map(|hour| {
                self.slots
                    .add_slot(&hour_datetime(date_key, hour), 1, SlotStatus::Available, None)
            })
            .collect();
        tracing::info!(
            "Added {} slots on {} ({}:00-{}:00)",
            added.len(),
            date_key,
            start_hour,
            end_hour
        );
        added
    }

    /// Add available one-hour slots for the given hours that have no slot yet.
    ///
    /// Existing slots keep their status. The check and the inserts are
    /// separate store calls.
    pub fn add_missing_hours(&self, date_key: &str, hours: &[u32]) -> Vec<TimeSlot> {
        let existing: BTreeSet<String> = self
            .slots
            .slots_for_date(date_key)
            .into_iter()
            .map(|s| s.datetime)
            .collect();

        let added: Vec<TimeSlot> = hours
            .iter()
            .map(|&hour| hour_datetime(date_key, hour))
            .filter(|datetime| !existing.contains(datetime))
            .map(|datetime| self.slots.add_slot(&datetime, 1, SlotStatus::Available, None))
            .collect();
        tracing::info!("Added {} missing slots on {}", added.len(), date_key);
        added
    }

    /// Mark `hours` consecutive hourly slots from `start_hour` as booked.
    ///
    /// Hours without a slot are skipped, not created; the return value counts
    /// only slots that were actually booked.
    pub fn book_range(
        &self,
        date_key: &str,
        start_hour: u32,
        hours: u32,
        note: Option<&str>,
    ) -> usize {
        let count = (start_hour..start_hour.saturating_add(hours))
            .filter(|&hour| {
                self.slots
                    .set_slot_status(&hour_datetime(date_key, hour), SlotStatus::Booked, note)
                    .is_some()
            })
            .count();

        if count < hours as usize {
            tracing::warn!(
                "Booked {} of {} requested hours on {} from {}:00",
                count,
                hours,
                date_key,
                start_hour
            );
        } else {
            tracing::info!("Booked {} hours on {} from {}:00", count, date_key, start_hour);
        }
        count
    }

    // ---- Projections ----

    /// Dates with at least one available slot in the future
    pub fn available_date_keys(&self) -> Vec<String> {
        self.available_date_keys_at(now())
    }

    pub fn available_date_keys_at(&self, now: NaiveDateTime) -> Vec<String> {
        self.slots
            .all_slots()
            .into_iter()
            .filter(|day| {
                day.slots
                    .iter()
                    .any(|s| s.status == SlotStatus::Available && s.starts_after(now))
            })
            .map(|day| day.date_key)
            .collect()
    }

    /// Start times of every available slot in the future, ascending
    pub fn available_datetimes(&self) -> Vec<String> {
        self.available_datetimes_at(now())
    }

    pub fn available_datetimes_at(&self, now: NaiveDateTime) -> Vec<String> {
        self.slots
            .all_slots()
            .into_iter()
            .flat_map(|day| day.slots)
            .filter(|s| s.status == SlotStatus::Available && s.starts_after(now))
            .map(|s| s.datetime)
            .collect()
    }

    /// Every slot of one date, whatever its status
    pub fn day_slots(&self, date_key: &str) -> Vec<TimeSlot> {
        tracing::debug!("Loading day timeline for {}", date_key);
        self.slots.slots_for_date(date_key)
    }

    /// The first `limit` dates from today on that have any slot
    pub fn scheduled_days(&self, limit: usize) -> Vec<String> {
        self.scheduled_days_from(Local::now().date_naive(), limit)
    }

    pub fn scheduled_days_from(&self, today: NaiveDate, limit: usize) -> Vec<String> {
        let today_key = today.format("%Y-%m-%d").to_string();
        self.slots
            .all_slots()
            .into_iter()
            .map(|day| day.date_key)
            .filter(|key| *key >= today_key)
            .take(limit)
            .collect()
    }

    /// Counts of upcoming slots; past slots are left out entirely
    pub fn stats(&self) -> SlotStats {
        self.stats_at(now())
    }

    pub fn stats_at(&self, now: NaiveDateTime) -> SlotStats {
        self.slots
            .all_slots()
            .iter()
            .flat_map(|day| day.slots.iter())
            .filter(|s| s.is_upcoming(now))
            .fold(SlotStats::default(), |mut stats, s| {
                stats.total += 1;
                match s.status {
                    SlotStatus::Available => stats.available += 1,
                    SlotStatus::Booked => stats.booked += 1,
                    SlotStatus::Blocked => stats.blocked += 1,
                }
                stats
            })
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SchedulesService {
        SchedulesService::new(Repository::new())
    }

    fn at(date: &str, hour: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_add_day_slots() {
        let schedule = service();
        let added = schedule.add_day_slots("2026-03-15", 10, 14);
        assert_eq!(added.len(), 4);

        let slots = schedule.slots_for_date("2026-03-15");
        let datetimes: Vec<_> = slots.iter().map(|s| s.datetime.as_str()).collect();
        assert_eq!(
            datetimes,
            vec![
                "2026-03-15T10:00:00",
                "2026-03-15T11:00:00",
                "2026-03-15T12:00:00",
                "2026-03-15T13:00:00",
            ]
        );
        assert!(slots
            .iter()
            .all(|s| s.status == SlotStatus::Available && s.duration == 1));
    }

    #[test]
    fn test_add_day_slots_is_idempotent() {
        let schedule = service();
        schedule.add_day_slots("2026-03-15", 10, 14);
        let once = schedule.all_slots();
        schedule.add_day_slots("2026-03-15", 10, 14);
        let twice = schedule.all_slots();

        assert_eq!(once.len(), twice.len());
        assert_eq!(once[0].slots, twice[0].slots);
    }

    #[test]
    fn test_add_day_slots_resets_existing_status() {
        let schedule = service();
        schedule.add_day_slots("2026-03-15", 10, 12);
        schedule.book_range("2026-03-15", 10, 1, Some("X"));
        schedule.add_day_slots("2026-03-15", 10, 12);

        let slot = &schedule.slots_for_date("2026-03-15")[0];
        assert_eq!(slot.status, SlotStatus::Available);
        assert_eq!(slot.note.as_deref(), Some("X"));
    }

    #[test]
    fn test_add_missing_hours_keeps_existing() {
        let schedule = service();
        schedule.add_day_slots("2026-03-15", 10, 12);
        schedule.book_range("2026-03-15", 10, 1, Some("X"));

        let added = schedule.add_missing_hours("2026-03-15", &[9, 10, 11, 12]);
        let added: Vec<_> = added.iter().map(|s| s.datetime.as_str()).collect();
        assert_eq!(added, vec!["2026-03-15T09:00:00", "2026-03-15T12:00:00"]);

        let slots = schedule.slots_for_date("2026-03-15");
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[1].status, SlotStatus::Booked);
    }

    #[test]
    fn test_book_range_skips_missing_hours() {
        let schedule = service();
        schedule.add_slot("2026-03-15T10:00:00", 1, SlotStatus::Available, None);

        assert_eq!(schedule.book_range("2026-03-15", 10, 2, Some("X")), 1);

        let slots = schedule.slots_for_date("2026-03-15");
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].status, SlotStatus::Booked);
        assert_eq!(slots[0].note.as_deref(), Some("X"));
    }

    #[test]
    fn test_book_range_on_empty_day() {
        let schedule = service();
        assert_eq!(schedule.book_range("2026-03-15", 10, 3, None), 0);
        assert!(schedule.all_slots().is_empty());
    }

    #[test]
    fn test_available_date_keys_ignore_past_and_taken() {
        let schedule = service();
        let now = at("2026-03-15", 12);
        // Only available slot is in the past
        schedule.add_slot("2026-03-15T10:00:00", 1, SlotStatus::Available, None);
        // Future but booked
        schedule.add_slot("2026-03-16T10:00:00", 1, SlotStatus::Booked, None);
        // Future and free
        schedule.add_slot("2026-03-17T10:00:00", 1, SlotStatus::Blocked, None);
        schedule.add_slot("2026-03-17T11:00:00", 1, SlotStatus::Available, None);
        schedule.add_slot("2026-03-18T09:00:00", 1, SlotStatus::Available, None);

        assert_eq!(
            schedule.available_date_keys_at(now),
            vec!["2026-03-17", "2026-03-18"]
        );
        // The past slot is still visible in the day timeline
        assert_eq!(schedule.day_slots("2026-03-15").len(), 1);
    }

    #[test]
    fn test_available_datetimes() {
        let schedule = service();
        schedule.add_day_slots("2026-03-15", 10, 14);
        schedule.book_range("2026-03-15", 12, 1, None);

        assert_eq!(
            schedule.available_datetimes_at(at("2026-03-15", 10)),
            vec!["2026-03-15T11:00:00", "2026-03-15T13:00:00"]
        );
    }

    #[test]
    fn test_scheduled_days() {
        let schedule = service();
        for day in ["2026-03-14", "2026-03-15", "2026-03-17", "2026-03-20"] {
            schedule.add_slot(&format!("{}T10:00:00", day), 1, SlotStatus::Blocked, None);
        }
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        assert_eq!(
            schedule.scheduled_days_from(today, 2),
            vec!["2026-03-15", "2026-03-17"]
        );
        assert_eq!(schedule.scheduled_days_from(today, 14).len(), 3);

        schedule.remove_slot("2026-03-17T10:00:00");
        assert_eq!(
            schedule.scheduled_days_from(today, 14),
            vec!["2026-03-15", "2026-03-20"]
        );
    }

    #[test]
    fn test_stats_exclude_past_slots() {
        let schedule = service();
        schedule.add_day_slots("2026-03-15", 10, 16);
        schedule.book_range("2026-03-15", 10, 1, None);
        schedule.book_range("2026-03-15", 14, 1, None);
        schedule.set_slot_status("2026-03-15T15:00:00", SlotStatus::Blocked, None);

        let stats = schedule.stats_at(at("2026-03-15", 12));
        assert_eq!(
            stats,
            SlotStats {
                total: 4,
                available: 2,
                booked: 1,
                blocked: 1,
            }
        );
        assert_eq!(schedule.stats_at(at("2026-03-16", 0)), SlotStats::default());
    }
}
