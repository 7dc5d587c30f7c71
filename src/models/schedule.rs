//! Schedule models (slots, day buckets, statistics)

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ---------------------------------------------------------------------------
// SlotStatus
// ---------------------------------------------------------------------------

/// Occupancy state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
    Blocked,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::Booked => "booked",
            SlotStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SlotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(SlotStatus::Available),
            "booked" => Ok(SlotStatus::Booked),
            "blocked" => Ok(SlotStatus::Blocked),
            other => Err(format!("Unknown slot status: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// TimeSlot
// ---------------------------------------------------------------------------

/// A bookable unit of time on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeSlot {
    /// Start of the slot, local time (e.g. `2026-03-15T14:00:00`), kept verbatim
    pub datetime: String,
    /// Length in hours
    pub duration: u32,
    pub status: SlotStatus,
    /// Who or what occupies the slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TimeSlot {
    /// Whether the slot starts strictly after `now`
    pub fn starts_after(&self, now: NaiveDateTime) -> bool {
        parse_slot_datetime(&self.datetime).is_some_and(|start| start > now)
    }

    /// Whether the slot starts at or after `now`
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        parse_slot_datetime(&self.datetime).is_some_and(|start| start >= now)
    }
}

/// All slots of one date, as returned by full-schedule snapshots
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DaySlots {
    /// Date-key (YYYY-MM-DD)
    pub date_key: String,
    pub slots: Vec<TimeSlot>,
}

/// Counts of upcoming slots per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SlotStats {
    pub total: usize,
    pub available: usize,
    pub booked: usize,
    pub blocked: usize,
}

// ---------------------------------------------------------------------------
// API shapes
// ---------------------------------------------------------------------------

/// Query parameters for the day timeline
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DaySlotsQuery {
    /// Day to show (YYYY-MM-DD)
    pub date: Option<String>,
}

/// Dates with at least one upcoming free slot
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableDatesResponse {
    pub dates: Vec<String>,
}

/// Full detail of one day
#[derive(Debug, Serialize, ToSchema)]
pub struct DaySlotsResponse {
    pub slots: Vec<TimeSlot>,
}

/// Start times of every upcoming free slot
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableSlotsResponse {
    pub slots: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Date part of a slot datetime (everything before `T`)
pub fn date_key_of(datetime: &str) -> &str {
    datetime.split_once('T').map_or(datetime, |(date, _)| date)
}

/// Datetime string of the whole-hour slot `hour` on `date_key`
pub fn hour_datetime(date_key: &str, hour: u32) -> String {
    format!("{}T{:02}:00:00", date_key, hour)
}

/// Parse a slot datetime into the local zone.
///
/// Naive strings are taken as local time; strings carrying an offset or `Z`
/// are converted into local time.
pub fn parse_slot_datetime(datetime: &str) -> Option<NaiveDateTime> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M") {
        return Some(naive);
    }
    DateTime::parse_from_rfc3339(datetime)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}
