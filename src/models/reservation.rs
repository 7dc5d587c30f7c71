//! Reservation models (guest booking requests)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Reservation lifecycle state (`confirmed` -> `cancelled`, one way)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

/// Guest reservation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: u64,
    /// Guest name
    pub name: String,
    /// Start of the reserved slot (matched against slot datetimes verbatim)
    pub date: String,
    /// Number of guests
    pub guests: u32,
    pub comment: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Create reservation request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    /// Guest name (required)
    pub name: Option<String>,
    /// Slot datetime (required)
    pub date: Option<String>,
    /// Number of guests (defaults to 1)
    #[validate(range(min = 1, message = "guests must be at least 1"))]
    pub guests: Option<u32>,
    pub comment: Option<String>,
}
