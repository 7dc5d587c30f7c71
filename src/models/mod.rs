//! Data models for the sauna booking server

pub mod reservation;
pub mod schedule;

// Re-export commonly used types
pub use reservation::{CreateReservation, Reservation, ReservationStatus};
pub use schedule::{DaySlots, SlotStats, SlotStatus, TimeSlot};
