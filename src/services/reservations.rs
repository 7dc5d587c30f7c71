//! Reservations service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::reservation::{CreateReservation, Reservation},
    repository::{reservations::ReservationLedger, Repository},
};

#[derive(Clone)]
pub struct ReservationsService {
    ledger: Arc<ReservationLedger>,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            ledger: repository.reservations,
        }
    }

    pub fn list(&self) -> Vec<Reservation> {
        self.ledger.list()
    }

    pub fn get_by_id(&self, id: u64) -> AppResult<Reservation> {
        self.ledger
            .get_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Record a reservation and book its slot.
    ///
    /// A date matching no slot is accepted; the reservation is created and only
    /// a warning is logged.
    pub fn create(&self, data: &CreateReservation) -> AppResult<Reservation> {
        data.validate()?;

        let name = required(data.name.as_deref(), "name")?;
        let date = required(data.date.as_deref(), "date")?;
        let outcome = self.ledger.create(
            name,
            date,
            data.guests.unwrap_or(1),
            data.comment.as_deref().unwrap_or_default(),
        );

        if outcome.slot_updated {
            tracing::info!("Reservation {} booked slot {}", outcome.reservation.id, date);
        } else {
            tracing::warn!(
                "Reservation {} references no slot at {}",
                outcome.reservation.id,
                date
            );
        }
        Ok(outcome.reservation)
    }

    /// Cancel a reservation and release its slot
    pub fn cancel(&self, id: u64) -> AppResult<Reservation> {
        let outcome = self
            .ledger
            .cancel(id)
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        tracing::info!(
            "Reservation {} cancelled (slot released: {})",
            id,
            outcome.slot_updated
        );
        Ok(outcome.reservation)
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{} is required (name and date are mandatory)", field)))
}
