//! Business logic services

pub mod reservations;
pub mod schedules;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub schedules: schedules::SchedulesService,
    pub reservations: reservations::ReservationsService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            schedules: schedules::SchedulesService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository),
        }
    }
}
