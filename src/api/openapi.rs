//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, reservations, schedules};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sauna Slots API",
        version = "0.1.0",
        description = "Sauna schedule and reservation REST API"
    ),
    servers(
        (url = "/api", description = "Public API")
    ),
    paths(
        // Health
        health::health_check,
        // Reservations
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::cancel_reservation,
        // Schedule
        schedules::available_dates,
        schedules::available_slots,
        schedules::day_slots,
    ),
    components(
        schemas(
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationStatus,
            crate::models::reservation::CreateReservation,
            // Schedule
            crate::models::schedule::TimeSlot,
            crate::models::schedule::SlotStatus,
            crate::models::schedule::DaySlotsQuery,
            crate::models::schedule::AvailableDatesResponse,
            crate::models::schedule::AvailableSlotsResponse,
            crate::models::schedule::DaySlotsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "reservations", description = "Guest reservations"),
        (name = "schedule", description = "Public schedule reads")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
