//! Reservation API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::reservation::{CreateReservation, Reservation},
};

/// List every reservation, cancelled ones included
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "Reservations in creation order", body = Vec<Reservation>)
    )
)]
pub async fn list_reservations(State(state): State<crate::AppState>) -> Json<Vec<Reservation>> {
    Json(state.services.reservations.list())
}

/// Create a reservation and book its slot
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Missing name or date", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.services.reservations.create(&data)?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Get reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = u64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Unknown reservation", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.get_by_id(id)?;
    Ok(Json(reservation))
}

/// Cancel a reservation and release its slot
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = u64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = Reservation),
        (status = 404, description = "Unknown reservation", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.cancel(id)?;
    Ok(Json(reservation))
}
