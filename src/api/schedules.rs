//! Schedule API endpoints (public calendar reads)

use axum::{
    extract::{Query, State},
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    models::schedule::{
        AvailableDatesResponse, AvailableSlotsResponse, DaySlotsQuery, DaySlotsResponse,
    },
};

static DATE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date-key pattern"));

/// Dates that still have a free slot (month grid)
#[utoipa::path(
    get,
    path = "/available-dates",
    tag = "schedule",
    responses(
        (status = 200, description = "Dates with upcoming free slots", body = AvailableDatesResponse)
    )
)]
pub async fn available_dates(State(state): State<crate::AppState>) -> Json<AvailableDatesResponse> {
    Json(AvailableDatesResponse {
        dates: state.services.schedules.available_date_keys(),
    })
}

/// Start times of all upcoming free slots
#[utoipa::path(
    get,
    path = "/available-slots",
    tag = "schedule",
    responses(
        (status = 200, description = "Upcoming free slot datetimes", body = AvailableSlotsResponse)
    )
)]
pub async fn available_slots(State(state): State<crate::AppState>) -> Json<AvailableSlotsResponse> {
    Json(AvailableSlotsResponse {
        slots: state.services.schedules.available_datetimes(),
    })
}

/// All slots of one day, whatever their status (day timeline)
#[utoipa::path(
    get,
    path = "/day-slots",
    tag = "schedule",
    params(DaySlotsQuery),
    responses(
        (status = 200, description = "Slots of the day", body = DaySlotsResponse),
        (status = 400, description = "Missing or malformed date", body = crate::error::ErrorResponse)
    )
)]
pub async fn day_slots(
    State(state): State<crate::AppState>,
    Query(query): Query<DaySlotsQuery>,
) -> AppResult<Json<DaySlotsResponse>> {
    let date = query
        .date
        .filter(|d| DATE_KEY.is_match(d))
        .ok_or_else(|| AppError::BadRequest("date parameter is required (YYYY-MM-DD)".to_string()))?;

    Ok(Json(DaySlotsResponse {
        slots: state.services.schedules.day_slots(&date),
    }))
}
