//! API handlers for the sauna booking REST endpoints

pub mod health;
pub mod openapi;
pub mod reservations;
pub mod schedules;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Reservations
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/:id",
            get(reservations::get_reservation).delete(reservations::cancel_reservation),
        )
        // Schedule
        .route("/available-dates", get(schedules::available_dates))
        .route("/available-slots", get(schedules::available_slots))
        .route("/day-slots", get(schedules::day_slots))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
