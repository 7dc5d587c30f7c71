//! API integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sauna_slots::{api, models::SlotStatus, AppConfig, AppState};

fn app() -> (AppState, Router) {
    let state = AppState::new(AppConfig::default());
    (state.clone(), api::router(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (_, app) = app();
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_reservation_books_slot() {
    let (state, app) = app();
    state
        .services
        .schedules
        .add_slot("2026-03-15T14:00:00", 1, SlotStatus::Available, None);

    let (status, body) = send(
        &app,
        post_json(
            "/api/reservations",
            json!({ "name": "Ann", "date": "2026-03-15T14:00:00" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["guests"], 1);
    assert_eq!(body["comment"], "");
    assert!(body["createdAt"].is_string());

    let (status, body) = send(&app, get("/api/day-slots?date=2026-03-15")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slots"][0]["status"], "booked");
    assert_eq!(body["slots"][0]["note"], "Ann");
    assert_eq!(body["slots"][0]["duration"], 1);
}

#[tokio::test]
async fn test_create_reservation_requires_name_and_date() {
    let (_, app) = app();

    for payload in [
        json!({ "date": "2026-03-15T14:00:00" }),
        json!({ "name": "Ann" }),
        json!({ "name": "", "date": "2026-03-15T14:00:00" }),
    ] {
        let (status, body) = send(&app, post_json("/api/reservations", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    let (_, body) = send(&app, get("/api/reservations")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_reservation_without_slot_is_still_created() {
    let (state, app) = app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/reservations",
            json!({ "name": "Bob", "date": "2026-03-15T18:00:00", "guests": 4, "comment": "birthday" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["guests"], 4);
    assert_eq!(body["comment"], "birthday");
    assert!(state.services.schedules.all_slots().is_empty());
}

#[tokio::test]
async fn test_get_reservation() {
    let (_, app) = app();
    send(
        &app,
        post_json("/api/reservations", json!({ "name": "Ann", "date": "x" })),
    )
    .await;

    let (status, body) = send(&app, get("/api/reservations/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ann");

    let (status, body) = send(&app, get("/api/reservations/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cancel_reservation_releases_slot() {
    let (state, app) = app();
    state
        .services
        .schedules
        .add_slot("2026-03-15T14:00:00", 1, SlotStatus::Available, None);
    send(
        &app,
        post_json(
            "/api/reservations",
            json!({ "name": "Ann", "date": "2026-03-15T14:00:00" }),
        ),
    )
    .await;

    let (status, body) = send(&app, delete("/api/reservations/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let slots = state.services.schedules.slots_for_date("2026-03-15");
    assert_eq!(slots[0].status, SlotStatus::Available);

    // Cancelled reservations stay listed
    let (_, body) = send(&app, get("/api/reservations")).await;
    assert_eq!(body[0]["status"], "cancelled");

    let (status, _) = send(&app, delete("/api/reservations/9")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_available_dates_hide_past_slots() {
    let (state, app) = app();
    let schedules = &state.services.schedules;
    schedules.add_slot("2000-01-01T10:00:00", 1, SlotStatus::Available, None);
    schedules.add_slot("2099-03-15T10:00:00", 1, SlotStatus::Available, None);
    schedules.add_slot("2099-03-16T10:00:00", 1, SlotStatus::Booked, None);

    let (status, body) = send(&app, get("/api/available-dates")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "dates": ["2099-03-15"] }));

    let (_, body) = send(&app, get("/api/available-slots")).await;
    assert_eq!(body, json!({ "slots": ["2099-03-15T10:00:00"] }));

    // Past slots remain in the day timeline
    let (_, body) = send(&app, get("/api/day-slots?date=2000-01-01")).await;
    assert_eq!(body["slots"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_day_slots_validates_date() {
    let (_, app) = app();

    for uri in [
        "/api/day-slots",
        "/api/day-slots?date=15.03.2026",
        "/api/day-slots?date=2026-3-15",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string());
    }

    let (status, body) = send(&app, get("/api/day-slots?date=2026-03-15")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "slots": [] }));
}
