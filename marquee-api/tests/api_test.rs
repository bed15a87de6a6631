use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use marquee_api::{app, AppState};
use marquee_shared::{ReservationRequest, ReservationResult, Seat, SeatStatus, ShowInfo};
use marquee_store::{ReservationStore, ShowSettings};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let store = ReservationStore::new(ShowSettings {
        title: "The Sample Movie".to_string(),
        starts_at: Utc::now(),
        total_seats: 20,
    })
    .expect("valid show");
    app(AppState::new(Arc::new(store)))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.expect("infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    (status, body.to_vec())
}

async fn get<T: DeserializeOwned>(app: &Router, uri: &str) -> T {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).expect("json body")
}

async fn post(app: &Router, uri: &str, payload: Value) -> (StatusCode, ReservationResult) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).expect("reservation result"))
}

async fn current_version(app: &Router) -> String {
    get::<ShowInfo>(app, "/api/show").await.version
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let body: Value = get(&app, "/api/health").await;
    assert_eq!(body["status"], "ok");
    assert!(body["time"].is_string());
}

#[tokio::test]
async fn test_fresh_show_and_seats() {
    let app = test_app();

    let show: ShowInfo = get(&app, "/api/show").await;
    assert_eq!(show.movie_title, "The Sample Movie");
    assert_eq!(show.total_seats, 20);
    assert_eq!(show.available_seats, 20);

    let seats: Vec<Value> = get(&app, "/api/seats").await;
    assert_eq!(seats.len(), 20);
    for (i, seat) in seats.iter().enumerate() {
        assert_eq!(seat["number"], json!(i + 1));
        assert_eq!(seat["status"], "Available");
        assert!(seat.get("heldBy").is_none());
    }
}

#[tokio::test]
async fn test_hold_book_flow_with_version_tokens() {
    let app = test_app();
    let v0 = current_version(&app).await;

    let (status, held) = post(
        &app,
        "/api/hold",
        json!({ "customerId": "u1", "seatNumbers": [1, 2, 3], "expectedVersion": v0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(held.success);
    let v1 = held.new_version.clone();
    assert_ne!(v1, v0);
    assert!(held.seats_snapshot[..3]
        .iter()
        .all(|s| s.status == SeatStatus::Held && s.held_by.as_deref() == Some("u1")));

    let (status, stale) = post(
        &app,
        "/api/book",
        json!({ "customerId": "u1", "seatNumbers": [1, 2, 3], "expectedVersion": v0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(!stale.success);
    assert_eq!(stale.message, "Version mismatch. Refresh seats.");
    assert_eq!(stale.new_version, v1);
    assert_eq!(stale.seats_snapshot, held.seats_snapshot);

    let (status, booked) = post(
        &app,
        "/api/book",
        json!({ "customerId": "u1", "seatNumbers": [1, 2, 3], "expectedVersion": v1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(booked.new_version, v1);
    assert!(booked.seats_snapshot[..3]
        .iter()
        .all(|s| s.status == SeatStatus::Booked && s.held_by.is_none()));

    let show: ShowInfo = get(&app, "/api/show").await;
    assert_eq!(show.available_seats, 17);
    assert_eq!(show.version, booked.new_version);
}

#[tokio::test]
async fn test_booking_a_seat_held_by_another_customer_conflicts() {
    let app = test_app();
    let (_, held) = post(&app, "/api/hold", json!({ "customerId": "u2", "seatNumbers": [4] })).await;

    let (status, result) = post(
        &app,
        "/api/book",
        json!({ "customerId": "A", "seatNumbers": [4], "expectedVersion": held.new_version }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(result.message, "Seat 4 not available for booking.");
    assert_eq!(result.new_version, held.new_version);
}

#[tokio::test]
async fn test_release_returns_seats() {
    let app = test_app();
    post(&app, "/api/hold", json!({ "customerId": "r", "seatNumbers": [5, 6] })).await;

    let (status, released) = post(
        &app,
        "/api/release",
        json!({ "customerId": "r", "seatNumbers": [5, 6], "expectedVersion": "stale" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(released.success);

    let seats: Vec<Seat> = get(&app, "/api/seats").await;
    assert_eq!(seats[4], Seat::available(5));
    assert_eq!(seats[5], Seat::available(6));
}

#[tokio::test]
async fn test_unknown_seat_is_a_bad_request() {
    let app = test_app();
    let current = current_version(&app).await;

    let (status, result) = post(
        &app,
        "/api/book",
        json!({ "customerId": "x", "seatNumbers": [999], "expectedVersion": current }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result.message, "Seat 999 does not exist.");
    assert_eq!(result.new_version, current);
    assert_eq!(current_version(&app).await, current);
}

#[tokio::test]
async fn test_malformed_requests_are_bad_requests() {
    let app = test_app();
    let current = current_version(&app).await;

    for payload in [
        json!({ "customerId": " ", "seatNumbers": [1] }),
        json!({ "customerId": "u1", "seatNumbers": [] }),
        json!({ "customerId": "u1", "seatNumbers": [2, 2] }),
    ] {
        for uri in ["/api/hold", "/api/book", "/api/release"] {
            let (status, result) = post(&app, uri, payload.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", uri, payload);
            assert!(!result.success);
            assert_eq!(result.seats_snapshot.len(), 20);
        }
    }
    assert_eq!(current_version(&app).await, current);
}

#[tokio::test]
async fn test_missing_fields_are_rejected_with_snapshot() {
    let app = test_app();
    let current = current_version(&app).await;

    for payload in [
        json!({ "seatNumbers": [1] }),
        json!({ "customerId": "u1" }),
        json!({ "customerId": null, "seatNumbers": [1] }),
        json!({ "customerId": "u1", "seatNumbers": null }),
    ] {
        for uri in ["/api/hold", "/api/book", "/api/release"] {
            let (status, result) = post(&app, uri, payload.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", uri, payload);
            assert!(!result.success);
            assert!(result.message.starts_with("Invalid request"));
            assert_eq!(result.new_version, current);
            assert_eq!(result.seats_snapshot.len(), 20);
        }
    }
    assert_eq!(current_version(&app).await, current);
}

#[tokio::test]
async fn test_release_of_unknown_seat_is_invalid_request() {
    let app = test_app();
    let (status, result) =
        post(&app, "/api/release", json!({ "customerId": "r", "seatNumbers": [999] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(result.message.starts_with("Invalid request"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_holds_admit_one_customer() {
    let app = test_app();
    let v0 = current_version(&app).await;

    let tasks: Vec<_> = (0..12)
        .map(|i| {
            let app = app.clone();
            let req = ReservationRequest::new(format!("c{}", i), vec![15]).with_expected_version(&v0);
            tokio::spawn(async move {
                let payload = serde_json::to_value(&req).unwrap();
                post(&app, "/api/hold", payload).await.0
            })
        })
        .collect();

    let mut ok = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::CONFLICT => {}
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(ok, 1);

    let seats: Vec<Seat> = get(&app, "/api/seats").await;
    assert_eq!(seats[14].status, SeatStatus::Held);
}
