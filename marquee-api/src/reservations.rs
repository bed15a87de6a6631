use axum::{extract::State, routing::post, Json, Router};
use marquee_shared::{ReservationRequest, ReservationResult};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/hold", post(hold_seats))
        .route("/api/book", post(book_seats))
        .route("/api/release", post(release_seats))
}

// Store calls are short and never block on I/O, so they run inline on the handler task.

async fn hold_seats(
    State(state): State<AppState>,
    Json(req): Json<ReservationRequest>,
) -> Result<Json<ReservationResult>, AppError> {
    let result = state.store.hold(&req)?;
    info!("Seats {:?} held by {}", req.seat_numbers, req.customer_id);
    Ok(Json(result))
}

async fn book_seats(
    State(state): State<AppState>,
    Json(req): Json<ReservationRequest>,
) -> Result<Json<ReservationResult>, AppError> {
    let result = state.store.book(&req)?;
    info!("Seats {:?} booked by {}", req.seat_numbers, req.customer_id);
    Ok(Json(result))
}

async fn release_seats(
    State(state): State<AppState>,
    Json(req): Json<ReservationRequest>,
) -> Result<Json<ReservationResult>, AppError> {
    Ok(Json(state.store.release(&req)?))
}
