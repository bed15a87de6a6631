use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use marquee_shared::{Seat, ShowInfo};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    time: DateTime<Utc>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/show", get(show_info))
        .route("/api/seats", get(seats))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        time: Utc::now(),
    })
}

async fn show_info(State(state): State<AppState>) -> Json<ShowInfo> {
    Json(state.store.show_info())
}

async fn seats(State(state): State<AppState>) -> Json<Vec<Seat>> {
    Json(state.store.seats())
}
