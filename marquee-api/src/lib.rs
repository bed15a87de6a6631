use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod reservations;
pub mod show;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The browser client is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(show::routes())
        .merge(reservations::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
