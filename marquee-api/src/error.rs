use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marquee_core::Rejection;

#[derive(Debug)]
pub enum AppError {
    /// The store refused the request. The body still carries the current seats and version.
    Rejected(Rejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Rejected(rejection) => {
                let status = if rejection.kind().is_conflict() {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::BAD_REQUEST
                };
                tracing::debug!(%status, "{}", rejection.error);
                (status, Json(rejection.result)).into_response()
            }
        }
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}
