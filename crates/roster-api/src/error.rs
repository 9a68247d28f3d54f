//! Error types for the roster API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_db::DbError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No student matched the requested ID. Carries the client message.
    #[error("{0}")]
    NotFound(&'static str),

    /// The request body does not describe a valid student.
    #[error("Invalid data entries")]
    InvalidData,

    /// The request path carried a blank student ID.
    #[error("No student ID provided")]
    MissingId,

    /// The backend could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] DbError),

    /// A blocking storage task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, (*msg).to_owned()),
            Self::InvalidData | Self::MissingId => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Storage(e) => {
                tracing::error!(error = %e, "Roster storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Internal storage error"),
                )
            }
            Self::Task(e) => {
                tracing::error!(error = %e, "Roster storage task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Internal storage error"),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
