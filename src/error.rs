use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    /// Any failure coming from the store, including malformed ids.
    #[error("{message}: {}", .error.root_cause())]
    Store {
        message: &'static str,
        error: anyhow::Error,
    },
}

impl ApiError {
    /// Wraps a store failure with the message shown to the client.
    pub fn store(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
        move |error| ApiError::Store { message, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Store { message, error } => {
                // Store calls add context; the client gets the driver's own message.
                let cause = error.root_cause().to_string();
                error!(error = %cause, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message, "error": cause })),
                )
                    .into_response()
            }
        }
    }
}
