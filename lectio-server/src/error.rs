//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors a handler can return.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Failure from the journal or store
    #[error(transparent)]
    Core(#[from] lectio_core::Error),

    /// Path matched no route
    #[error("route not found")]
    RouteNotFound,

    /// A blocking store task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(lectio_core::Error::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Core(lectio_core::Error::EntryNotFound(_)) | Self::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Core(lectio_core::Error::Validation(errors)) => json!({ "errors": errors }),
            Self::Core(lectio_core::Error::EntryNotFound(_)) => {
                json!({ "error": "Entry not found" })
            }
            Self::RouteNotFound => json!({ "error": "Route not found" }),
            other => {
                tracing::error!(error = %other, "Request failed");
                json!({ "error": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
