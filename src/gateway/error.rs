//! Client-facing error taxonomy for the gateway API.
//!
//! Every error renders as a JSON object with a single `detail` field, the
//! shape clients already parse for validation failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The submitted city is empty after trimming.
    #[error("City must be a non-empty string.")]
    InvalidCity,

    /// The forwarder surfaced an error. Normally unreachable: the forwarder
    /// degrades to a mock result instead of failing.
    #[error("Backend communication failed: {0}")]
    UpstreamFailed(String),

    /// Any other unhandled fault. Details are logged, never sent to the client.
    #[error("Internal server error.")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidCity => StatusCode::BAD_REQUEST,
            ApiError::UpstreamFailed(reason) => {
                tracing::error!("Forwarder failed: {reason}");
                StatusCode::BAD_GATEWAY
            }
            ApiError::Internal(err) => {
                tracing::error!("Unhandled gateway error: {err:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
