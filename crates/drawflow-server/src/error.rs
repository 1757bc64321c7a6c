//! Error responses for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use drawflow_graph::GraphError;

/// Any failure while serving a request.
///
/// Rendered as HTTP 500 with a JSON string body, matching the string
/// bodies of successful responses.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("store error: {0}")]
    Store(#[from] GraphError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.to_string())).into_response()
    }
}
