//! Typed API error for HTTP handlers.
//!
//! Store failures are relayed with the backend's own message in a
//! `{"error": "..."}` body; only the status code is chosen here.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fauna_storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: the store refused the request or the row is absent.
    BadRequest(String),
    /// 500 Internal Server Error: a read query failed.
    QueryFailed(String),
}

impl ApiError {
    /// Store failure on a single-row operation.
    #[must_use]
    pub fn rejected(err: &StorageError) -> Self {
        tracing::warn!(error = %err, "store rejected request");
        Self::BadRequest(err.backend_message())
    }

    /// Store failure on a listing query.
    #[must_use]
    pub fn query(err: &StorageError) -> Self {
        tracing::error!(error = %err, "listing query failed");
        Self::QueryFailed(err.backend_message())
    }
}

/// Unreadable bodies (wrong content type, malformed JSON, wrong field
/// types) are client errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected query string");
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::QueryFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}
