//! API response types.
//!
//! Successful product reads are raw JSON bytes; every error is a short
//! plain-text message.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use catalog_core::CatalogError;
use tracing::error;

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub CatalogError);

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl AppError {
    /// Client-facing message. Server-side failures never leak details.
    fn message(&self) -> String {
        match &self.0 {
            CatalogError::NotFound { resource_type, .. } => format!("{} not found", resource_type),
            CatalogError::Validation(msg) | CatalogError::Conflict(msg) => msg.clone(),
            CatalogError::Database(_)
            | CatalogError::Cache(_)
            | CatalogError::Configuration(_)
            | CatalogError::Internal(_)
            | CatalogError::Other(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        }

        (status, self.message()).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// Wraps pre-serialized JSON bytes as a 200 response.
pub fn json_bytes(body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
