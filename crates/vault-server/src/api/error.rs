//! Mapping core errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use vault_core::VaultError;

use super::types::ErrorResponse;

/// Error returned by API handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            Self::InvalidBody => (
                StatusCode::BAD_REQUEST,
                "invalid_body",
                Some(self.to_string()),
            ),
            Self::Vault(e @ VaultError::UnsatisfiableCharsetSpec(_)) => (
                StatusCode::BAD_REQUEST,
                "unsatisfiable_charset",
                Some(e.to_string()),
            ),
            Self::Vault(e @ VaultError::InvalidRequest(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(e.to_string()))
            }
            Self::Vault(e @ VaultError::NoFieldsToUpdate) => (
                StatusCode::BAD_REQUEST,
                "no_fields_to_update",
                Some(e.to_string()),
            ),
            // Token failures and entropy failures share one opaque response
            Self::Vault(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
