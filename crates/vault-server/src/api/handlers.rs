//! Endpoint handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::debug;
use vault_core::{CharsetSpec, GeneratePasswordRequest, GeneratePasswordResponse};

use super::error::ApiError;
use super::types::{HealthResponse, SuccessResponse};
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Generate a password from the requested character classes
pub async fn generate_password(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GeneratePasswordRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<GeneratePasswordResponse>>, ApiError> {
    let Json(req) = body.map_err(|_| ApiError::InvalidBody)?;
    let spec = CharsetSpec::from(&req);
    debug!(length = spec.effective_length(), "Password generation requested");

    let password = state.generator.generate(&spec)?;

    Ok(Json(SuccessResponse::new(
        "Password generated successfully",
        GeneratePasswordResponse { password },
    )))
}
