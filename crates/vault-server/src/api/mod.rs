//! HTTP API: routes, handlers and error mapping

mod error;
mod handlers;
mod types;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub use error::ApiError;
pub use types::{ErrorResponse, HealthResponse, SuccessResponse};

/// Build the API router over the shared state
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(86_400));

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/generate-password", post(handlers::generate_password))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
