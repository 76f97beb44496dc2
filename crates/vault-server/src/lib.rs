//! # vault-server
//!
//! HTTP surface for the credential vault: health check and password
//! generation, backed by the components in `vault-core`.

pub mod api;
mod server;
mod state;

pub use api::{router, ApiError};
pub use server::VaultServer;
pub use state::AppState;
