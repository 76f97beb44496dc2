//! HTTP server orchestration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing::info;
use vault_core::config::DEFAULT_PORT;

use crate::api;
use crate::state::AppState;

/// Credential vault HTTP server
pub struct VaultServer {
    state: Arc<AppState>,
    addr: SocketAddr,
}

impl VaultServer {
    /// Create a server listening on all interfaces at the default port
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
        }
    }

    /// Set the listening address
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the server until the process is stopped
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = api::router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!("Server starting on {}", listener.local_addr()?);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
