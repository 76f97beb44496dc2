//! Credential vault server binary
//!
//! Configuration comes from the environment (`ENCRYPTION_KEY`, `PORT`, ...);
//! `--bind` and `--port` set the listening address.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use tracing::info;

use vault_core::VaultConfig;
use vault_server::{AppState, VaultServer};

/// Credential vault - encrypted credential storage and password generation
#[derive(Parser, Debug)]
#[command(name = "vault-server")]
#[command(version)]
#[command(about = "Credential vault HTTP server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = VaultConfig::from_env()?;
    let port = args.port.unwrap_or(config.port);
    info!(?config, "Loaded configuration");

    let state = AppState::from_config(&config)?;
    drop(config);

    let server = VaultServer::new(state).with_addr(SocketAddr::new(args.bind, port));
    info!("Starting credential vault on http://{}", server.addr());
    server.run().await?;

    Ok(())
}
