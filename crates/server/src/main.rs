// crates/server/src/main.rs
//! Drishti admin server binary.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use drishti_server::{create_app, AppConfig, AppState, RemotePaths, TransportConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,drishti_server=info,drishti_remote=info".into()),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    match &config.transport {
        TransportConfig::Ssh(ssh) => tracing::info!(
            host = %ssh.host,
            port = ssh.port,
            user = %ssh.username,
            timeout_secs = config.timeout.as_secs(),
            "using ssh transport"
        ),
        TransportConfig::Local => tracing::info!("using local transport"),
    }

    let state = AppState::new(config.build_transport(), RemotePaths::default());
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "drishti admin API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
