//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the optional metrics exporter
//! - Bind the listener
//! - Build the HTTP server and run it until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, RelayConfig};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Start the relay and serve until `shutdown` is triggered.
pub async fn run(config: RelayConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let shutdown_rx = shutdown.subscribe();

    if let Some(raw) = &config.observability.metrics_address {
        let addr: SocketAddr = raw
            .parse()
            .map_err(|_| StartupError::MetricsAddress(raw.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let address = config.bind_address();
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    server.run(listener, shutdown_rx).await?;
    Ok(())
}
