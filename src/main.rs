//! Admin Relay
//!
//! ```text
//!     Client Request
//!     ─────────────────▶ path router ──┬──▶ static files (security headers)
//!                                      │
//!                                      └──▶ forwarder ──▶ Backend (localhost:3000)
//!                                                            │
//!     Client Response                                        ▼
//!     ◀───────────────── rewriter / error fallback ◀──── backend response
//! ```

use std::path::PathBuf;

use clap::Parser;

use admin_relay::config::{load_config, RelayConfig};
use admin_relay::lifecycle::{self, Shutdown};
use admin_relay::observability::logging;

#[derive(Parser)]
#[command(name = "admin-relay", version)]
#[command(about = "Serves static files and relays admin/API requests to a local backend", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long, env = "ADMIN_RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configuration file.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("admin-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.bind_address(),
        backend = %config.backend.base_url,
        forward_prefixes = ?config.routing.forward_prefixes,
        static_root = %config.static_files.root,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    lifecycle::spawn_signal_listener(shutdown.clone());

    lifecycle::startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
