//! Tailspin Toys frontend gateway.
//!
//! Sits in front of the storefront's page pipeline and forwards `/api/*`
//! requests to the backend API origin.
//!
//! ```text
//!     Client ──▶ gateway ──▶ /api/* ──▶ upstream API origin
//!                   │
//!                   └──▶ everything else ──▶ static assets
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tailspin_gateway::config::{self, ConfigError, GatewayConfig};
use tailspin_gateway::lifecycle::{signals, Shutdown};
use tailspin_gateway::observability;
use tailspin_gateway::HttpServer;

#[derive(Parser, Debug)]
#[command(
    name = "tailspin-gateway",
    about = "API-forwarding gateway for the Tailspin Toys storefront"
)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    // Resolve API_SERVER_URL once; nothing reads the environment after this.
    config::apply_env_overrides(&mut config);
    if let Err(errors) = config::validate_config(&config) {
        return Err(ConfigError::Validation(errors).into());
    }

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.origin(),
        assets_dir = %config.assets.dir,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
