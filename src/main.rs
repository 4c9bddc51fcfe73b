//! Country-aware domain routing gateway.
//!
//! Geolocates each inbound request by client IP, annotates it with the
//! resolved country, and redirects requests that arrive on the wrong
//! country domain.
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                 GEO ROUTER                   │
//!                     │                                              │
//!   Client Request    │  ┌────────┐   ┌───────────┐   ┌──────────┐  │
//!   ──────────────────┼─▶│  http  │──▶│    geo    │──▶│ routing  │  │
//!                     │  │ server │   │ resolver  │   │ decision │  │
//!                     │  └────────┘   └───────────┘   └────┬─────┘  │
//!                     │                                    │        │
//!                     │              forward ◀─────────────┴──▶ 302 │
//!                     │                                              │
//!                     │  ┌────────────────────────────────────────┐ │
//!                     │  │          Cross-Cutting Concerns        │ │
//!                     │  │  config · observability · lifecycle    │ │
//!                     │  └────────────────────────────────────────┘ │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use geo_router::config::load_config;
use geo_router::geo::MmdbResolver;
use geo_router::http::HttpServer;
use geo_router::lifecycle::Shutdown;
use geo_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "geo-router", about = "Country-aware domain routing gateway")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "georouter.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Config carries the log level, so it is loaded before tracing comes up.
    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("geo-router: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!(config = %args.config.display(), "geo-router starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        domains = config.domains.len(),
        allow_ip_override = config.allow_ip_override,
        excluded_paths = config.excluded_paths.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let resolver = Arc::new(MmdbResolver::open(config.geoip.db_path.as_ref())?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, resolver)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
