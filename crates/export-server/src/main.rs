//! Export server entry point.
//!
//! ```bash
//! rsocket-export-server --config ./export.toml
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rsocket_export_core::ExportConfig;
use rsocket_export_introspector::{Introspector, ServiceCatalog};
use rsocket_export_server::{ExportState, router};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Serves generated npm packages for RSocket services.
#[derive(Parser, Debug)]
#[command(name = "rsocket-export-server", version, about)]
struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, env = "RSOCKET_EXPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of service reflection documents, overrides the config
    #[arg(long)]
    contracts: Option<PathBuf>,

    /// Listen address, overrides the config
    #[arg(long)]
    bind: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    info!("Starting rsocket-export-server v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        ExportConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(contracts) = args.contracts {
        config.contracts_dir = contracts;
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    config.validate().context("invalid configuration")?;

    let introspector = Introspector::with_ordering(config.method_ordering);
    let catalog = ServiceCatalog::load_dir(&config.contracts_dir, &introspector).with_context(|| {
        format!(
            "failed to load service contracts from {}",
            config.contracts_dir.display()
        )
    })?;

    let addr = config.bind_addr()?;
    let state = Arc::new(ExportState::new(catalog, config)?);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{addr}/npm/packages");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
