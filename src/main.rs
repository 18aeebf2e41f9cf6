// corpus-gateway - Authenticated API gateway for the corpus administration dashboard
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use corpus_gateway::cli::Args;
use corpus_gateway::config::AppConfig;
use corpus_gateway::server::create_router;
use corpus_gateway::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration, then apply command-line overrides
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    if args.check_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting corpus-gateway v{}", env!("CARGO_PKG_VERSION"));

    match config.upstream_base() {
        Some(base) => info!("Proxying {}/* to {}", config.proxy.route_prefix, base),
        None => warn!("No upstream base URL configured; API calls will fail until one is set"),
    }

    // Phase 3: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 4: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
