// stability-relay - Multipart relay from browser forms to the Stability AI image API

use anyhow::Result;
use clap::Parser;
use stability_relay::cli::Args;
use stability_relay::config::{AppConfig, API_KEY_ENV};
use stability_relay::server::create_router;
use stability_relay::stability::StabilityClient;
use stability_relay::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Phase 1: Load configuration (.env first, then file/env, then CLI)
    dotenv::dotenv().ok();
    let args = Args::parse();
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting stability-relay v{}", env!("CARGO_PKG_VERSION"));

    if !config.provider.api_key.is_configured() {
        warn!(
            "{} is not set; /health will report degraded and image routes will fail",
            API_KEY_ENV
        );
    }

    // Phase 3: Build the runtime with the configured worker count
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: AppConfig) -> Result<()> {
    // Phase 4: Provider client and router
    let provider = StabilityClient::new(&config.provider)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, Arc::new(provider))?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
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
