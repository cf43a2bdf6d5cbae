//! MovieRec catalog service.
//!
//! Serves the movie catalog over HTTP and proxies recommendation requests
//! to the recommender configured with `--recommender-url`.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use recommender_client::{HttpRecommender, Recommender};
use server::{AppState, CatalogService, Config, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug")),
        )
        .init();

    let config = Config::parse();
    info!("Starting MovieRec catalog service");

    let catalog = Arc::new(config.load_catalog().context("Failed to load catalog")?);
    info!("Catalog ready with {} movies", catalog.len());

    let recommender = HttpRecommender::new(&config.recommender_url, config.recommender_timeout())
        .context("Failed to create recommender client")?;

    // Only a heads-up; the service runs without the recommender
    let probe = recommender.clone();
    tokio::spawn(async move {
        match probe.health().await {
            Ok(()) => info!("Recommender at {} is healthy", probe.service_address()),
            Err(e) => warn!("Recommender at {} is not reachable: {}", probe.service_address(), e),
        }
    });

    let service = CatalogService::new(catalog, Arc::new(recommender));
    let app = build_router(AppState::new(service));

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    info!("Catalog service listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Catalog service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
