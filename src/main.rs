// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_state::DashboardState;
use crate::application::poller::Poller;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_repository::HttpActivityRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpActivityRepository::new(
        config.backend_url.clone(),
        config.request_timeout(),
    )?);

    // Start polling (application layer); the handle is dropped on shutdown
    let dashboard = DashboardState::new();
    let poller = Poller::new(repository, config.poll_interval()).spawn(dashboard.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard,
        stream_url: config.stream_url.clone(),
    });

    // Start server
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen_addr {:?}", config.listen_addr))?;
    tracing::info!("Starting pet-activity-dashboard on {} (backend {})", addr, config.backend_url);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // never resolve, keep serving
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
