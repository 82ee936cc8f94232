// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::registry::sales_dashboard_registry;
use crate::infrastructure::config::{load_server_config, load_style_config};
use crate::infrastructure::loader::load_sales_data;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, get_output, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_server_config()?;
    let style = load_style_config()?;

    // Initialize tracing (the debug toggle raises the default filter)
    let default_filter = if config.server.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    // Load the sales table (infrastructure layer). Any load error is fatal:
    // the process must not serve a partially loaded table.
    let table = load_sales_data(&config.data.path)
        .with_context(|| format!("loading sales data from {}", config.data.path.display()))?;
    tracing::info!(
        rows = table.len(),
        products = table.products().len(),
        regions = table.regions().len(),
        "loaded sales data"
    );

    // Wire the handler registry (application layer)
    let registry = sales_dashboard_registry(Arc::new(table), config.data.region_mode, style);

    // Create application state
    let state = Arc::new(AppState { registry });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/outputs/:id", get(get_output))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server host/port")?;
    tracing::info!("Starting sales-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
