// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::google_sheets_repository::GoogleSheetsRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_svg, dashboard_json, dashboard_page, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(GoogleSheetsRepository::new(
        config.sheet.url.clone(),
        Duration::from_secs(config.sheet.timeout_secs),
    )?);

    // Create services (application layer)
    let dashboard_service =
        DashboardService::new(repository, config.questions.clone(), config.page.title.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        chart_settings: config.chart.clone(),
        title: config.page.title.clone(),
    });

    // Build router (presentation layer)
    // Compression is handled in the response builders, not by a tower layer
    let router = Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard_json))
        .route("/charts/:file", get(chart_svg))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.addr.parse()?;
    tracing::info!("Starting survey-pareto dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
