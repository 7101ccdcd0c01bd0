//! txrisk API Server
//!
//! REST API for transaction risk scoring and categorization
//!
//! Usage:
//!   cargo run --bin txrisk_api
//!
//! Environment:
//!   PORT / TXRISK_PORT   - Server port (default: 8080)
//!   TXRISK_HOST          - Server host (default: 0.0.0.0)
//!   TXRISK_MAX_BATCH     - Max items per batch request (default: 100)
//!   TXRISK_RATE_LIMIT    - Requests per client per minute (default: 100)
//!   TXRISK_TELEMETRY_DIR - Telemetry export directory (default: ./telemetry)
//!   RUST_LOG             - Log level (default: info)

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use txrisk::api::{create_router, start_cleanup_task, AppState};
use txrisk::models::ServiceConfig;
use txrisk::utils::constants::{APP_NAME, APP_VERSION};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = ServiceConfig::from_env();
    let addr = config.socket_addr()?;

    // Create app state
    let state = Arc::new(AppState::new(config));
    let telemetry = state.telemetry.clone();

    // Start background cleanup task for rate limiter
    let cleanup = start_cleanup_task(state.limiter.clone());
    info!("Rate limiter cleanup task started");

    let app = create_router(state);

    info!(version = APP_VERSION, "{} API starting on http://{}", APP_NAME, addr);
    info!("Endpoints:");
    info!("  POST /v1/score         - Heuristic risk verdict for a signal");
    info!("  POST /v1/categorize    - Category descriptor for a transaction");
    info!("  POST /v1/assess        - Verdict, descriptor and persona");
    info!("  POST /v1/assess/batch  - Batch assessment");
    info!("  GET  /v1/stats         - Assessment statistics");
    info!("  GET  /v1/health        - Health check");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Shutdown signal received, cleaning up...");
    cleanup.abort();

    let stats = telemetry.get_stats();
    info!(
        assessed = stats.total_assessed,
        bad = stats.total_bad,
        recorded = stats.total_recorded,
        "Final telemetry"
    );

    if let Err(e) = telemetry.flush() {
        warn!(error = %e, "Failed to flush recorded events");
    }
    match telemetry.export_stats_json() {
        Ok(path) => info!("Stats exported to: {}", path.display()),
        Err(e) => warn!(error = %e, "Failed to export stats"),
    }

    info!("{} API shutdown complete", APP_NAME);
    Ok(())
}
