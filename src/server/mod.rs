//! HTTP surface of the timesheet service
//!
//! Routes:
//! - `GET /api/health`
//! - `GET /api/download/data`
//! - `GET /api/download/logs/{log_level}`
//!
//! While serving, a background task backs up every table on the configured
//! interval.

pub mod download;
pub mod error;
pub mod schedule;
pub mod sniff;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{ApiError, ApiResult};
pub use schedule::{run_scheduled_backup, spawn_scheduled_backups};
pub use sniff::sniff_content_type;
pub use state::AppState;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(download::health))
        .route("/api/download/data", get(download::download_data))
        .route(
            "/api/download/logs/{log_level}",
            get(download::download_logs),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C.
///
/// Scheduled backups run every `backup_interval` when one is given.
pub async fn run(
    state: Arc<AppState>,
    listen_addr: &str,
    backup_interval: Option<Duration>,
) -> anyhow::Result<()> {
    let addr: SocketAddr = listen_addr.parse()?;

    let scheduler = backup_interval.map(|every| {
        info!("scheduled backups every {:?}", every);
        spawn_scheduled_backups(Arc::clone(&state), every)
    });

    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;
    info!("Starting timesheet server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = scheduler {
        handle.abort();
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
