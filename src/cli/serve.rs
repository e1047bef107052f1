//! Serve CLI command

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::{Settings, TimesheetPaths};
use crate::server::{self, AppState};
use crate::storage::StoreRegistry;

/// Seed empty tables, then serve the download endpoints until Ctrl-C
pub fn handle_serve_command(
    paths: &TimesheetPaths,
    settings: &Settings,
    registry: StoreRegistry,
    listen: Option<String>,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(registry, settings, paths));

    let report = state.seeder.seed_all();
    info!("startup seed loaded {} records", report.total_records());

    let listen_addr = listen.unwrap_or_else(|| settings.server.listen_addr.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(server::run(state, &listen_addr, settings.backup_interval()))
}
