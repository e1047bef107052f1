//! Scheduled backups while serving

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::backup::BackupReport;
use crate::error::{TimesheetError, TimesheetResult};

use super::state::AppState;

/// Run one backup of every table into the configured backup folder
///
/// Skipped, returning `Ok(None)`, while another run holds the folder.
pub async fn run_scheduled_backup(state: &AppState) -> TimesheetResult<Option<BackupReport>> {
    let coordinator = state.coordinator.clone();
    let folder = state.backup_dir.clone();
    let rotation = state.rotation;

    let report =
        tokio::task::spawn_blocking(move || coordinator.try_run_backup(rotation, &folder))
            .await
            .map_err(|e| TimesheetError::Storage(format!("backup task failed: {}", e)))??;

    let Some(report) = report else {
        info!(
            "scheduled backup skipped, {} is in use",
            state.backup_dir.display()
        );
        return Ok(None);
    };

    if report.is_complete() {
        info!("scheduled backup {}", report.summary());
    } else {
        for failed in report.failures() {
            warn!(
                "scheduled backup of {} failed: {}",
                failed.table,
                failed
                    .result
                    .as_ref()
                    .err()
                    .or(failed.rotation_error.as_ref())
                    .map(String::as_str)
                    .unwrap_or("unknown error")
            );
        }
    }
    Ok(Some(report))
}

/// Back up every table each `every`, starting one period from now
pub fn spawn_scheduled_backups(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = run_scheduled_backup(&state).await {
                error!("scheduled backup failed: {}", e);
            }
        }
    })
}
