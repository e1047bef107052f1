//! Download handlers
//!
//! `GET /api/download/data` builds a fresh export archive and sends it back
//! as an attachment; the archive is read while the export lock is still held.
//! `GET /api/download/logs/{log_level}` returns the info (`0`) or error (`1`)
//! log file.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use crate::backup::DEFAULT_ARCHIVE_NAME;
use crate::logging::LogLevel;

use super::error::{ApiError, ApiResult};
use super::sniff::sniff_content_type;
use super::state::AppState;

/// Export every table and send the archive
pub async fn download_data(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let exporter = state.exporter.clone();
    let (archive, read) = tokio::task::spawn_blocking(move || {
        exporter.export_with(|archive| (archive.to_path_buf(), std::fs::read(archive)))
    })
    .await
    .map_err(|e| export_failed(&e.to_string()))?
    .map_err(|e| export_failed(&e.to_string()))?;

    let bytes = read.map_err(|e| {
        error!("unable to read archive {}: {}", archive.display(), e);
        ApiError::NotFound("File not found.".into())
    })?;

    info!("sending {} ({} bytes)", archive.display(), bytes.len());
    Ok(attachment(&archive, bytes))
}

/// Send the info or error log
pub async fn download_logs(
    State(state): State<Arc<AppState>>,
    Path(log_level): Path<String>,
) -> ApiResult<Response> {
    let level: LogLevel = log_level.parse().map_err(|_| {
        error!("DownloadLogs, unknown logLevel {}", log_level);
        ApiError::BadRequest(format!("unknown logLevel {}", log_level))
    })?;

    let path = level.path_in(&state.log_dir);
    let response = match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(_) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{} contains no log entries", level.file_name()),
        )
            .into_response(),
    };
    Ok(response)
}

/// Liveness check
pub async fn health() -> &'static str {
    "ok"
}

fn export_failed(reason: &str) -> ApiError {
    error!("downloading data failed with error: {}", reason);
    ApiError::NotFound(format!("downloading data failed with error: {}", reason))
}

fn attachment(archive: &FsPath, bytes: Vec<u8>) -> Response {
    let file_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string());
    let content_type = sniff_content_type(&bytes);
    let content_length = bytes.len().to_string();

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, content_length),
        ],
        Body::from(bytes),
    )
        .into_response()
}
