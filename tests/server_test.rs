//! HTTP endpoints

mod common;

use std::fs;
use std::io::Cursor;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use common::{file_names, TestEnv};
use timesheet::backup::FolderLock;
use timesheet::config::Settings;
use timesheet::models::Rate;
use timesheet::server::{create_router, run_scheduled_backup, AppState};
use tower::ServiceExt;

fn state_for(env: &TestEnv) -> Arc<AppState> {
    Arc::new(AppState::new(env.registry(), &env.settings, &env.paths))
}

async fn get(state: Arc<AppState>, uri: &str) -> Response {
    create_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

#[tokio::test]
async fn test_health() {
    let env = TestEnv::new();
    let response = get(state_for(&env), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_download_data_sends_archive() {
    let env = TestEnv::new();
    env.populate();

    let response = get(state_for(&env), "/api/download/data").await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"timesheet-backup.zip\""
    );
    assert_eq!(headers[header::CONTENT_TYPE], "application/zip");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        headers[header::CONTENT_LENGTH],
        bytes.len().to_string().as_str()
    );
    assert!(bytes.starts_with(b"PK\x03\x04"));
    assert_eq!(file_names(&env.base().join("export")).len(), 5);
}

#[tokio::test]
async fn test_download_data_reports_export_failure() {
    let env = TestEnv::new();
    fs::write(env.base().join("export"), "not a folder").unwrap();

    let response = get(state_for(&env), "/api/download/data").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response)
        .await
        .starts_with("downloading data failed with error: "));
}

#[tokio::test]
async fn test_download_missing_log() {
    let env = TestEnv::new();

    let response = get(state_for(&env), "/api/download/logs/0").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "info.log contains no log entries");
}

#[tokio::test]
async fn test_download_error_log() {
    let env = TestEnv::new();
    let log_dir = env.base().join("logs");
    fs::create_dir_all(&log_dir).unwrap();
    fs::write(log_dir.join("error.log"), "ERROR backup failed\n").unwrap();

    let response = get(state_for(&env), "/api/download/logs/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ERROR backup failed\n");
}

#[tokio::test]
async fn test_unknown_log_level_rejected() {
    let env = TestEnv::new();

    let response = get(state_for(&env), "/api/download/logs/debug").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("unknown logLevel debug"));
}

#[tokio::test]
async fn test_scheduled_backup_writes_every_table() {
    let mut settings = Settings::default();
    settings.backup.rotation = 2;
    let env = TestEnv::with_settings(settings);
    env.populate();
    let state = state_for(&env);

    let report = run_scheduled_backup(&state).await.unwrap().unwrap();

    assert!(report.is_complete());
    assert_eq!(report.total_records(), 4);
    assert_eq!(file_names(&env.base().join("backups")).len(), 5);
}

#[tokio::test]
async fn test_scheduled_backup_skips_busy_folder() {
    let env = TestEnv::new();
    env.populate();
    let state = state_for(&env);
    let backups = env.base().join("backups");

    let guard = FolderLock::for_folder(&backups).acquire().unwrap();
    assert!(run_scheduled_backup(&state).await.unwrap().is_none());
    assert!(!backups.exists());
    drop(guard);

    assert!(run_scheduled_backup(&state).await.unwrap().is_some());
    assert_eq!(file_names(&backups).len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_downloads_receive_whole_archives() {
    let env = TestEnv::new();
    env.populate();
    let rates: Vec<Rate> = (0..2000)
        .map(|n| Rate::new(format!("Rate {}", n), "isWorking"))
        .collect();
    env.storage.rates.append(rates).unwrap();
    let state = state_for(&env);

    let requests: Vec<_> = (0..6)
        .map(|_| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                let response = get(state, "/api/download/data").await;
                assert_eq!(response.status(), StatusCode::OK);
                to_bytes(response.into_body(), usize::MAX).await.unwrap()
            })
        })
        .collect();

    for request in requests {
        let bytes = request.await.unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        assert_eq!(archive.len(), 5);
    }
}
