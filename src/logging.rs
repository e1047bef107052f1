//! Logging bootstrap
//!
//! Installs a tracing subscriber writing to three sinks:
//! - `info.log` in the log folder, INFO and above
//! - `error.log` in the log folder, ERROR only
//! - stderr, filtered by the configured level
//!
//! The log files are what the log-download endpoint serves.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::{TimesheetError, TimesheetResult};

/// Log file receiving INFO and above
pub const INFO_LOG_FILE: &str = "info.log";

/// Log file receiving ERROR only
pub const ERROR_LOG_FILE: &str = "error.log";

/// Keeps the non-blocking log writers alive; logs are flushed on drop
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns a configuration error when `level` is not a valid filter, the log
/// folder cannot be created, or a subscriber is already installed.
pub fn init_logging(level: &str, log_dir: &Path) -> TimesheetResult<LoggingGuard> {
    let console_filter = EnvFilter::try_new(level)
        .map_err(|e| TimesheetError::Config(format!("invalid log level `{}`: {}", level, e)))?;

    std::fs::create_dir_all(log_dir).map_err(|e| {
        TimesheetError::Config(format!(
            "failed to create log directory `{}`: {}",
            log_dir.display(),
            e
        ))
    })?;

    let (info_writer, info_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, INFO_LOG_FILE));
    let (error_writer, error_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, ERROR_LOG_FILE));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(LevelFilter::INFO);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .try_init()
        .map_err(|e| TimesheetError::Config(format!("failed to start logger: {}", e)))?;

    Ok(LoggingGuard {
        _guards: vec![info_guard, error_guard],
    })
}

/// Log file selector of the log-download endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    /// File name of this log inside the log folder
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Info => INFO_LOG_FILE,
            Self::Error => ERROR_LOG_FILE,
        }
    }

    /// Full path of this log
    pub fn path_in(&self, log_dir: &Path) -> PathBuf {
        log_dir.join(self.file_name())
    }
}

impl FromStr for LogLevel {
    type Err = TimesheetError;

    /// `0` selects the info log, `1` the error log
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Info),
            "1" => Ok(Self::Error),
            other => Err(TimesheetError::Validation(format!(
                "unknown logLevel {}",
                other
            ))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
