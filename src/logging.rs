//! Tracing setup.
//!
//! The terminal belongs to the UI, so events go to a daily rolling file in
//! the platform data directory instead of stdout.

use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

const LOG_FILE_PREFIX: &str = "sentiscope.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("No suitable data directory available for logs")]
    NoDataDir,
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Installs the global subscriber and returns the log directory.
/// Later calls are no-ops.
pub fn init(default_filter: &str) -> Result<PathBuf, LoggingError> {
    let log_dir = log_directory()?;
    if LOG_GUARD.get().is_some() {
        return Ok(log_dir);
    }

    fs::create_dir_all(&log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.clone(),
        source,
    })?;

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(file_writer);

    let subscriber = Registry::default()
        .with(build_env_filter(default_filter))
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(log_dir)
}

pub fn log_directory() -> Result<PathBuf, LoggingError> {
    ProjectDirs::from("", "", "sentiscope")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .ok_or(LoggingError::NoDataDir)
}

/// RUST_LOG wins; otherwise the configured filter, falling back to "info"
/// when that does not parse.
fn build_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
