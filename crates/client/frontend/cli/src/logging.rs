//! File logging for the console client.
//!
//! The terminal is the user interface, so log output goes only to a file.
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "mechapp.log";

/// Installs the global subscriber writing to `<cache dir>/logs/mechapp.log`.
///
/// Filtering follows `RUST_LOG`, with `info` always enabled.
pub fn setup_logging() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking_file, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    // Leak the guard to keep file writer alive
    std::mem::forget(_guard);

    let log_file = log_dir.join(LOG_FILE);
    tracing::info!("Log file: {}", log_file.display());
    Ok(log_file)
}

/// Platform cache directory for logs, or `/tmp/mechapp/logs`.
pub fn log_directory() -> PathBuf {
    ProjectDirs::from("", "", "mechapp")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/mechapp/logs"))
}
