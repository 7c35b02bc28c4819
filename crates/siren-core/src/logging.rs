//! Logging setup.
//!
//! The TUI owns the terminal, so nothing may write to stdout/stderr while it
//! runs. All diagnostics go through `tracing` into a daily-rolling file under
//! ${SIREN_HOME}/logs. The filter is controlled by the SIREN_LOG env var
//! (standard `tracing_subscriber::EnvFilter` syntax, default "info").

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::paths;

/// Env var read for the log filter.
const LOG_ENV: &str = "SIREN_LOG";

/// Initializes file logging and returns the guard that flushes on drop.
///
/// The guard must be held for the lifetime of the process; dropping it
/// stops the background writer.
pub fn init() -> Result<WorkerGuard> {
    init_at(&paths::logs_dir())
}

/// Initializes file logging into a specific directory.
pub fn init_at(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, "siren.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}
