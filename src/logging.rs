//! File logging. The terminal UI owns stdout, so everything goes to a file.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogConfig};

/// Keep this alive for the life of the program; dropping it flushes the log.
pub struct LogGuard {
    _guard: WorkerGuard,
    pub path: PathBuf,
}

pub fn log_path(config: &LogConfig) -> Result<PathBuf> {
    match &config.file {
        Some(path) => Ok(path.clone()),
        None => Ok(AppConfig::config_dir()?.join("minitools.log")),
    }
}

fn filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("Invalid log level: '{}'", level))
}

pub fn init(config: &LogConfig) -> Result<LogGuard> {
    let path = log_path(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    // RUST_LOG wins over the configured level
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => filter(&config.level)?,
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(LogGuard {
        _guard: guard,
        path,
    })
}
