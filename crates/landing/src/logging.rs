//! Logging setup for the landing binary.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "landing=info,landing_pattern=info";
const VERBOSE_LOG_FILTER: &str = "landing=debug,landing_pattern=debug";

pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Daily rolling log files are written here when set
    pub log_dir: Option<&'a Path>,
}

/// Initialize tracing with stderr output and an optional rolling file.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_logging(config: LogConfig<'_>) -> Result<Option<WorkerGuard>> {
    let mut guard = None;
    let file_layer = match config.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let file_name = format!("{}.log", sanitize_name(config.app_name));
            let file_appender = tracing_appender::rolling::daily(dir, file_name);
            let (file_writer, worker_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_filter(env_filter(config.verbose)),
            )
        }
        None => None,
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter(config.verbose));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_LOG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
