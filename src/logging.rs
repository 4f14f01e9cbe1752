//! File logging. The terminal page owns stdout, so logs only go to disk.

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

pub const LOG_PREFIX: &str = "planner";

pub fn enable_logging(log_dir: &Path, log_level: Option<&str>) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(log_dir)?;

    let level = log_level
        .map(str::to_string)
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
        )))
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;
    Ok(())
}
