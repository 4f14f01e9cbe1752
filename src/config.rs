//! Runtime configuration resolved from the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;

pub const DEFAULT_DB_FILE: &str = "tasks.json";
pub const DEFAULT_EXPORT_FILE: &str = "daily_tasks.txt";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub export_path: PathBuf,
    pub quote_url: String,
    pub quote_timeout: Duration,
    pub offline: bool,
    pub log_dir: PathBuf,
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let db_path = cli.db.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));
        let log_dir = cli.log_dir.clone().unwrap_or_else(|| {
            db_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .join("logs")
        });
        Config {
            export_path: cli
                .export_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE)),
            quote_url: cli.quote_url.clone(),
            quote_timeout: Duration::from_secs(cli.quote_timeout),
            offline: cli.offline,
            log_dir,
            log_level: cli.log_level.clone(),
            db_path,
        }
    }
}
