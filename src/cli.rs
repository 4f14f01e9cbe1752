use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::quote::DEFAULT_QUOTE_URL;

/// Smart daily planner.
/// Storage defaults to ./tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "planner", version, about = "Smart daily planner")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// File the day report is written to.
    #[arg(long, global = true)]
    pub export_file: Option<PathBuf>,

    /// Endpoint serving motivational quotes.
    #[arg(long, global = true, default_value = DEFAULT_QUOTE_URL)]
    pub quote_url: String,

    /// Seconds to wait for the quote endpoint.
    #[arg(long, global = true, default_value_t = 5)]
    pub quote_timeout: u64,

    /// Never contact the quote endpoint.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Directory for log files (defaults to `logs` next to the task file).
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log filter level, e.g. `debug`. Falls back to RUST_LOG, then `info`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
