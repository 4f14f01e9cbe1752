//! # Planner - Smart Daily Planner
//!
//! A personal daily-task tracker for the terminal. Tasks carry a date, a time
//! of day, a description and one of four categories; the page shows one day
//! at a time, ordered by time, with a checkbox per task.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the planner page for today
//! planner
//!
//! # Add a task from the shell
//! planner add "Write report" --time 09:00 --category work
//!
//! # Show, tick off and export a day
//! planner list --date 2024-06-01
//! planner done 1 --date 2024-06-01
//! planner export --date 2024-06-01
//! ```
//!
//! ## Files
//!
//! - `tasks.json` - every task ever added, as one JSON array (`--db` to move it)
//! - `daily_tasks.txt` - the last exported day (`--export-file` to move it)
//! - `logs/` - daily rolling log files next to the task file (`--log-dir`)
//!
//! The side panel shows a quote from zenquotes.io; `--offline` skips the
//! request and shows a fixed encouragement instead.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod day_view;
pub mod export;
pub mod fields;
pub mod logging;
pub mod quote;
pub mod registry;
pub mod session;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use cli::Cli;
use cmd::*;
use config::Config;

fn main() {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    if let Err(e) = logging::enable_logging(&config.log_dir, config.log_level.as_deref()) {
        eprintln!("Logging disabled: {e:#}");
    }

    let result = match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => cmd_ui(&config),
        Commands::Add { task, date, time, category } => cmd_add(&config, task, date, time, category),
        Commands::List { date } => cmd_list(&config, date),
        Commands::Done { row, date, undo } => cmd_done(&config, row, date, undo),
        Commands::Export { date } => cmd_export(&config, date),
        Commands::Quote => {
            cmd_quote(&config);
            Ok(())
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
