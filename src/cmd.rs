//! Command implementations for the CLI interface.
//!
//! Every subcommand drives the same session handlers as the terminal page,
//! so adding or toggling from the shell persists exactly as it would there.

use chrono::{Local, NaiveDate, NaiveTime};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::config::Config;
use crate::fields::{Category, ToastKind};
use crate::quote::{QuoteProvider, QuoteSource, StaticQuote};
use crate::session::{Interaction, NewTask, Render, Session};
use crate::task::{long_date, parse_time_input};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive planner page (default).
    Ui,

    /// Add a task.
    Add {
        /// What needs doing.
        task: String,
        /// Day of the task, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Time of day, HH:MM or HH:MM:SS.
        #[arg(long, default_value = "09:00", value_parser = parse_time_arg)]
        time: NaiveTime,
        /// Category: home | work | self-care | study.
        #[arg(long, value_enum, default_value_t = Category::Home)]
        category: Category,
    },

    /// Show the schedule for a day.
    List {
        /// Day to show, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Mark a row of a day's schedule as done.
    Done {
        /// Row number as printed by `list`.
        row: usize,
        /// Day of the schedule, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Mark the row as not done instead.
        #[arg(long)]
        undo: bool,
    },

    /// Write a day's schedule to the export file.
    Export {
        /// Day to export, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print a motivational quote.
    Quote,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_time_arg(s: &str) -> Result<NaiveTime, String> {
    parse_time_input(s).ok_or_else(|| format!("invalid time '{s}', expected HH:MM or HH:MM:SS"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Print the toast of a render the way the page would show it.
fn print_toast(render: &Render) {
    if let Some(toast) = &render.toast {
        match toast.kind {
            ToastKind::Success => println!("{}", toast.message),
            ToastKind::Warning => eprintln!("{}", toast.message),
        }
    }
}

fn print_schedule(session: &Session) {
    println!("📅 Schedule for {}", long_date(session.selected_date()));
    for line in session.day_view().render_lines(session.tasks()) {
        println!("{line}");
    }
}

/// Launch the terminal page.
pub fn cmd_ui(config: &Config) -> anyhow::Result<()> {
    run_tui(config)
}

/// Add a task through the same handler as the page's "Add Task" button.
pub fn cmd_add(
    config: &Config,
    task: String,
    date: Option<NaiveDate>,
    time: NaiveTime,
    category: Category,
) -> anyhow::Result<()> {
    let mut session = Session::from_config(config, date.unwrap_or_else(today), false);
    let render = session.handle(Interaction::Add(NewTask {
        description: task,
        time,
        category,
    }))?;
    print_toast(&render);
    Ok(())
}

pub fn cmd_list(config: &Config, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let mut session = Session::from_config(config, date.unwrap_or_else(today), false);
    session.handle(Interaction::Load)?;
    print_schedule(&session);
    Ok(())
}

/// Toggle a 1-based row of the day view.
pub fn cmd_done(
    config: &Config,
    row: usize,
    date: Option<NaiveDate>,
    undo: bool,
) -> anyhow::Result<()> {
    if row == 0 {
        anyhow::bail!("rows are numbered from 1");
    }
    let mut session = Session::from_config(config, date.unwrap_or_else(today), false);
    session.handle(Interaction::Toggle {
        row: row - 1,
        done: !undo,
    })?;
    print_schedule(&session);
    Ok(())
}

pub fn cmd_export(config: &Config, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let mut session = Session::from_config(config, date.unwrap_or_else(today), false);
    let render = session.handle(Interaction::Export)?;
    print_toast(&render);
    Ok(())
}

pub fn cmd_quote(config: &Config) {
    let quote = if config.offline {
        StaticQuote::default().get_quote()
    } else {
        QuoteProvider::new(config.quote_url.clone(), config.quote_timeout).get_quote()
    };
    println!("{quote}");
}

pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::store::TaskStore;
    use clap::Parser;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> Config {
        let db = dir.join("tasks.json");
        let export = dir.join("daily_tasks.txt");
        let cli = Cli::parse_from([
            "planner",
            "--offline",
            "--db",
            db.to_str().unwrap(),
            "--export-file",
            export.to_str().unwrap(),
            "list",
        ]);
        Config::from_cli(&cli)
    }

    #[test]
    fn add_arguments_parse() {
        let cli = Cli::parse_from([
            "planner", "add", "Write report", "--date", "2024-06-01", "--time", "14:30", "--category", "self-care",
        ]);
        match cli.command {
            Some(Commands::Add { task, date, time, category }) => {
                assert_eq!(task, "Write report");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1));
                assert_eq!(time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
                assert_eq!(category, Category::SelfCare);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn add_defaults_to_nine_and_home() {
        let cli = Cli::parse_from(["planner", "add", "Water plants"]);
        match cli.command {
            Some(Commands::Add { time, category, date, .. }) => {
                assert_eq!(time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
                assert_eq!(category, Category::Home);
                assert!(date.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn bad_time_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["planner", "add", "x", "--time", "9am"]).is_err());
    }

    #[test]
    fn add_done_and_export_round_trip_through_files() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let date = NaiveDate::from_ymd_opt(2024, 6, 1);

        cmd_add(&config, "Email".into(), date, NaiveTime::from_hms_opt(14, 0, 0).unwrap(), Category::Work).unwrap();
        cmd_add(&config, "Gym".into(), date, NaiveTime::from_hms_opt(9, 30, 0).unwrap(), Category::SelfCare).unwrap();
        cmd_done(&config, 1, date, false).unwrap();
        cmd_export(&config, date).unwrap();

        let tasks = TaskStore::new(&config.db_path).load().unwrap();
        assert!(tasks[1].done);
        assert!(!tasks[0].done);
        let report = std::fs::read_to_string(&config.export_path).unwrap();
        assert!(report.starts_with("Tasks for Saturday, 01 June 2024\n\n✅ 09:30:00"));
    }

    #[test]
    fn row_zero_is_rejected() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(cmd_done(&config, 0, None, false).is_err());
    }
}
