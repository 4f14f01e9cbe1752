//! Planner TUI entry point and setup.

use std::io;

use chrono::Local;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::config::Config;
use crate::session::Session;
use crate::tui::app::App;

/// Raw mode and the alternate screen for as long as it lives. Dropping it
/// restores the terminal, including on early returns and panics.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Initialise and run the planner page until the user quits.
///
/// The terminal is restored before any session error is returned.
pub fn run_tui(config: &Config) -> anyhow::Result<()> {
    let session = Session::from_config(config, Local::now().date_naive(), true);
    let mut app = App::new(session)?;
    info!(db = %config.db_path.display(), "planner page opened");

    let mut guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = app.run(&mut terminal);

    drop(terminal);
    guard.restore()?;
    result
}
