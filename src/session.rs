//! Per-session context and interaction handlers.
//!
//! A `Session` is created on the first interaction and dropped when the page
//! or command ends. Each interaction runs one handler, then the day view's
//! completion states are written back to the store so every interaction
//! leaves the file matching what is on screen.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::day_view::DayView;
use crate::export::{ExportError, Exporter};
use crate::fields::{Category, ToastKind};
use crate::quote::{QuoteProvider, QuoteSource, StaticQuote};
use crate::registry::{AddOutcome, Registry, RegistryError};
use crate::store::{StoreError, TaskStore};
use crate::task::Task;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("no task in row {0} for the selected date")]
    NoSuchRow(usize),
}

/// Form contents submitted with "Add Task". The date is the session's selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    pub time: NaiveTime,
    pub category: Category,
}

/// User interactions the page can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Load,
    ChangeDate(NaiveDate),
    Add(NewTask),
    /// `row` is a position in the current day view, not in the collection.
    Toggle { row: usize, done: bool },
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    fn success(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Warning,
            message: message.into(),
        }
    }
}

/// What the page should show after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Render {
    pub quote: String,
    pub date: NaiveDate,
    pub toast: Option<Toast>,
}

pub struct Session {
    registry: Registry,
    exporter: Exporter,
    quotes: Box<dyn QuoteSource>,
    selected_date: NaiveDate,
}

impl Session {
    pub fn new(
        store: TaskStore,
        exporter: Exporter,
        quotes: Box<dyn QuoteSource>,
        selected_date: NaiveDate,
    ) -> Self {
        Self {
            registry: Registry::new(store),
            exporter,
            quotes,
            selected_date,
        }
    }

    /// Session wired from configuration. `with_quotes` selects the remote
    /// provider; otherwise the static fallback is used.
    pub fn from_config(config: &Config, selected_date: NaiveDate, with_quotes: bool) -> Self {
        let quotes: Box<dyn QuoteSource> = if with_quotes && !config.offline {
            Box::new(QuoteProvider::new(config.quote_url.clone(), config.quote_timeout))
        } else {
            Box::new(StaticQuote::default())
        };
        Self::new(
            TaskStore::new(&config.db_path),
            Exporter::new(&config.export_path),
            quotes,
            selected_date,
        )
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn tasks(&self) -> &[Task] {
        self.registry.tasks()
    }

    /// Filtered, ordered view of the selected date.
    pub fn day_view(&self) -> DayView {
        DayView::build(self.registry.tasks(), self.selected_date)
    }

    /// Run one interaction to completion.
    pub fn handle(&mut self, interaction: Interaction) -> Result<Render, SessionError> {
        let quote = self.quotes.get_quote();
        self.registry.initialize()?;

        let toast = match interaction {
            Interaction::Load => None,
            Interaction::ChangeDate(date) => {
                debug!(%date, "date changed");
                self.selected_date = date;
                None
            }
            Interaction::Add(new_task) => Some(self.add(new_task)?),
            Interaction::Toggle { row, done } => {
                self.toggle(row, done)?;
                None
            }
            Interaction::Export => Some(self.export()?),
        };

        self.sync_day_view()?;
        Ok(Render {
            quote,
            date: self.selected_date,
            toast,
        })
    }

    /// Surrounding whitespace is dropped from the description before it is
    /// stored, whichever surface submitted it.
    fn add(&mut self, new_task: NewTask) -> Result<Toast, SessionError> {
        let description = new_task.description.trim();
        let task = Task::new(self.selected_date, new_task.time, description, new_task.category);
        let time = task.time.clone();
        match self.registry.add(task)? {
            AddOutcome::Added => Ok(Toast::success(format!(
                "✅ Task added: {} at {}",
                description, time
            ))),
            AddOutcome::EmptyDescription => {
                Ok(Toast::warning("⚠️ Please enter a task before adding."))
            }
        }
    }

    fn toggle(&mut self, row: usize, done: bool) -> Result<(), SessionError> {
        let index = self
            .day_view()
            .task_index(row)
            .ok_or(SessionError::NoSuchRow(row))?;
        self.registry.set_done(index, done)?;
        Ok(())
    }

    fn export(&mut self) -> Result<Toast, SessionError> {
        let view = self.day_view();
        self.exporter
            .export(view.tasks(self.registry.tasks()), self.selected_date)?;
        info!(rows = view.len(), "day exported");
        Ok(Toast::success(format!(
            "📤 Tasks exported to {}",
            self.exporter.path().display()
        )))
    }

    /// Write the visible rows' completion states back and save the whole
    /// collection, changed or not.
    fn sync_day_view(&mut self) -> Result<(), SessionError> {
        let view = self.day_view();
        if view.is_empty() {
            return Ok(());
        }
        let states = view.done_states(self.registry.tasks());
        self.registry.sync_done(&states)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::FALLBACK_QUOTE;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn session() -> (TempDir, Session) {
        let dir = tempdir().unwrap();
        let session = Session::new(
            TaskStore::new(dir.path().join("tasks.json")),
            Exporter::new(dir.path().join("daily_tasks.txt")),
            Box::new(StaticQuote::default()),
            june_first(),
        );
        (dir, session)
    }

    fn new_task(description: &str, h: u32, m: u32, category: Category) -> Interaction {
        Interaction::Add(NewTask {
            description: description.to_string(),
            time: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
            category,
        })
    }

    #[test]
    fn load_returns_quote_and_date() {
        let (_dir, mut session) = session();
        let render = session.handle(Interaction::Load).unwrap();
        assert_eq!(render.quote, FALLBACK_QUOTE);
        assert_eq!(render.date, june_first());
        assert!(render.toast.is_none());
    }

    #[test]
    fn add_to_empty_store_shows_one_row() {
        let (dir, mut session) = session();
        let render = session
            .handle(new_task("Write report", 9, 0, Category::Work))
            .unwrap();
        let toast = render.toast.unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "✅ Task added: Write report at 09:00:00");

        let view = session.day_view();
        assert_eq!(view.len(), 1);
        let row = view.tasks(session.tasks()).next().unwrap();
        assert_eq!(row.line(), "🕒 09:00:00 — 💼 Work Write report");
        assert!(!row.done);

        let on_disk = TaskStore::new(dir.path().join("tasks.json")).load().unwrap();
        assert_eq!(on_disk, session.tasks());
    }

    #[test]
    fn empty_description_warns_and_appends_nothing() {
        let (_dir, mut session) = session();
        let render = session.handle(new_task("", 9, 0, Category::Home)).unwrap();
        let toast = render.toast.unwrap();
        assert_eq!(toast.kind, ToastKind::Warning);
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn description_is_trimmed_before_storing() {
        let (dir, mut session) = session();
        let render = session.handle(new_task("  Gym  ", 7, 0, Category::SelfCare)).unwrap();
        assert_eq!(render.toast.unwrap().message, "✅ Task added: Gym at 07:00:00");
        assert_eq!(session.tasks()[0].task, "Gym");

        let on_disk = TaskStore::new(dir.path().join("tasks.json")).load().unwrap();
        assert_eq!(on_disk[0].task, "Gym");
    }

    #[test]
    fn every_interaction_resaves_a_non_empty_view() {
        let (dir, mut session) = session();
        let path = dir.path().join("tasks.json");
        session.handle(new_task("Write report", 9, 0, Category::Work)).unwrap();

        fs::remove_file(&path).unwrap();
        session.handle(Interaction::Load).unwrap();
        assert_eq!(TaskStore::new(&path).load().unwrap(), session.tasks());

        fs::write(&path, "[]").unwrap();
        session.handle(Interaction::ChangeDate(june_first())).unwrap();
        assert_eq!(TaskStore::new(&path).load().unwrap(), session.tasks());
    }

    #[test]
    fn empty_view_does_not_save() {
        let (dir, mut session) = session();
        let path = dir.path().join("tasks.json");
        session.handle(new_task("Write report", 9, 0, Category::Work)).unwrap();
        fs::remove_file(&path).unwrap();

        session
            .handle(Interaction::ChangeDate(june_first().succ_opt().unwrap()))
            .unwrap();
        session.handle(Interaction::Load).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn toggle_changes_only_the_chosen_row() {
        let (dir, mut session) = session();
        session.handle(new_task("Late", 14, 0, Category::Work)).unwrap();
        session.handle(new_task("Early", 9, 30, Category::Study)).unwrap();
        session.handle(new_task("Lunch", 12, 0, Category::Home)).unwrap();

        // Row 0 is "Early", stored at collection position 1.
        session.handle(Interaction::Toggle { row: 0, done: true }).unwrap();
        let done: Vec<bool> = session.tasks().iter().map(|t| t.done).collect();
        assert_eq!(done, [false, true, false]);

        let on_disk = TaskStore::new(dir.path().join("tasks.json")).load().unwrap();
        assert_eq!(on_disk, session.tasks());
    }

    #[test]
    fn toggle_outside_view_is_an_error() {
        let (_dir, mut session) = session();
        let err = session
            .handle(Interaction::Toggle { row: 3, done: true })
            .unwrap_err();
        assert!(matches!(err, SessionError::NoSuchRow(3)));
    }

    #[test]
    fn date_change_moves_the_view() {
        let (_dir, mut session) = session();
        session.handle(new_task("Today", 9, 0, Category::Home)).unwrap();
        let next = june_first().succ_opt().unwrap();
        let render = session.handle(Interaction::ChangeDate(next)).unwrap();
        assert_eq!(render.date, next);
        assert!(session.day_view().is_empty());
        session.handle(new_task("Tomorrow", 9, 0, Category::Home)).unwrap();
        assert_eq!(session.tasks()[1].date, "2024-06-02");
    }

    #[test]
    fn export_writes_sorted_report() {
        let (dir, mut session) = session();
        session.handle(new_task("Email", 14, 0, Category::Work)).unwrap();
        session.handle(new_task("Gym", 9, 30, Category::SelfCare)).unwrap();
        session.handle(Interaction::Toggle { row: 0, done: true }).unwrap();

        let render = session.handle(Interaction::Export).unwrap();
        assert_eq!(render.toast.unwrap().kind, ToastKind::Success);
        let report = fs::read_to_string(dir.path().join("daily_tasks.txt")).unwrap();
        assert_eq!(
            report,
            "Tasks for Saturday, 01 June 2024\n\n\
             ✅ 09:30:00 — 🧘 Self-care Gym\n\
             ❌ 14:00:00 — 💼 Work Email\n"
        );
    }

    #[test]
    fn malformed_task_file_fails_the_interaction() {
        let (dir, mut session) = session();
        fs::write(dir.path().join("tasks.json"), "not json").unwrap();
        assert!(matches!(
            session.handle(Interaction::Load),
            Err(SessionError::Store(StoreError::Malformed { .. }))
        ));
    }
}
