//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the session, turns key
//! presses into interactions, and renders the planner page: title, quote
//! panel, task form, the selected day's schedule and a toast line.

use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::day_view::NO_TASKS;
use crate::fields::ToastKind;
use crate::session::{Interaction, NewTask, Session, SessionError, Toast};
use crate::task::long_date;
use crate::tui::{
    colors::{AMBER, DARK_GREEN, DONE_GREEN, GOLD},
    enums::Focus,
    task_form::TaskForm,
};

const TITLE: &str = "🗓️ Smart Daily Planner";
const HELP: &str = "Tab: next field | Enter: add task | Space: toggle | Ctrl+E: export | Esc: quit";

/// Main application state for the planner page.
pub struct App {
    session: Session,
    form: TaskForm,
    list_state: ListState,
    quote: String,
    toast: Option<Toast>,
}

impl App {
    /// Create the page and run the initial load interaction.
    pub fn new(session: Session) -> Result<Self, SessionError> {
        let form = TaskForm::new(session.selected_date());
        let mut app = App {
            session,
            form,
            list_state: ListState::default(),
            quote: String::new(),
            toast: None,
        };
        app.dispatch(Interaction::Load)?;
        Ok(app)
    }

    /// Hand an interaction to the session and take its render instruction.
    fn dispatch(&mut self, interaction: Interaction) -> Result<(), SessionError> {
        debug!(?interaction, "dispatch");
        let render = self.session.handle(interaction)?;
        self.quote = render.quote;
        self.toast = render.toast;
        self.form.show_date(render.date);
        self.clamp_selection();
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        self.toast = Some(Toast {
            kind: ToastKind::Warning,
            message: message.to_string(),
        });
    }

    fn clamp_selection(&mut self) {
        let len = self.session.day_view().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    /// Commit the date input if it names a different day.
    fn commit_date(&mut self) -> Result<(), SessionError> {
        match self.form.parsed_date() {
            Some(date) if date == self.session.selected_date() => Ok(()),
            Some(date) => self.change_date(date),
            None => {
                self.form.show_date(self.session.selected_date());
                self.warn("⚠️ Enter the date as YYYY-MM-DD.");
                Ok(())
            }
        }
    }

    fn change_date(&mut self, date: NaiveDate) -> Result<(), SessionError> {
        self.list_state.select(None);
        self.dispatch(Interaction::ChangeDate(date))
    }

    fn shift_date(&mut self, days: i64) -> Result<(), SessionError> {
        let current = self.session.selected_date();
        match current.checked_add_signed(chrono::Duration::days(days)) {
            Some(date) => self.change_date(date),
            None => Ok(()),
        }
    }

    fn add_task(&mut self) -> Result<(), SessionError> {
        let Some(time) = self.form.parsed_time() else {
            self.warn("⚠️ Enter the time as HH:MM.");
            return Ok(());
        };
        self.dispatch(Interaction::Add(NewTask {
            description: self.form.task.value.clone(),
            time,
            category: self.form.selected_category(),
        }))?;
        if matches!(&self.toast, Some(t) if t.kind == ToastKind::Success) {
            self.form.task.clear();
        }
        Ok(())
    }

    fn toggle_selected(&mut self) -> Result<(), SessionError> {
        let Some(row) = self.list_state.selected() else {
            return Ok(());
        };
        let view = self.session.day_view();
        let Some(done) = view.tasks(self.session.tasks()).nth(row).map(|t| t.done) else {
            return Ok(());
        };
        self.dispatch(Interaction::Toggle { row, done: !done })
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.session.day_view().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.list_state.select(Some(next));
    }

    /// Apply an editing key to whichever input has focus.
    fn edit_text(&mut self, key: KeyCode) {
        let Some(input) = self.form.active_input() else {
            return;
        };
        match key {
            KeyCode::Char(c) => input.handle_char(c),
            KeyCode::Backspace => input.handle_backspace(),
            KeyCode::Delete => input.handle_delete(),
            KeyCode::Left => input.move_cursor_left(),
            KeyCode::Right => input.move_cursor_right(),
            _ => {}
        }
    }

    /// Handle one key press.
    ///
    /// Returns true if the page should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool, SessionError> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(true),
            KeyCode::Char('c') if ctrl => return Ok(true),
            KeyCode::Char('e') if ctrl => {
                self.commit_date()?;
                self.dispatch(Interaction::Export)?;
                return Ok(false);
            }
            KeyCode::Tab | KeyCode::BackTab => {
                if self.form.focus == Focus::Date {
                    self.commit_date()?;
                }
                if key.code == KeyCode::Tab {
                    self.form.next_field();
                } else {
                    self.form.prev_field();
                }
                return Ok(false);
            }
            _ => {}
        }

        match self.form.focus {
            Focus::Date => match key.code {
                KeyCode::Enter => self.commit_date()?,
                KeyCode::Up => self.shift_date(1)?,
                KeyCode::Down => self.shift_date(-1)?,
                code => self.edit_text(code),
            },
            Focus::Task => match key.code {
                KeyCode::Enter => self.add_task()?,
                code => self.edit_text(code),
            },
            Focus::Time => match key.code {
                KeyCode::Enter => self.add_task()?,
                KeyCode::Up => self.form.step_time(1),
                KeyCode::Down => self.form.step_time(-1),
                code => self.edit_text(code),
            },
            Focus::Category => match key.code {
                KeyCode::Enter => self.add_task()?,
                KeyCode::Left => self.form.cycle_category(false),
                KeyCode::Right => self.form.cycle_category(true),
                _ => {}
            },
            Focus::Tasks => match key.code {
                KeyCode::Up => self.move_selection(false),
                KeyCode::Down => self.move_selection(true),
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected()?,
                _ => {}
            },
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_quote(&self, f: &mut Frame, area: Rect) {
        let panel = Paragraph::new(self.quote.as_str())
            .style(Style::default().fg(Color::White).bg(DARK_GREEN))
            .block(Block::default().borders(Borders::ALL).title("Motivation"))
            .wrap(Wrap { trim: true });
        f.render_widget(panel, area);
    }

    fn field_line<'a>(&self, label: &'a str, value: String, focus: Focus) -> Line<'a> {
        let style = if self.form.focus == focus {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{label:<10}"), style),
            Span::raw(value),
        ])
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let category = self.form.selected_category();
        let lines = vec![
            self.field_line("Date", self.form.date.value.clone(), Focus::Date),
            self.field_line("Task", self.form.task.value.clone(), Focus::Task),
            self.field_line("Time", self.form.time.value.clone(), Focus::Time),
            self.field_line("Category", format!("◀ {category} ▶"), Focus::Category),
            Line::from(Span::styled(
                "[Enter] Add Task    [Ctrl+E] Export Today's Tasks",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let form = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("New Task"));
        f.render_widget(form, area);

        // Cursor inside the focused text input: border + label column.
        let input = match self.form.focus {
            Focus::Date => Some((0, &self.form.date)),
            Focus::Task => Some((1, &self.form.task)),
            Focus::Time => Some((2, &self.form.time)),
            Focus::Category | Focus::Tasks => None,
        };
        if let Some((row, field)) = input {
            let x = area.x + 1 + 10 + field.cursor as u16;
            let y = area.y + 1 + row;
            if x < area.right() && y < area.bottom() {
                f.set_cursor_position(Position::new(x, y));
            }
        }
    }

    fn render_schedule(&mut self, f: &mut Frame, area: Rect) {
        let title = format!("📅 Schedule for {}", long_date(self.session.selected_date()));
        let border_style = if self.form.focus == Focus::Tasks {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let view = self.session.day_view();
        if view.is_empty() {
            let info = Paragraph::new(NO_TASKS)
                .style(Style::default().fg(Color::Cyan))
                .block(block);
            f.render_widget(info, area);
            return;
        }

        let items: Vec<ListItem> = view
            .tasks(self.session.tasks())
            .map(|t| {
                if t.done {
                    ListItem::new(Line::from(vec![
                        Span::raw("[x] "),
                        Span::styled(
                            t.line(),
                            Style::default().fg(DONE_GREEN).add_modifier(Modifier::CROSSED_OUT),
                        ),
                        Span::styled(" ✅", Style::default().fg(DONE_GREEN)),
                    ]))
                } else {
                    ListItem::new(Line::from(vec![Span::raw("[ ] "), Span::raw(t.line())]))
                }
            })
            .collect();

        let highlight = if self.form.focus == Focus::Tasks {
            Style::default().bg(Color::Gray).fg(Color::Black)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, style) = match &self.toast {
            Some(toast) => {
                let bg = match toast.kind {
                    ToastKind::Success => DONE_GREEN,
                    ToastKind::Warning => AMBER,
                };
                (toast.message.clone(), Style::default().bg(bg).fg(Color::Black))
            }
            None => (HELP.to_string(), Style::default().bg(Color::Blue).fg(Color::White)),
        };
        f.render_widget(Paragraph::new(text).style(style), area);
    }

    /// Draw the whole page.
    fn render(&mut self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());
        self.render_header(f, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
            .split(rows[1]);
        self.render_quote(f, columns[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(columns[1]);
        self.render_form(f, main[0]);
        self.render_schedule(f, main[1]);

        self.render_status_bar(f, rows[2]);
    }

    /// Main event loop for the planner page.
    ///
    /// Returns the first session error, which ends the page.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
