//! Task form handling for the terminal user interface.
//!
//! The form holds the raw text of the date, description and time inputs plus
//! the category selector. Parsing happens when the user commits a value, so a
//! half-typed date never reaches the session.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::fields::Category;
use crate::task::{date_key, parse_date_input, parse_time_input};
use crate::tui::{enums::Focus, input::InputField};

/// Time input default.
pub const DEFAULT_TIME: &str = "09:00";
/// Step for Up/Down on the time input.
pub const TIME_STEP_MINUTES: i64 = 15;

pub struct TaskForm {
    pub date: InputField,
    pub task: InputField,
    pub time: InputField,
    pub category: usize,
    pub focus: Focus,
}

impl TaskForm {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: InputField::with_value(&date_key(date)),
            task: InputField::new(),
            time: InputField::with_value(DEFAULT_TIME),
            category: 0,
            focus: Focus::Date,
        }
    }

    pub fn selected_category(&self) -> Category {
        Category::ALL[self.category % Category::ALL.len()]
    }

    /// Input under the cursor, if the focused element takes text.
    pub fn active_input(&mut self) -> Option<&mut InputField> {
        match self.focus {
            Focus::Date => Some(&mut self.date),
            Focus::Task => Some(&mut self.task),
            Focus::Time => Some(&mut self.time),
            Focus::Category | Focus::Tasks => None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn cycle_category(&mut self, right: bool) {
        let len = Category::ALL.len();
        self.category = if right {
            (self.category + 1) % len
        } else {
            (self.category + len - 1) % len
        };
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date_input(&self.date.value)
    }

    pub fn parsed_time(&self) -> Option<NaiveTime> {
        parse_time_input(&self.time.value)
    }

    /// Show `date` in the date input.
    pub fn show_date(&mut self, date: NaiveDate) {
        let key = date_key(date);
        if self.date.value != key {
            self.date.set(&key);
        }
    }

    /// Shift the time input by whole steps, wrapping at midnight.
    /// Unparseable text restarts from the default.
    pub fn step_time(&mut self, steps: i64) {
        let base = self
            .parsed_time()
            .or_else(|| parse_time_input(DEFAULT_TIME))
            .unwrap_or_default();
        let (shifted, _) = base.overflowing_add_signed(Duration::minutes(steps * TIME_STEP_MINUTES));
        self.time.set(&shifted.format("%H:%M").to_string());
    }
}
