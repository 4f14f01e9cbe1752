//! Task data structure and related functionality.
//!
//! This module defines the `Task` record persisted in the task file. Date and
//! time are kept as zero-padded text so that string equality and string order
//! agree with calendar equality and chronological order.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::fields::Category;

/// Storage format of [`Task::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format of [`Task::time`].
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A single planned item for one day.
///
/// Only `done` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub date: String,
    pub time: String,
    pub task: String,
    pub category: Category,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Build a new, not yet completed task.
    pub fn new(date: NaiveDate, time: NaiveTime, task: &str, category: Category) -> Self {
        Task {
            date: date_key(date),
            time: time.format(TIME_FORMAT).to_string(),
            task: task.to_string(),
            category,
            done: false,
        }
    }

    /// Display line shared by the day view and the command line listing.
    pub fn line(&self) -> String {
        format!("🕒 {} — {} {}", self.time, self.category, self.task)
    }
}

/// Text form of a date as stored in [`Task::date`].
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Long-form heading for a date, e.g. `Saturday, 01 June 2024`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %d %B %Y").to_string()
}

/// Parse `HH:MM` or `HH:MM:SS` as typed into the time input.
pub fn parse_time_input(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Parse `YYYY-MM-DD` as typed into the date input.
pub fn parse_date_input(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_uses_zero_padded_text() {
        let t = Task::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            "Write report",
            Category::Work,
        );
        assert_eq!(t.date, "2024-06-01");
        assert_eq!(t.time, "09:05:00");
        assert!(!t.done);
        assert_eq!(t.line(), "🕒 09:05:00 — 💼 Work Write report");
    }

    #[test]
    fn record_has_exactly_the_five_fields() {
        let t = Task::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            "Stretch",
            Category::SelfCare,
        );
        let value = serde_json::to_value(&t).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, ["category", "date", "done", "task", "time"]);
        assert_eq!(value["category"], "🧘 Self-care");
    }

    #[test]
    fn time_input_accepts_short_and_long_forms() {
        assert_eq!(parse_time_input("09:00"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time_input(" 14:30:15 "), NaiveTime::from_hms_opt(14, 30, 15));
        assert_eq!(parse_time_input("25:00"), None);
        assert_eq!(parse_time_input("nine"), None);
    }

    #[test]
    fn long_date_names_weekday_and_month() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(long_date(d), "Saturday, 01 June 2024");
        assert_eq!(parse_date_input("2024-06-01"), Some(d));
        assert_eq!(parse_date_input("01/06/2024"), None);
    }

    #[test]
    fn string_order_matches_chronological_order() {
        let mut times: Vec<NaiveTime> = (0..24 * 4)
            .rev()
            .map(|q| NaiveTime::from_hms_opt(q / 4, (q % 4) * 15, q % 60).unwrap())
            .collect();
        let mut keys: Vec<String> = times.iter().map(|t| t.format(TIME_FORMAT).to_string()).collect();
        times.sort();
        keys.sort();
        let formatted: Vec<String> = times.iter().map(|t| t.format(TIME_FORMAT).to_string()).collect();
        assert_eq!(keys, formatted);
    }
}
