//! Filtered, time-ordered view of a single day.

use chrono::NaiveDate;

use crate::task::{date_key, Task};

/// Shown in place of an empty list.
pub const NO_TASKS: &str = "No tasks for this date yet.";

/// Rows for one date, each pointing back at its position in the full collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    rows: Vec<usize>,
}

impl DayView {
    /// Select the tasks whose stored date text equals `date` and order them by
    /// time text. The sort is stable, so equal times keep insertion order.
    pub fn build(tasks: &[Task], date: NaiveDate) -> Self {
        let key = date_key(date);
        let mut rows: Vec<usize> = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.date == key)
            .map(|(i, _)| i)
            .collect();
        rows.sort_by(|&a, &b| tasks[a].time.cmp(&tasks[b].time));
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position in the full collection of the task shown at `row`.
    pub fn task_index(&self, row: usize) -> Option<usize> {
        self.rows.get(row).copied()
    }

    /// Tasks in display order.
    pub fn tasks<'a>(&'a self, all: &'a [Task]) -> impl Iterator<Item = &'a Task> + 'a {
        self.rows.iter().filter_map(move |&i| all.get(i))
    }

    /// Current completion state of every row, keyed by collection position.
    pub fn done_states(&self, all: &[Task]) -> Vec<(usize, bool)> {
        self.rows
            .iter()
            .filter_map(|&i| all.get(i).map(|t| (i, t.done)))
            .collect()
    }

    /// Plain text rendering used by the command line.
    pub fn render_lines(&self, all: &[Task]) -> Vec<String> {
        if self.is_empty() {
            return vec![NO_TASKS.to_string()];
        }
        self.tasks(all)
            .enumerate()
            .map(|(row, t)| {
                let check = if t.done { "[x]" } else { "[ ]" };
                let suffix = if t.done { " ✅" } else { "" };
                format!("{:>2}. {} {}{}", row + 1, check, t.line(), suffix)
            })
            .collect()
    }
}
