//! Plain-text report of one day's tasks.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::task::{long_date, Task};

#[derive(Debug, Error)]
#[error("failed to write export file {path}: {source}")]
pub struct ExportError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// Build the report text for tasks already filtered and ordered for `date`.
pub fn build_report<'a>(tasks: impl IntoIterator<Item = &'a Task>, date: NaiveDate) -> String {
    let mut report = format!("Tasks for {}\n\n", long_date(date));
    for t in tasks {
        let status = if t.done { "✅" } else { "❌" };
        report.push_str(&format!("{} {} — {} {}\n", status, t.time, t.category, t.task));
    }
    report
}

/// Writes day reports to one fixed file.
#[derive(Debug, Clone)]
pub struct Exporter {
    path: PathBuf,
}

impl Exporter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the report, replacing any previous export.
    pub fn export<'a>(
        &self,
        tasks: impl IntoIterator<Item = &'a Task>,
        date: NaiveDate,
    ) -> Result<(), ExportError> {
        let report = build_report(tasks, date);
        fs::write(&self.path, report).map_err(|source| ExportError {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), %date, "exported day");
        Ok(())
    }
}
