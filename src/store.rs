//! File-backed persistence for the task collection.
//!
//! The whole collection is one JSON array. Every save rewrites the file in
//! full; there is no locking, so a second process writing the same file wins
//! or loses silently.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::task::Task;

/// Errors raised while reading or writing the task file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access task file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("task file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Durable owner of record for the task collection.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load every task, or an empty collection when the file does not exist yet.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no task file yet");
            return Ok(Vec::new());
        }
        let buf = fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        let tasks: Vec<Task> = serde_json::from_str(&buf).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Overwrite the task file with the full collection.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(tasks).map_err(StoreError::Encode)?;
        let mut f = File::create(&self.path).map_err(|source| self.io(source))?;
        f.write_all(data.as_bytes()).map_err(|source| self.io(source))?;
        f.flush().map_err(|source| self.io(source))?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn io(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Category;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    fn sample(desc: &str, hour: u32, done: bool) -> Task {
        let mut t = Task::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            desc,
            Category::Study,
        );
        t.done = done;
        t
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order_and_duplicates() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        let tasks = vec![sample("Read", 10, false), sample("Read", 10, false), sample("Quiz", 8, true)];
        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn resaving_a_loaded_collection_keeps_it_identical() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        store.save(&[sample("Read", 10, true), sample("Walk", 7, false)]).unwrap();
        let first = store.load().unwrap();
        store.save(&first).unwrap();
        assert_eq!(store.load().unwrap(), first);
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.json"));
        store.save(&[sample("A", 1, false), sample("B", 2, false)]).unwrap();
        store.save(&[sample("C", 3, false)]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].task, "C");
    }

    #[test]
    fn reads_compact_records_written_by_hand() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"date": "2024-06-01", "time": "09:00:00", "task": "Write report", "category": "💼 Work", "done": false}]"#,
        )
        .unwrap();
        let loaded = TaskStore::new(&path).load().unwrap();
        assert_eq!(loaded[0].category, Category::Work);
        assert_eq!(loaded[0].time, "09:00:00");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();
        let err = TaskStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("nope").join("tasks.json"));
        assert!(matches!(store.save(&[]), Err(StoreError::Io { .. })));
    }
}
