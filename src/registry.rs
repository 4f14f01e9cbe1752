//! In-memory task collection owned by one session.
//!
//! The registry loads from the store at most once and writes the full
//! collection back after every mutation, so the file never lags behind what
//! the page shows.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::store::{StoreError, TaskStore};
use crate::task::Task;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no task at position {0}")]
    NoSuchTask(usize),
}

/// Result of an add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Nothing was appended because the description was blank.
    EmptyDescription,
}

/// Session-scoped live collection of tasks.
#[derive(Debug)]
pub struct Registry {
    store: TaskStore,
    tasks: Option<Vec<Task>>,
}

impl Registry {
    pub fn new(store: TaskStore) -> Self {
        Self { store, tasks: None }
    }

    /// Load from the store unless a collection is already resident.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        if self.tasks.is_none() {
            self.tasks = Some(self.store.load()?);
        }
        Ok(())
    }

    /// Every task in insertion order.
    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_deref().unwrap_or(&[])
    }

    /// Append a task and persist the collection.
    pub fn add(&mut self, task: Task) -> Result<AddOutcome, StoreError> {
        if task.task.trim().is_empty() {
            warn!("rejected task with empty description");
            return Ok(AddOutcome::EmptyDescription);
        }
        self.initialize()?;
        info!(date = %task.date, time = %task.time, category = %task.category, "adding task");
        let tasks = self.tasks.get_or_insert_with(Vec::new);
        tasks.push(task);
        self.store.save(tasks)?;
        Ok(AddOutcome::Added)
    }

    /// Set the completion flag of the task at `index` and persist the collection.
    pub fn set_done(&mut self, index: usize, done: bool) -> Result<(), RegistryError> {
        self.initialize()?;
        let tasks = self.tasks.get_or_insert_with(Vec::new);
        let task = tasks.get_mut(index).ok_or(RegistryError::NoSuchTask(index))?;
        task.done = done;
        debug!(index, done, "set completion");
        self.store.save(tasks)?;
        Ok(())
    }

    /// Apply a batch of completion states and save once, whether or not
    /// anything changed.
    pub fn sync_done(&mut self, states: &[(usize, bool)]) -> Result<(), RegistryError> {
        self.initialize()?;
        let tasks = self.tasks.get_or_insert_with(Vec::new);
        for &(index, done) in states {
            let task = tasks.get_mut(index).ok_or(RegistryError::NoSuchTask(index))?;
            task.done = done;
        }
        self.store.save(tasks)?;
        Ok(())
    }
}
