//! In-memory task collection and its file persistence.
//!
//! The store owns every task. Mutations address tasks either by their row in
//! the most recently rendered view or by stable id. Saving and loading
//! always cover the whole collection.

mod persist;
mod view;


use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::error::{LoadAbsent, PersistenceError, ValidationError};
use crate::task::{DateFormat, Priority, Task, TaskId};

pub use persist::FORMAT_VERSION;
pub use view::{Filter, Status, View, ViewRow};

/// Explicit answer required before a task is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(yes: bool) -> Self {
        if yes {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Result of [`TaskStore::load_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read; the collection now holds this many tasks.
    Loaded(usize),
    /// Nothing usable was found; the collection is now empty.
    NoSavedTasks(LoadAbsent),
}

/// The task collection plus the file it is persisted to.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    path: PathBuf,
    date_format: DateFormat,
    next_id: u64,
    /// Ids in the order of the last rendered view.
    last_view: Vec<TaskId>,
}

impl TaskStore {
    /// Create an empty store persisted at `path`.
    pub fn new(path: impl Into<PathBuf>, date_format: DateFormat) -> Self {
        Self {
            tasks: Vec::new(),
            path: path.into(),
            date_format,
            next_id: 1,
            last_view: Vec::new(),
        }
    }

    /// Create a store and load whatever is saved at `path`.
    pub fn open(path: impl Into<PathBuf>, date_format: DateFormat) -> Self {
        let mut store = Self::new(path, date_format);
        store.load_all();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Validate the form input and append a new task.
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        date_text: &str,
        priority: Priority,
    ) -> Result<TaskId, ValidationError> {
        let title = title.trim();
        let date_text = date_text.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if date_text.is_empty() {
            return Err(ValidationError::EmptyDate);
        }

        let due_date = self.date_format.parse(date_text)?;
        let id = TaskId(self.next_id);
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(ValidationError::IdsExhausted)?;
        let task = Task::create(id, title, description, due_date, priority)?;

        debug!(id = %id, title = task.title(), "task added");
        self.tasks.push(task);
        self.next_id = next_id;
        Ok(id)
    }

    /// Toggle the task at `index` of the last rendered view.
    ///
    /// Returns `false` without changing anything when the index is out of
    /// range.
    pub fn toggle_task(&mut self, index: usize) -> bool {
        match self.last_view.get(index).copied() {
            Some(id) => self.toggle_by_id(id),
            None => false,
        }
    }

    /// Toggle the task with the given id. Returns whether it exists.
    pub fn toggle_by_id(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id() == id) {
            Some(task) => {
                task.toggle_completion();
                debug!(id = %id, completed = task.is_completed(), "task toggled");
                true
            }
            None => false,
        }
    }

    /// Delete the task at `index` of the last rendered view, if confirmed.
    pub fn delete_task(&mut self, index: usize, confirmation: Confirmation) -> Option<Task> {
        let id = self.last_view.get(index).copied()?;
        self.delete_by_id(id, confirmation)
    }

    /// Delete the task with the given id, if confirmed.
    pub fn delete_by_id(&mut self, id: TaskId, confirmation: Confirmation) -> Option<Task> {
        if confirmation != Confirmation::Confirmed {
            return None;
        }
        let pos = self.tasks.iter().position(|t| t.id() == id)?;
        let task = self.tasks.remove(pos);
        self.last_view.retain(|v| *v != id);
        debug!(id = %id, "task deleted");
        Some(task)
    }

    /// Render the view as of the local calendar date.
    pub fn render_view(&mut self, filter: Filter) -> View<'_> {
        let today = Local::now().date_naive();
        self.render_view_on(filter, today)
    }

    /// Render the view as of `today`.
    ///
    /// The row order of the returned view becomes the index space for
    /// [`toggle_task`](Self::toggle_task) and [`delete_task`](Self::delete_task).
    pub fn render_view_on(&mut self, filter: Filter, today: NaiveDate) -> View<'_> {
        let view = View::build(&self.tasks, filter, &self.date_format, today);
        self.last_view = view.ids();
        view
    }

    /// Write the whole collection to the task file.
    pub fn save_all(&self) -> Result<(), PersistenceError> {
        match persist::write_tasks(&self.path, &self.tasks) {
            Ok(()) => {
                info!(path = %self.path.display(), count = self.tasks.len(), "tasks saved");
                Ok(())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to save tasks");
                Err(e)
            }
        }
    }

    /// Replace the collection with the task file's contents.
    ///
    /// Anything short of a clean read leaves the collection empty.
    pub fn load_all(&mut self) -> LoadOutcome {
        self.last_view.clear();

        match persist::read_tasks(&self.path) {
            Ok(tasks) => {
                // Loaded ids are below u64::MAX, so this can't overflow
                self.next_id = tasks.iter().map(|t| t.id().0).max().unwrap_or(0) + 1;
                self.tasks = tasks;
                info!(path = %self.path.display(), count = self.tasks.len(), "tasks loaded");
                LoadOutcome::Loaded(self.tasks.len())
            }
            Err(reason) => {
                self.tasks.clear();
                self.next_id = 1;
                match &reason {
                    LoadAbsent::UnsupportedVersion(_) => {
                        warn!(path = %self.path.display(), %reason, "no saved tasks loaded")
                    }
                    _ => info!(path = %self.path.display(), %reason, "no saved tasks found"),
                }
                LoadOutcome::NoSavedTasks(reason)
            }
        }
    }
}
