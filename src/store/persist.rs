//! On-disk task file format.
//!
//! ```json
//! { "version": 1, "tasks": [ { "id": 1, "title": "...", ... } ] }
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{LoadAbsent, PersistenceError};
use crate::task::{Task, TaskId, MAX_YEAR, MIN_YEAR};

/// Format version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Reserved; the id counter stops below it.
const MAX_TASK_ID: TaskId = TaskId(u64::MAX);

#[derive(Serialize)]
struct TaskFileOut<'a> {
    version: u32,
    tasks: &'a [Task],
}

#[derive(Deserialize)]
struct Header {
    version: u32,
}

#[derive(Deserialize)]
struct TaskFileIn {
    tasks: Vec<Task>,
}

/// Write the whole collection, replacing any previous file.
pub(super) fn write_tasks(path: &Path, tasks: &[Task]) -> Result<(), PersistenceError> {
    let io_err = |source: io::Error| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let mut content = serde_json::to_string_pretty(&TaskFileOut {
        version: FORMAT_VERSION,
        tasks,
    })?;
    content.push('\n');

    fs::write(path, content).map_err(io_err)
}

/// Read the whole collection.
pub(super) fn read_tasks(path: &Path) -> Result<Vec<Task>, LoadAbsent> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadAbsent::Missing),
        Err(e) => return Err(LoadAbsent::Unreadable(e.to_string())),
    };

    parse_tasks(&content)
}

/// Decode task file content.
///
/// The version is checked before the body so that a newer file is reported
/// as such rather than as malformed.
pub(super) fn parse_tasks(content: &str) -> Result<Vec<Task>, LoadAbsent> {
    let header: Header =
        serde_json::from_str(content).map_err(|e| LoadAbsent::Malformed(e.to_string()))?;
    if header.version > FORMAT_VERSION || header.version == 0 {
        return Err(LoadAbsent::UnsupportedVersion(header.version));
    }

    let file: TaskFileIn =
        serde_json::from_str(content).map_err(|e| LoadAbsent::Malformed(e.to_string()))?;

    let mut seen = HashSet::new();
    for task in &file.tasks {
        if !seen.insert(task.id()) {
            return Err(LoadAbsent::Malformed(format!("duplicate task id {}", task.id())));
        }
        if !task.is_well_formed() {
            return Err(LoadAbsent::Malformed(format!("task {} has an empty title", task.id())));
        }
        if task.id() == MAX_TASK_ID {
            return Err(LoadAbsent::Malformed(format!("task id {} out of range", task.id())));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&task.due_date().year()) {
            return Err(LoadAbsent::Malformed(format!(
                "task {} has due date {} outside years {}-{}",
                task.id(),
                task.due_date(),
                MIN_YEAR,
                MAX_YEAR
            )));
        }
    }

    Ok(file.tasks)
}
