//! Error types shared by the task model and the store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Bad user input. Always recoverable; the operation that produced it made
/// no change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,

    #[error("due date is required")]
    EmptyDate,

    #[error("enter date in format {pattern} (got '{text}')")]
    InvalidDate { text: String, pattern: String },

    #[error("unknown priority '{0}' (expected High, Medium or Low)")]
    UnknownPriority(String),

    #[error("unknown filter '{0}' (expected All, High, Medium or Low)")]
    UnknownFilter(String),

    #[error("no task ids left")]
    IdsExhausted,
}

/// Failure while writing the task file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Why a load produced no tasks. Not an error from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadAbsent {
    #[error("no task file")]
    Missing,

    #[error("task file unreadable: {0}")]
    Unreadable(String),

    #[error("task file malformed: {0}")]
    Malformed(String),

    #[error("task file format version {0} is newer than this build supports")]
    UnsupportedVersion(u32),
}
