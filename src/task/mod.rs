//! Task model and due-date handling.
//!
//! A task is a title, an optional description, a due date and a priority,
//! plus a completion flag that is the only thing allowed to change after
//! creation.

mod date;
mod model;

#[cfg(test)]
mod tests;

pub use date::{DateFormat, DEFAULT_DATE_PATTERN, MAX_YEAR, MIN_YEAR};
pub use model::{Priority, Task, TaskId};
