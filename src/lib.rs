//! Diary: a single-user task diary.
//!
//! Tasks have a title, a description, a due date, a priority and a
//! completion flag. They are shown sorted by due date, optionally filtered
//! by priority, with a status derived from today's date:
//! - `Well Done` once completed
//! - `Due` when the due date is today or earlier
//! - `Upcoming` otherwise
//!
//! The whole collection is saved to and loaded from one versioned JSON file.

pub mod color;
pub mod config;
pub mod error;
pub mod log;
pub mod shutdown;
pub mod store;
pub mod task;
#[doc(hidden)]
pub mod testutil;
pub mod tui;
