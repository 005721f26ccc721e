use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::task::{DateFormat, Priority, Task, TaskId};

/// Priority filter for a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Only(Priority),
}

impl Filter {
    /// Filter choices in selector order.
    pub const CHOICES: [Filter; 4] = [
        Filter::All,
        Filter::Only(Priority::High),
        Filter::Only(Priority::Medium),
        Filter::Only(Priority::Low),
    ];

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(priority) => task.priority() == *priority,
        }
    }

    /// Next choice in selector order, wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::CHOICES.iter().position(|f| *f == self).unwrap_or(0);
        Self::CHOICES[(pos + 1) % Self::CHOICES.len()]
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(priority) => write!(f, "{}", priority),
        }
    }
}

impl FromStr for Filter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Priority>()
            .map(Self::Only)
            .map_err(|_| ValidationError::UnknownFilter(s.to_string()))
    }
}

/// Display status, derived from the completion flag and the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    WellDone,
    Due,
    Upcoming,
}

impl Status {
    /// Derive the status of a task as of `today`.
    pub fn derive(due_date: NaiveDate, completed: bool, today: NaiveDate) -> Self {
        if completed {
            Self::WellDone
        } else if due_date <= today {
            Self::Due
        } else {
            Self::Upcoming
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WellDone => "Well Done",
            Self::Due => "Due",
            Self::Upcoming => "Upcoming",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only projection of a task for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub id: TaskId,
    pub title: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: Status,
}

/// A rendered view: the tasks to show, in display order.
///
/// Rows are produced on demand by [`View::rows`], which can be called any
/// number of times.
pub struct View<'a> {
    tasks: Vec<&'a Task>,
    date_format: &'a DateFormat,
    today: NaiveDate,
}

impl<'a> View<'a> {
    /// Sort `tasks` by due date (stable) and apply `filter`.
    pub(super) fn build(
        tasks: &'a [Task],
        filter: Filter,
        date_format: &'a DateFormat,
        today: NaiveDate,
    ) -> Self {
        let mut sorted: Vec<&Task> = tasks.iter().collect();
        sorted.sort_by(|a, b| a.compare_due(b));
        sorted.retain(|t| filter.matches(t));
        Self {
            tasks: sorted,
            date_format,
            today,
        }
    }

    pub(super) fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id()).collect()
    }

    /// Rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = ViewRow> + '_ {
        self.tasks.iter().map(move |task| ViewRow {
            id: task.id(),
            title: task.title().to_string(),
            due_date: self.date_format.format(task.due_date()),
            priority: task.priority(),
            status: Status::derive(task.due_date(), task.is_completed(), self.today),
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
