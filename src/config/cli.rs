use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::store::Filter;
use crate::task::{DateFormat, Priority, TaskId};

/// CLI arguments parsed from command line.
#[derive(Debug, Default, Parser)]
#[command(name = "diary")]
#[command(about = "A personal task diary", long_about = None)]
#[command(version)]
pub struct CliArgs {
    /// Subcommand to execute (defaults to `ui`).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: diary.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the task file
    #[arg(long, global = true)]
    pub tasks_file: Option<PathBuf>,

    /// Path to the log file used by the terminal UI
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Due-date pattern built from dd, MM and yyyy
    #[arg(long, global = true)]
    pub date_format: Option<DateFormat>,

    /// Don't save automatically when the diary closes
    #[arg(long, global = true)]
    pub no_autosave: bool,

    /// Log filter directive (e.g. info, debug)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Diary subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the interactive diary
    Ui {
        /// Initial priority filter (All, High, Medium, Low)
        #[arg(short, long)]
        filter: Option<Filter>,
    },

    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Due date, e.g. 05-03-2025
        #[arg(short, long)]
        due: String,

        /// Task description
        #[arg(short = 'D', long, default_value = "")]
        description: String,

        /// Priority (High, Medium, Low)
        #[arg(short, long, default_value_t = Priority::High)]
        priority: Priority,
    },

    /// List tasks sorted by due date
    List {
        /// Priority filter (All, High, Medium, Low)
        #[arg(short, long, default_value_t = Filter::All)]
        filter: Filter,

        /// Don't color the status column
        #[arg(long)]
        plain: bool,
    },

    /// Mark a task done, or not done again
    Toggle {
        /// Task id as shown by `list`
        id: TaskId,
    },

    /// Delete a task
    Delete {
        /// Task id as shown by `list`
        id: TaskId,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Write a default diary.toml
    Init,
}

/// Parse CLI arguments from an iterator (the first item is the program name).
pub fn parse_args<I>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = String>,
{
    CliArgs::try_parse_from(args)
}
