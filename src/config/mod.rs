//! Configuration loading for the diary.
//!
//! Supports diary.toml, CLI flags, and environment variables.
//! Precedence (highest to lowest): CLI flags > env vars > config file > defaults.

mod cli;
mod env;
mod toml;
mod types;

pub use cli::{parse_args, CliArgs, Command};
pub use types::{
    Config, ConfigError, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL,
    DEFAULT_TASKS_FILE,
};
