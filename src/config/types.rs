use std::path::{Path, PathBuf};

use thiserror::Error;

use super::cli::CliArgs;
use super::{env, toml};
use crate::store::Filter;
use crate::task::{DateFormat, DEFAULT_DATE_PATTERN};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "diary.toml";

/// Default path of the task file.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Default path of the log file used by the terminal UI.
pub const DEFAULT_LOG_FILE: &str = "diary.log";

/// Default tracing filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Diary configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the task file.
    pub tasks_file: PathBuf,
    /// Path of the log file written while the terminal UI is running.
    pub log_file: PathBuf,
    /// Due-date pattern for input and display.
    pub date_format: DateFormat,
    /// Filter selected when the terminal UI starts.
    pub default_filter: Filter,
    /// Save automatically on orderly shutdown.
    pub autosave: bool,
    /// Tracing filter directive (overridden by `RUST_LOG`).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            date_format: DateFormat::default(),
            default_filter: Filter::All,
            autosave: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults.
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = if let Some(ref path) = cli_args.config {
            Self::load_from_file(path)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_env();
        config.apply_cli(cli_args);

        Ok(config)
    }

    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        toml::load_from_file(path)
    }

    /// Parse TOML content into configuration.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::parse_toml(content)
    }

    fn apply_env(&mut self) {
        env::apply_env(self);
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ref path) = args.tasks_file {
            self.tasks_file = path.clone();
        }
        if let Some(ref path) = args.log_file {
            self.log_file = path.clone();
        }
        if let Some(ref format) = args.date_format {
            self.date_format = format.clone();
        }
        if args.no_autosave {
            self.autosave = false;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
    }

    /// Generate default diary.toml content.
    pub fn default_toml() -> String {
        format!(
            r#"# Task diary configuration

[files]
tasks = "{}"
log = "{}"

[display]
date_format = "{}"
filter = "All"   # All, High, Medium or Low

[behavior]
autosave = true  # save when the diary is closed

[logging]
level = "{}"
"#,
            DEFAULT_TASKS_FILE, DEFAULT_LOG_FILE, DEFAULT_DATE_PATTERN, DEFAULT_LOG_LEVEL
        )
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    InvalidDateFormat(String),
}
