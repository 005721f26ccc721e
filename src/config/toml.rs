use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::{Config, ConfigError};
use crate::store::Filter;
use crate::task::DateFormat;

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    files: FilesSection,
    #[serde(default)]
    display: DisplaySection,
    #[serde(default)]
    behavior: BehaviorSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
struct FilesSection {
    tasks: Option<PathBuf>,
    log: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct DisplaySection {
    date_format: Option<String>,
    filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BehaviorSection {
    autosave: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingSection {
    level: Option<String>,
}

pub(super) fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("failed to read {}: {}", path.display(), e)))?;
    parse_toml(&content)
}

pub(super) fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    let file: FileConfig =
        ::toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    let mut config = Config::default();

    if let Some(path) = file.files.tasks {
        config.tasks_file = path;
    }
    if let Some(path) = file.files.log {
        config.log_file = path;
    }
    if let Some(pattern) = file.display.date_format {
        config.date_format = DateFormat::new(&pattern).map_err(ConfigError::InvalidDateFormat)?;
    }
    if let Some(filter) = file.display.filter {
        config.default_filter = filter
            .parse::<Filter>()
            .map_err(|e| ConfigError::Parse(format!("invalid display.filter: {}", e)))?;
    }
    if let Some(autosave) = file.behavior.autosave {
        config.autosave = autosave;
    }
    if let Some(level) = file.logging.level {
        config.log_level = level;
    }

    Ok(config)
}
