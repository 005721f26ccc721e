use std::env;
use std::path::PathBuf;

use super::types::Config;
use crate::store::Filter;
use crate::task::DateFormat;

pub(super) fn apply_env(config: &mut Config) {
    apply_vars(config, |key| env::var(key).ok());
}

/// Apply `DIARY_*` variables read through `var`. Unparseable values are ignored.
pub(super) fn apply_vars<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = var("DIARY_TASKS_FILE") {
        config.tasks_file = PathBuf::from(val);
    }
    if let Some(val) = var("DIARY_LOG_FILE") {
        config.log_file = PathBuf::from(val);
    }
    if let Some(val) = var("DIARY_DATE_FORMAT") {
        if let Ok(format) = DateFormat::new(&val) {
            config.date_format = format;
        }
    }
    if let Some(val) = var("DIARY_FILTER") {
        if let Ok(filter) = val.parse::<Filter>() {
            config.default_filter = filter;
        }
    }
    if let Some(val) = var("DIARY_AUTOSAVE") {
        config.autosave = val == "true" || val == "1";
    }
    if let Some(val) = var("DIARY_LOG_LEVEL") {
        config.log_level = val;
    }
}
