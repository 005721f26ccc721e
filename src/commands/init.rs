use std::fs;
use std::path::Path;

use diary::color;
use diary::config::{Config, DEFAULT_CONFIG_FILE};

/// Write a default diary.toml, or the file named by --config.
pub fn cmd_init(path: Option<&Path>) -> Result<(), String> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if path.exists() {
        return Err(format!("{} already exists, not overwriting", path.display()));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
        }
    }
    fs::write(path, Config::default_toml())
        .map_err(|e| format!("failed to create {}: {}", path.display(), e))?;

    println!("{} {}", color::success("Created"), path.display());
    Ok(())
}
