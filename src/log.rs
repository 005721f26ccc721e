//! Logging setup with file rotation.
//!
//! Command-line runs log to stderr. The terminal UI owns the screen, so it
//! logs to a file instead, rotated at startup once it grows past
//! [`DEFAULT_MAX_LINES`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_LEVEL;

/// Default maximum number of lines before rotation.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Where log output goes.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`; an unparseable `level` falls
/// back to the default.
pub fn init(level: &str, target: LogTarget<'_>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path, DEFAULT_MAX_LINES)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(io::Error::other)
}

/// Open a log file for appending, rotating it first if it is too long.
pub fn open_log_file(path: &Path, max_lines: usize) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if path.exists() && count_lines(path)? > max_lines {
        rotate_log(path)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Count lines in a file.
pub fn count_lines(path: &Path) -> io::Result<usize> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(reader.lines().count())
}

/// Rotate a log file.
///
/// Moves it to a timestamped `.bak` next to it and leaves an empty file.
pub fn rotate_log(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let backup_name = format!(
        "{}.{}.bak",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("diary.log"),
        timestamp
    );
    let backup_path = path.with_file_name(backup_name);

    fs::rename(path, &backup_path)?;
    File::create(path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn backups(dir: &Path) -> Vec<std::path::PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().ends_with(".bak"))
            .collect()
    }

    #[test]
    fn test_count_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.log");

        fs::write(&path, "line1\nline2\nline3\n").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 3);

        fs::write(&path, "").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 0);
    }

    #[test]
    fn test_rotate_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diary.log");

        fs::write(&path, "line1\nline2\nline3\n").unwrap();
        rotate_log(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        let backups = backups(temp.path());
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "line1\nline2\nline3\n");
    }

    #[test]
    fn test_rotate_missing_file_is_ok() {
        let temp = TempDir::new().unwrap();
        rotate_log(&temp.path().join("absent.log")).unwrap();
        assert!(backups(temp.path()).is_empty());
    }

    #[test]
    fn test_open_log_file_keeps_short_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diary.log");
        fs::write(&path, "a\nb\n").unwrap();

        let mut file = open_log_file(&path, 5).unwrap();
        writeln!(file, "c").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\nc\n");
        assert!(backups(temp.path()).is_empty());
    }

    #[test]
    fn test_open_log_file_rotates_long_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diary.log");
        fs::write(&path, "1\n2\n3\n4\n").unwrap();

        let mut file = open_log_file(&path, 3).unwrap();
        writeln!(file, "fresh").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
        assert_eq!(backups(temp.path()).len(), 1);
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("diary.log");
        open_log_file(&path, DEFAULT_MAX_LINES).unwrap();
        assert!(path.exists());
    }
}
