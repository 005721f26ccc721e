//! Shared helpers for unit tests.
//!
//! Config discovery reads `diary.toml` from the working directory, which is
//! process-wide state. Tests that depend on it run through [`with_temp_cwd`],
//! which serializes them behind a lock.

#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use chrono::NaiveDate;
#[cfg(test)]
use tempfile::TempDir;

#[cfg(test)]
static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with a fresh temporary directory as the working directory.
///
/// The previous directory is restored afterwards and the temporary one is
/// removed when it goes out of scope.
#[cfg(test)]
pub fn with_temp_cwd<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::current_dir().expect("failed to get current directory");
    let temp = TempDir::new().expect("failed to create temp directory");
    std::env::set_current_dir(temp.path()).expect("failed to enter temp directory");
    let result = f();
    std::env::set_current_dir(original).expect("failed to restore working directory");
    result
}

/// Shorthand for a calendar date in tests.
#[cfg(test)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
