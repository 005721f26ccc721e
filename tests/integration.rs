use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Build a diary command running inside `dir`, isolated from the caller's env.
fn diary(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_diary"));
    cmd.current_dir(dir);
    for key in [
        "DIARY_TASKS_FILE",
        "DIARY_LOG_FILE",
        "DIARY_DATE_FORMAT",
        "DIARY_FILTER",
        "DIARY_AUTOSAVE",
        "DIARY_LOG_LEVEL",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

fn run_success(cmd: &mut Command) -> Output {
    let output = cmd.output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn run_failure(cmd: &mut Command) -> Output {
    let output = cmd.output().expect("failed to run command");
    assert!(
        !output.status.success(),
        "command unexpectedly succeeded\nstdout:\n{}",
        String::from_utf8_lossy(&output.stdout)
    );
    output
}

fn add(dir: &Path, title: &str, due: &str, priority: &str) {
    run_success(diary(dir).args(["add", title, "--due", due, "--priority", priority]));
}

fn list(dir: &Path, extra: &[&str]) -> String {
    let output = run_success(diary(dir).args(["list", "--plain"]).args(extra));
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Titles in listing order, skipping the header.
fn listed_titles(listing: &str) -> Vec<String> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().nth(1).map(str::to_string))
        .collect()
}

#[test]
fn test_add_then_list() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let output = run_success(diary(dir).args([
        "add",
        "Rent",
        "--due",
        "01-01-2099",
        "-D",
        "monthly",
        "-p",
        "medium",
    ]));
    assert!(String::from_utf8_lossy(&output.stdout).contains("task 1"));
    assert!(dir.join("tasks.json").exists());

    let listing = list(dir, &[]);
    let row = listing.lines().nth(1).unwrap();
    assert!(row.contains("1"));
    assert!(row.contains("Rent"));
    assert!(row.contains("01-01-2099"));
    assert!(row.contains("Medium"));
    assert!(row.contains("Upcoming"));
}

#[test]
fn test_list_sorted_by_due_date() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "Later", "01-03-2099", "High");
    add(dir, "Sooner", "01-01-2099", "High");
    add(dir, "Middle", "01-02-2099", "High");

    assert_eq!(listed_titles(&list(dir, &[])), vec!["Sooner", "Middle", "Later"]);
}

#[test]
fn test_list_filter() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "Urgent", "01-01-2099", "High");
    add(dir, "Someday", "01-01-2099", "Low");

    assert_eq!(listed_titles(&list(dir, &["--filter", "low"])), vec!["Someday"]);
    assert_eq!(listed_titles(&list(dir, &["--filter", "All"])).len(), 2);
}

#[test]
fn test_list_empty() {
    let temp = TempDir::new().unwrap();
    assert_eq!(list(temp.path(), &[]).trim(), "(no tasks)");
}

#[test]
fn test_past_due_date_shows_due() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "Overdue", "01-01-2000", "High");

    assert!(list(dir, &[]).contains("Due"));
}

#[test]
fn test_toggle_marks_well_done() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "Plants", "01-01-2000", "High");

    run_success(diary(dir).args(["toggle", "1"]));
    assert!(list(dir, &[]).contains("Well Done"));

    run_success(diary(dir).args(["toggle", "1"]));
    let listing = list(dir, &[]);
    assert!(!listing.contains("Well Done"));
    assert!(listing.contains("Due"));
}

#[test]
fn test_toggle_unknown_id_fails() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "Only", "01-01-2099", "High");

    let output = run_failure(diary(dir).args(["toggle", "7"]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no task with id 7"));
}

#[test]
fn test_delete_with_yes() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "Keep", "01-01-2099", "High");
    add(dir, "Drop", "02-01-2099", "High");

    run_success(diary(dir).args(["delete", "2", "--yes"]));
    assert_eq!(listed_titles(&list(dir, &[])), vec!["Keep"]);
}

#[test]
fn test_delete_prompt() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "Keep", "01-01-2099", "High");

    let delete_with = |answer: &str| {
        let mut child = diary(dir)
            .args(["delete", "1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(answer.as_bytes())
            .unwrap();
        let output = child.wait_with_output().unwrap();
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };

    let stdout = delete_with("n\n");
    assert!(stdout.contains("Are you sure you want to delete this task?"));
    assert_eq!(listed_titles(&list(dir, &[])), vec!["Keep"]);

    delete_with("y\n");
    assert_eq!(list(dir, &[]).trim(), "(no tasks)");
}

#[test]
fn test_ids_not_reused_after_delete() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "First", "01-01-2099", "High");
    add(dir, "Second", "02-01-2099", "High");
    run_success(diary(dir).args(["delete", "2", "--yes"]));
    add(dir, "Third", "03-01-2099", "High");

    let listing = list(dir, &[]);
    let third = listing.lines().find(|l| l.contains("Third")).unwrap();
    assert_eq!(third.split_whitespace().next(), Some("3"));
}

#[test]
fn test_bad_input_rejected_without_saving() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let output = run_failure(diary(dir).args(["add", "Rent", "--due", "2099-01-01"]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("dd-MM-yyyy"));

    let output = run_failure(diary(dir).args(["add", "   ", "--due", "01-01-2099"]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("title is required"));

    assert!(!dir.join("tasks.json").exists());
}

#[test]
fn test_unknown_priority_rejected() {
    let temp = TempDir::new().unwrap();
    run_failure(diary(temp.path()).args(["add", "Rent", "--due", "01-01-2099", "-p", "urgent"]));
    assert!(!temp.path().join("tasks.json").exists());
}

#[test]
fn test_corrupt_file_not_overwritten() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let path = dir.join("tasks.json");
    fs::write(&path, "not json at all").unwrap();

    let output = run_failure(diary(dir).args(["add", "Rent", "--due", "01-01-2099"]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("refusing to overwrite"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json at all");

    let output = run_success(diary(dir).args(["list", "--plain"]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning"));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "(no tasks)");
}

#[test]
fn test_tasks_file_option() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    run_success(diary(dir).args([
        "--tasks-file",
        "data/mine.json",
        "add",
        "Rent",
        "--due",
        "01-01-2099",
    ]));

    assert!(dir.join("data").join("mine.json").exists());
    assert!(!dir.join("tasks.json").exists());
    assert_eq!(
        listed_titles(&list(dir, &["--tasks-file", "data/mine.json"])),
        vec!["Rent"]
    );
}

#[test]
fn test_init_then_config_date_format() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    run_success(diary(dir).arg("init"));
    let config = fs::read_to_string(dir.join("diary.toml")).unwrap();
    assert!(config.contains("dd-MM-yyyy"));

    let output = run_failure(diary(dir).arg("init"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

    fs::write(
        dir.join("diary.toml"),
        config.replace("dd-MM-yyyy", "yyyy/MM/dd"),
    )
    .unwrap();
    add(dir, "Rent", "2099/01/31", "High");
    assert!(list(dir, &[]).contains("2099/01/31"));
}

#[test]
fn test_date_format_env_and_flag() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    run_success(
        diary(dir)
            .env("DIARY_DATE_FORMAT", "MM/dd/yyyy")
            .args(["add", "Rent", "--due", "12/31/2099"]),
    );
    let listing = list(dir, &["--date-format", "yyyy-MM-dd"]);
    assert!(listing.contains("2099-12-31"));
}

#[test]
fn test_saved_file_is_versioned_json() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    add(dir, "Rent", "31-01-2099", "Low");

    let content = fs::read_to_string(dir.join("tasks.json")).unwrap();
    assert!(content.contains("\"version\": 1"));
    assert!(content.contains("\"due_date\": \"2099-01-31\""));
    assert!(content.contains("\"title\": \"Rent\""));
}
