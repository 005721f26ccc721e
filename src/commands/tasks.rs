use std::io::{self, BufRead, Write};

use diary::color;
use diary::config::Config;
use diary::error::LoadAbsent;
use diary::store::{Confirmation, Filter, LoadOutcome, TaskStore};
use diary::task::{Priority, TaskId};

/// Load the diary for a command-line operation.
///
/// A task file that exists but can't be used is an error for commands that
/// would write it back; `list` only warns.
fn open_store(config: &Config, mutating: bool) -> Result<TaskStore, String> {
    let mut store = TaskStore::new(&config.tasks_file, config.date_format.clone());
    match store.load_all() {
        LoadOutcome::Loaded(_) | LoadOutcome::NoSavedTasks(LoadAbsent::Missing) => Ok(store),
        LoadOutcome::NoSavedTasks(reason) if mutating => Err(format!(
            "refusing to overwrite {}: {}",
            config.tasks_file.display(),
            reason
        )),
        LoadOutcome::NoSavedTasks(reason) => {
            eprintln!("warning: {}: {}", config.tasks_file.display(), reason);
            Ok(store)
        }
    }
}

fn save(store: &TaskStore) -> Result<(), String> {
    store.save_all().map_err(|e| e.to_string())
}

/// Add a task and save.
pub fn cmd_add(
    config: &Config,
    title: &str,
    due: &str,
    description: &str,
    priority: Priority,
) -> Result<(), String> {
    let mut store = open_store(config, true)?;
    let id = store
        .add_task(title, description, due, priority)
        .map_err(|e| e.to_string())?;
    save(&store)?;

    let title = store.get(id).map(|t| t.title()).unwrap_or_default();
    println!("{} task {}: {}", color::success("Added"), id, title);
    Ok(())
}

/// Print the sorted, filtered task table.
pub fn cmd_list(config: &Config, filter: Filter, plain: bool) -> Result<(), String> {
    let mut store = open_store(config, false)?;
    let view = store.render_view(filter);

    if view.is_empty() {
        println!("(no tasks)");
        return Ok(());
    }

    let rows: Vec<_> = view.rows().collect();
    let title_width = rows
        .iter()
        .map(|r| r.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Title".len());
    let date_width = rows
        .iter()
        .map(|r| r.due_date.chars().count())
        .max()
        .unwrap_or(0)
        .max("Due Date".len());

    let header = format!(
        "{:>4}  {:<tw$}  {:<dw$}  {:<8}  {}",
        "ID",
        "Title",
        "Due Date",
        "Priority",
        "Status",
        tw = title_width,
        dw = date_width
    );
    if plain {
        println!("{}", header);
    } else {
        println!("{}", color::label(&header));
    }

    for row in rows {
        let priority = format!("{:<8}", row.priority.as_str());
        let (priority, status) = if plain {
            (priority, row.status.to_string())
        } else {
            (
                color::priority(row.priority, &priority),
                color::status(row.status, row.status.as_str()),
            )
        };
        println!(
            "{:>4}  {:<tw$}  {:<dw$}  {}  {}",
            row.id,
            row.title,
            row.due_date,
            priority,
            status,
            tw = title_width,
            dw = date_width
        );
    }

    Ok(())
}

/// Flip a task's completion flag and save.
pub fn cmd_toggle(config: &Config, id: TaskId) -> Result<(), String> {
    let mut store = open_store(config, true)?;
    if !store.toggle_by_id(id) {
        return Err(format!("no task with id {}", id));
    }
    save(&store)?;

    if let Some(task) = store.get(id) {
        let state = if task.is_completed() { "done" } else { "not done" };
        println!("{} task {} as {}: {}", color::success("Marked"), id, state, task.title());
    }
    Ok(())
}

/// Delete a task after confirmation and save.
pub fn cmd_delete(config: &Config, id: TaskId, yes: bool) -> Result<(), String> {
    let mut store = open_store(config, true)?;
    let title = match store.get(id) {
        Some(task) => task.title().to_string(),
        None => return Err(format!("no task with id {}", id)),
    };

    let confirmation = if yes {
        Confirmation::Confirmed
    } else {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        ask_confirmation(&mut stdin.lock(), &mut stdout, &title)
            .map_err(|e| format!("failed to read confirmation: {}", e))?
    };

    match store.delete_by_id(id, confirmation) {
        Some(task) => {
            save(&store)?;
            println!("{} task {}: {}", color::success("Deleted"), id, task.title());
        }
        None => println!("Kept task {}: {}", id, title),
    }
    Ok(())
}

/// Ask the delete question on `output` and read the answer from `input`.
///
/// Only `y` or `yes` (any case) confirms; end of input declines.
fn ask_confirmation<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    title: &str,
) -> io::Result<Confirmation> {
    write!(
        output,
        "Are you sure you want to delete this task? '{}' [y/N] ",
        title
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(Confirmation::from(answer == "y" || answer == "yes"))
}
