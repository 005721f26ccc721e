use std::io;

use tracing::{info, warn};

use diary::config::Config;
use diary::shutdown;
use diary::store::{Filter, TaskStore};
use diary::tui::{run_tui, DiaryApp};

/// Open the interactive diary; save on the way out when autosave is on.
pub fn cmd_ui(config: &Config, filter: Option<Filter>) -> Result<(), String> {
    if let Err(e) = shutdown::register_handler() {
        warn!("{}", e);
    }

    let mut store = TaskStore::new(&config.tasks_file, config.date_format.clone());
    let outcome = store.load_all();

    let mut app = DiaryApp::new(store, filter.unwrap_or(config.default_filter));
    app.note_load(&outcome);

    let (app, result) = run_tui(app);
    finish_session(&app, config.autosave, result)
}

/// Autosave (when allowed) and then report how the terminal session ended.
///
/// The save runs even when the terminal failed, so in-memory tasks survive.
fn finish_session(app: &DiaryApp, autosave: bool, result: io::Result<()>) -> Result<(), String> {
    if let Err(ref e) = result {
        warn!(error = %e, "terminal UI stopped with an error");
    }

    let saved = if !autosave {
        info!("autosave off, leaving without saving");
        Ok(())
    } else if app.autosave_blocked() {
        let path = app.store().path().display();
        warn!(%path, "task file could not be loaded, not overwriting it");
        eprintln!("warning: {} was not loaded, so it was not overwritten", path);
        Ok(())
    } else {
        let store = app.store();
        store
            .save_all()
            .map(|()| {
                println!(
                    "Saved {} task(s) to {}",
                    store.len(),
                    store.path().display()
                )
            })
            .map_err(|e| format!("autosave failed: {}", e))
    };

    result.map_err(|e| format!("terminal error: {}", e))?;
    saved
}
