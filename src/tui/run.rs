use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use super::app::DiaryApp;
use super::render::draw_ui;
use crate::shutdown;

/// Run the terminal UI until the user quits or a shutdown signal arrives.
///
/// The app is handed back whether or not the terminal failed, so the caller
/// can still save the diary.
pub fn run_tui(mut app: DiaryApp) -> (DiaryApp, io::Result<()>) {
    let result = run_in_terminal(&mut app);
    (app, result)
}

fn run_in_terminal(app: &mut DiaryApp) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(e);
        }
    };

    let result = terminal.clear().and_then(|()| event_loop(&mut terminal, app));

    // Restore terminal even if the loop failed
    let restored = disable_raw_mode()
        .and_then(|()| execute!(terminal.backend_mut(), LeaveAlternateScreen))
        .and_then(|()| terminal.show_cursor());

    result.and(restored)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DiaryApp,
) -> io::Result<()> {
    loop {
        // Statuses depend on the date, so re-render every frame
        app.refresh();
        terminal.draw(|f| draw_ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if shutdown::requested() {
            info!("shutdown signal received, leaving the UI");
            return Ok(());
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}
