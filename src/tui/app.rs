use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;

use crate::error::LoadAbsent;
use crate::store::{Confirmation, Filter, LoadOutcome, TaskStore, ViewRow};
use crate::task::Priority;

/// Which part of the screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Title,
    Description,
    DueDate,
    Priority,
    Table,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Title,
        Focus::Description,
        Focus::DueDate,
        Focus::Priority,
        Focus::Table,
    ];

    fn next(self) -> Self {
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(pos + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(pos + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// One-line feedback shown under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Notice {
    pub(super) text: String,
    pub(super) is_error: bool,
}

/// Entry form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct EntryForm {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) due_date: String,
    pub(super) priority: Priority,
}

/// Terminal UI state. Owns the store; everything the store needs arrives as
/// explicit arguments built from this state.
pub struct DiaryApp {
    pub(super) store: TaskStore,
    pub(super) form: EntryForm,
    pub(super) focus: Focus,
    pub(super) filter: Filter,
    /// Rows of the last rendered view.
    pub(super) rows: Vec<ViewRow>,
    /// Selected row in `rows`.
    pub(super) selected: Option<usize>,
    /// Whether the delete confirmation modal is showing.
    pub(super) confirm_delete: bool,
    pub(super) notice: Option<Notice>,
    pub(super) should_quit: bool,
    /// Set while the task file on disk holds something the store couldn't
    /// load, so it must not be replaced on the way out.
    autosave_blocked: bool,
}

impl DiaryApp {
    pub fn new(store: TaskStore, filter: Filter) -> Self {
        let mut app = Self {
            store,
            form: EntryForm::default(),
            focus: Focus::Title,
            filter,
            rows: Vec::new(),
            selected: None,
            confirm_delete: false,
            notice: None,
            should_quit: false,
            autosave_blocked: false,
        };
        app.refresh();
        app
    }

    /// The store, for saving on the way out.
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether saving on exit would overwrite a file that failed to load.
    pub fn autosave_blocked(&self) -> bool {
        self.autosave_blocked
    }

    /// Record the outcome of a load. A file that exists but couldn't be used
    /// blocks autosave until the next successful save or load.
    pub fn note_load(&mut self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(count) => {
                self.autosave_blocked = false;
                self.info(format!("Loaded {} task(s).", count));
            }
            LoadOutcome::NoSavedTasks(LoadAbsent::Missing) => {
                self.autosave_blocked = false;
                self.info("No saved tasks found.");
            }
            LoadOutcome::NoSavedTasks(reason) => {
                warn!(%reason, "task file unusable, autosave blocked");
                self.autosave_blocked = true;
                self.error(format!(
                    "Could not load tasks ({}); autosave is off until you save with [s].",
                    reason
                ));
            }
        }
    }

    /// Re-render the view as of today.
    pub fn refresh(&mut self) {
        self.refresh_on(Local::now().date_naive());
    }

    pub(super) fn refresh_on(&mut self, today: NaiveDate) {
        self.rows = self.store.render_view_on(self.filter, today).rows().collect();
        self.selected = match self.selected {
            _ if self.rows.is_empty() => None,
            Some(i) => Some(i.min(self.rows.len() - 1)),
            None => None,
        };
    }

    fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: false,
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: true,
        });
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if self.confirm_delete {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.finish_delete(Confirmation::Confirmed),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.finish_delete(Confirmation::Declined)
                }
                _ => {}
            }
            return;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('s') => self.save(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Title | Focus::Description | Focus::DueDate => self.handle_text_key(key),
            Focus::Priority => self.handle_priority_key(key),
            Focus::Table => self.handle_table_key(key),
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Title => Some(&mut self.form.title),
            Focus::Description => Some(&mut self.form.description),
            Focus::DueDate => Some(&mut self.form.due_date),
            Focus::Priority | Focus::Table => None,
        }
    }

    fn handle_text_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.focus = Focus::Table,
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_priority_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.focus = Focus::Table,
            KeyCode::Left | KeyCode::Up => self.form.priority = self.form.priority.prev(),
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                self.form.priority = self.form.priority.next()
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_offset(-1),
            KeyCode::Down | KeyCode::Char('j') => self.select_offset(1),
            KeyCode::Home => self.selected = (!self.rows.is_empty()).then_some(0),
            KeyCode::End => self.selected = self.rows.len().checked_sub(1),
            KeyCode::Char(' ') | KeyCode::Char('t') => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.refresh();
            }
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('l') => self.load(),
            KeyCode::Char('a') | KeyCode::Char('i') => self.focus = Focus::Title,
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn select_offset(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.rows.len() - 1;
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) if delta < 0 => i.saturating_sub(delta.unsigned_abs()),
            Some(i) => (i + delta as usize).min(last),
        });
    }

    /// Add a task from the form.
    fn submit(&mut self) {
        let form = &self.form;
        match self
            .store
            .add_task(&form.title, &form.description, &form.due_date, form.priority)
        {
            Ok(id) => {
                let title = self.store.get(id).map(|t| t.title().to_string()).unwrap_or_default();
                self.form = EntryForm::default();
                self.focus = Focus::Title;
                self.info(format!("Added '{}'", title));
                self.refresh();
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    fn toggle_selected(&mut self) {
        match self.selected {
            Some(index) if self.store.toggle_task(index) => self.refresh(),
            _ => self.error("Please select a task to toggle."),
        }
    }

    fn request_delete(&mut self) {
        if self.selected.is_some() {
            self.confirm_delete = true;
        } else {
            self.error("Please select a task to delete.");
        }
    }

    fn finish_delete(&mut self, confirmation: Confirmation) {
        self.confirm_delete = false;
        let Some(index) = self.selected else {
            return;
        };
        if let Some(task) = self.store.delete_task(index, confirmation) {
            self.info(format!("Deleted '{}'", task.title()));
            self.refresh();
        }
    }

    /// Save the whole diary, reporting the result in the notice line.
    pub fn save(&mut self) {
        match self.store.save_all() {
            Ok(()) => {
                self.autosave_blocked = false;
                self.info("Tasks saved.");
            }
            Err(e) => self.error(format!("Save failed: {}", e)),
        }
    }

    fn load(&mut self) {
        let outcome = self.store.load_all();
        self.note_load(&outcome);
        self.selected = None;
        self.refresh();
    }
}
