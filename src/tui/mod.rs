//! Full-screen terminal UI: entry form, task table and delete confirmation.

mod app;
mod render;
mod run;

pub use app::DiaryApp;
pub use run::run_tui;
