//! Terminal color helpers for command-line output.

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
}

use codes::*;

use crate::store::Status;
use crate::task::Priority;

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, RESET)
}

/// Color a status label: green when done, red when due, cyan when upcoming.
pub fn status(status: Status, text: &str) -> String {
    match status {
        Status::WellDone => format!("{}{}{}{}", BOLD, GREEN, text, RESET),
        Status::Due => format!("{}{}{}{}", BOLD, RED, text, RESET),
        Status::Upcoming => paint(CYAN, text),
    }
}

/// Color a priority label.
pub fn priority(priority: Priority, text: &str) -> String {
    match priority {
        Priority::High => paint(MAGENTA, text),
        Priority::Medium => paint(YELLOW, text),
        Priority::Low => paint(DIM, text),
    }
}

/// Color success messages (green).
pub fn success(text: &str) -> String {
    paint(GREEN, text)
}

/// Color error messages (red).
pub fn error(text: &str) -> String {
    paint(RED, text)
}

/// Color a label (bold).
pub fn label(text: &str) -> String {
    format!("{}{}{}", BOLD, text, RESET)
}
