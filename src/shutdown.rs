//! Orderly shutdown on Ctrl+C or SIGTERM.
//!
//! The handler only raises a flag. The terminal UI polls it between events,
//! leaves its loop, and saves the diary on the way out. A second signal
//! exits immediately without saving.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Set once a shutdown signal has arrived.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Number of signals received so far.
static INTERRUPT_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Signals after which the process exits without cleanup.
const MAX_INTERRUPTS: usize = 2;

/// Register the Ctrl+C / SIGTERM handler.
///
/// Should be called once, before the terminal UI starts.
pub fn register_handler() -> Result<(), String> {
    ctrlc::set_handler(move || {
        let count = INTERRUPT_COUNT.fetch_add(1, Ordering::SeqCst) + 1;

        if count >= MAX_INTERRUPTS {
            eprintln!("\nForce quit without saving");
            std::process::exit(130);
        }

        SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
    })
    .map_err(|e| format!("failed to register Ctrl+C handler: {}", e))
}

/// Whether shutdown has been requested.
pub fn requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

#[cfg(test)]
fn request() {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

#[cfg(test)]
fn reset() {
    SHUTDOWN_REQUESTED.store(false, Ordering::SeqCst);
    INTERRUPT_COUNT.store(0, Ordering::SeqCst);
}
