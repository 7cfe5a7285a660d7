#![deny(missing_docs)]
//! Shared logging utilities for the scout workspace.
//!
//! This crate provides the `scout_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Messages logged
//! while a turn is recorded for the thread are tagged with its id. Crates
//! using the macros must depend on `log` themselves.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the turn currently being processed.
    static CURRENT_TURN: Cell<u64> = const { Cell::new(0) };
}

/// Records the turn id being processed on the current thread.
/// The session loop calls this whenever it dispatches a turn-scoped message.
pub fn set_current_turn(turn: u64) {
    CURRENT_TURN.with(|v| v.set(turn));
}

/// Retrieves the turn id recorded for the current thread.
/// Returns 0 if no turn has been recorded.
pub fn current_turn() -> u64 {
    CURRENT_TURN.with(|v| v.get())
}

/// Prefix the logging macros put in front of every message: `[turn N] `, or
/// nothing outside a turn.
pub fn turn_tag() -> String {
    match current_turn() {
        0 => String::new(),
        turn => format!("[turn {turn}] "),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scout_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::turn_tag(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scout_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::turn_tag(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scout_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::turn_tag(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scout_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::turn_tag(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scout_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::turn_tag(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
