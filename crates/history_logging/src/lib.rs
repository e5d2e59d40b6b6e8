#![deny(missing_docs)]
//! Shared logging utilities for the merchant history workspace.
//!
//! This crate provides the `history_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Crates using the
//! macros must also depend on `log`.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! history_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! history_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! history_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! history_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! history_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Level used by the test logger: debug in debug builds, info in release builds.
fn default_test_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    // Ignore the error if a logger was already set by another test.
    let _ = TermLogger::init(
        default_test_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
