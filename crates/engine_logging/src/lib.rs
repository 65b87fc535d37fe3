#![deny(missing_docs)]
//! Shared logging utilities for the wallpaper workspace.
//!
//! The `engine_*` macros forward to the `log` facade, so library crates never
//! pick a backend. The binary installs one; tests call
//! [`initialize_for_tests`].

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Maps a verbosity flag to the level filter used by the application logger.
///
/// `verbose` wins over build profile; otherwise debug builds log at debug
/// level and release builds at info.
pub fn level_for(verbose: bool) -> log::LevelFilter {
    if verbose || cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Installs a stderr logger for tests, limited to this workspace's crates.
///
/// Calling it again, or after another logger was installed, does nothing.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let config = ConfigBuilder::new()
        .add_filter_allow_str("wallpaper")
        .build();
    let _ = TermLogger::init(
        log::LevelFilter::Trace,
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}
