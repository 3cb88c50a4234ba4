#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! This crate provides the `dashboard_*` logging macros used across the
//! codebase and a minimal test initializer for the global logger.
//!
//! Lines about a single job request go through [`dashboard_request!`], which
//! logs under [`REQUEST_TARGET`] and prefixes the request id so one request can
//! be followed through `dashboard.log` even when several overlap.

/// Log target for everything tied to one job request.
pub const REQUEST_TARGET: &str = "dashboard::request";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Logs a message about one request under [`REQUEST_TARGET`].
///
/// ```
/// dashboard_logging::dashboard_request!(info, 3, "route={} succeeded", "transactions/sync");
/// ```
#[macro_export]
macro_rules! dashboard_request {
    ($level:ident, $request_id:expr, $($arg:tt)+) => {{
        log::$level!(
            target: $crate::REQUEST_TARGET,
            "[request {}] {}",
            $request_id,
            format_args!($($arg)+)
        );
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already have installed the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Never,
    )]);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use log::{Level, Log, Metadata, Record};

    struct Capture(Mutex<Vec<(Level, String, String)>>);

    impl Log for Capture {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.0.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

    #[test]
    fn request_lines_carry_target_and_id() {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(log::LevelFilter::Trace);

        crate::dashboard_request!(warn, 7, "route={} failed: {}", "transactions/sync", "boom");
        crate::dashboard_info!("untagged");

        let records = CAPTURE.0.lock().unwrap();
        assert_eq!(
            records[0],
            (
                Level::Warn,
                "dashboard::request".to_string(),
                "[request 7] route=transactions/sync failed: boom".to_string()
            )
        );
        assert_ne!(records[1].1, crate::REQUEST_TARGET);
        assert_eq!(records[1].2, "untagged");
    }
}
