//! Logging initialization for `hb`.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `HOMEBOARD_LOG` environment variable. Falls back to the `[log] level`
//! from the config file when the variable is unset or invalid.
//!
//! # Usage
//!
//! ```bash
//! # Configured level (info by default)
//! hb show
//!
//! # Debug level
//! HOMEBOARD_LOG=debug hb finance show
//!
//! # Module-specific filtering
//! HOMEBOARD_LOG=homeboard::widgets=debug,warn hb show
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "HOMEBOARD_LOG";

/// Builds the filter from `HOMEBOARD_LOG`, or `fallback` when unset.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the tracing subscriber, writing to stderr without targets.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (should only be
/// called once, at startup).
pub fn init(fallback: LogLevel) {
    fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::xdg::test_env::with_env;
    use serial_test::serial;

    #[test]
    fn env_filter_parses_module_directive() {
        assert!(EnvFilter::try_new("homeboard::widgets=debug,warn").is_ok());
    }

    #[test]
    #[serial]
    fn filter_falls_back_to_configured_level() {
        with_env(&[(LOG_ENV, None)], || {
            assert_eq!(filter(LogLevel::Debug).to_string(), "debug");
        });
    }

    #[test]
    #[serial]
    fn filter_prefers_env() {
        with_env(&[(LOG_ENV, Some("trace"))], || {
            assert_eq!(filter(LogLevel::Error).to_string(), "trace");
        });
    }
}
