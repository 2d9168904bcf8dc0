//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. explicit level passed by the binary
//! 2. `NETWORK_PLAN_LOG` environment variable (e.g. "info", "network_plan=debug")
//! 3. default to `info`
//!
//! Output goes to stderr so the REPL's stdout stays clean.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::errors::ConfigError;

pub const LOG_ENV: &str = "NETWORK_PLAN_LOG";

/// Install the global subscriber. A second call reports an error instead of
/// panicking.
pub fn init_logging(level: Option<&str>) -> Result<(), ConfigError> {
    let directive = match level {
        Some(level) => level.to_string(),
        None => std::env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string()),
    };
    let filter = build_filter(&directive)?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ConfigError::Logging(err.to_string()))
}

fn build_filter(directive: &str) -> Result<EnvFilter, ConfigError> {
    let directive = match directive.trim().to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "" => "info".to_string(),
        other => other.to_string(),
    };
    EnvFilter::try_new(&directive)
        .map_err(|err| ConfigError::Logging(format!("bad filter '{directive}': {err}")))
}
