//! Diagnostic logging setup
//!
//! Logs go to stderr so they never interleave with the report on stdout.

use crate::config::{Config, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber; later calls are no-ops
pub fn init(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!config.no_color)
        .without_time()
        .try_init();
}
