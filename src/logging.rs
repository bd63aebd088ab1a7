//! Structured logging with tracing
//!
//! Diagnostics go to stderr so the report stream on stdout stays clean for
//! downstream scraping. `RUST_LOG` takes precedence over the configured
//! level when set.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber from the logging configuration.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format.as_str() {
        "json" => builder.json().finish().try_init(),
        _ => builder.finish().try_init(),
    }
}
