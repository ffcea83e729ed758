//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
mod sink;
pub mod spans;

pub use sink::TracingSink;

use pavlov_core::config::ObservabilityConfig;
use pavlov_core::errors::{PavlovError, PavlovResult};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "PAVLOV_LOG";

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `PAVLOV_LOG` environment variable for filtering.
/// Defaults to `info` level if not set. Does nothing if a global subscriber
/// is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init();
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init();
}

/// Initialize tracing from the `[observability]` config section.
///
/// `PAVLOV_LOG` still wins over `log_level` when set. Returns whether this call
/// installed the global subscriber.
pub fn init_from_config(config: &ObservabilityConfig) -> PavlovResult<bool> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            PavlovError::invalid_configuration(format!(
                "log_level {:?}: {e}",
                config.log_level
            ))
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    Ok(installed)
}
