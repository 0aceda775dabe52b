//! Logging setup for the `reviewify` binary.
//!
//! Events are written to stderr so stdout stays free for the rendered page.
//!
//! ## Environment Variables
//!
//! 1. **`REVIEWIFY_LOG`** (highest priority). A bare level such as `debug`
//!    applies to this crate only; anything with `=`, `:` or `,` is used as a
//!    full filter.
//! 2. **`RUST_LOG`**, used as-is.
//! 3. **Default**: `warn` globally, `info` for this crate.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

use crate::review::ReviewError;

const DEFAULT_DIRECTIVE: &str = "warn,reviewify=info";

/// Installs the global stderr subscriber.
///
/// # Errors
///
/// Returns [`ReviewError::Configuration`] when the filter directive cannot be
/// parsed or a global subscriber is already installed.
pub fn init() -> Result<(), ReviewError> {
    let reviewify_log = env::var("REVIEWIFY_LOG").ok();
    let rust_log = env::var("RUST_LOG").ok();
    let directive = filter_directive(reviewify_log.as_deref(), rust_log.as_deref());

    let filter = EnvFilter::try_new(&directive).map_err(|error| ReviewError::Configuration {
        message: format!("invalid log filter {directive:?}: {error}"),
    })?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ReviewError::Configuration {
            message: format!("failed to install log subscriber: {error}"),
        })
}

/// Chooses the filter directive from the logging environment variables.
#[must_use]
pub fn filter_directive(reviewify_log: Option<&str>, rust_log: Option<&str>) -> String {
    match (reviewify_log, rust_log) {
        (Some(value), _) if value.contains(['=', ':', ',']) => value.to_owned(),
        (Some(level), _) => format!("warn,reviewify={level}"),
        (None, Some(value)) => value.to_owned(),
        (None, None) => DEFAULT_DIRECTIVE.to_owned(),
    }
}
