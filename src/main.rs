//! Reviewify CLI entrypoint: renders an upload's file viewer as an HTML page.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use reviewify::{ReviewError, ReviewifyConfig, logging};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReviewError> {
    logging::init()?;
    let config = load_config()?;
    cli::browse::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReviewError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ReviewifyConfig, ReviewError> {
    ReviewifyConfig::load().map_err(|error| ReviewError::Configuration {
        message: error.to_string(),
    })
}
