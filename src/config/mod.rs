//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.reviewify.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REVIEWIFY_PK`, `REVIEWIFY_BASE_URL`, and
//!    so on
//! 4. **Command-line arguments** – `--pk`/`-p`, `--base-url`/`-b`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! pk = "1234"
//! base_url = "https://review.example.org/review/ajax"
//! diff = true
//! output = "review.html"
//! messages_path = "messages.json"
//! request_timeout_seconds = 30
//! ```

use std::time::Duration;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::review::{DEFAULT_BASE_URL, ItemId, ReviewError, ReviewLocator};
use crate::widget::ViewMode;

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 20;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use reviewify::ReviewifyConfig;
///
/// let config = ReviewifyConfig::load().expect("failed to load configuration");
/// let locator = config.locator().expect("item identifier required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REVIEWIFY",
    discovery(
        dotfile_name = ".reviewify.toml",
        config_file_name = "reviewify.toml",
        app_name = "reviewify"
    )
)]
pub struct ReviewifyConfig {
    /// Identifier of the upload under review.
    ///
    /// Can be provided via:
    /// - CLI: `--pk <ID>` or `-p <ID>`
    /// - Environment: `REVIEWIFY_PK`
    /// - Config file: `pk = "..."`
    #[ortho_config(cli_short = 'p')]
    pub pk: Option<String>,

    /// Base URL of the review AJAX endpoints.
    ///
    /// Defaults to `http://localhost:8000/review/ajax`.
    #[ortho_config(cli_short = 'b')]
    pub base_url: String,

    /// Shows diffs against the previous upload instead of plain files.
    ///
    /// Note: `REVIEWIFY_DIFF` is not supported because `ortho_config` does
    /// not load boolean values from the environment.
    #[ortho_config(cli_short = 'd')]
    pub diff: bool,

    /// File to select after the list loads instead of the first one.
    #[ortho_config(cli_short = 'f')]
    pub file: Option<String>,

    /// Path of the HTML page to write. The page goes to stdout when unset.
    #[ortho_config(cli_short = 'o')]
    pub output: Option<String>,

    /// JSON message catalog whose entries override the built-in strings.
    #[ortho_config()]
    pub messages_path: Option<String>,

    /// Timeout applied to each backend request, in seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,
}

impl Default for ReviewifyConfig {
    fn default() -> Self {
        Self {
            pk: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            diff: false,
            file: None,
            output: None,
            messages_path: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl ReviewifyConfig {
    /// Returns the validated item identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingItem`] when no identifier is configured
    /// and [`ReviewError::InvalidItem`] when it cannot be used in a path.
    pub fn require_item(&self) -> Result<ItemId, ReviewError> {
        self.pk
            .as_deref()
            .ok_or(ReviewError::MissingItem)
            .and_then(ItemId::new)
    }

    /// Builds the endpoint locator from the base URL and item identifier.
    ///
    /// # Errors
    ///
    /// Returns the item errors of [`Self::require_item`] or
    /// [`ReviewError::InvalidUrl`] when the base URL cannot be used.
    pub fn locator(&self) -> Result<ReviewLocator, ReviewError> {
        ReviewLocator::new(&self.base_url, self.require_item()?)
    }

    /// File or diff mode.
    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        if self.diff {
            ViewMode::Diff
        } else {
            ViewMode::File
        }
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Path of the catalog override, if any.
    #[must_use]
    pub fn messages_path(&self) -> Option<&Utf8Path> {
        self.messages_path.as_deref().map(Utf8Path::new)
    }

    /// Path of the output page, if any.
    #[must_use]
    pub fn output_path(&self) -> Option<&Utf8Path> {
        self.output.as_deref().map(Utf8Path::new)
    }
}

#[cfg(test)]
mod tests;
