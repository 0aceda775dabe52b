//! Error types exposed by the review backend layer.

use thiserror::Error;

/// Errors surfaced while configuring the client or talking to the review
/// backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// The CLI did not include an item identifier.
    #[error("item identifier is required (use --pk or REVIEWIFY_PK)")]
    MissingItem,

    /// The item identifier cannot be placed in an endpoint path.
    #[error("item identifier is invalid: {0}")]
    InvalidItem(String),

    /// The base URL could not be parsed or extended.
    #[error("review URL is invalid: {0}")]
    InvalidUrl(String),

    /// Networking failed while calling the review backend.
    #[error("network error talking to the review server: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The backend does not know the requested file.
    #[error("file not found: {filename}")]
    FileNotFound {
        /// Filename that was requested.
        filename: String,
    },

    /// The backend does not know the requested item.
    #[error("review item not found: {item}")]
    ItemNotFound {
        /// Item identifier that was requested.
        item: String,
    },

    /// The backend answered with a body that does not match the expected
    /// JSON shape.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Decoder error detail.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("review server returned {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A template or message could not be rendered.
    #[error("template error: {message}")]
    Template {
        /// Details about the rendering failure.
        message: String,
    },

    /// A background fetch ended without producing a result.
    #[error("fetch task failed: {message}")]
    TaskFailed {
        /// What happened to the task.
        message: String,
    },
}

impl ReviewError {
    /// Returns the `review` catalog key describing this error to a reader.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network_error",
            Self::FileNotFound { .. } => "file_not_found",
            Self::ItemNotFound { .. } => "item_not_found",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Server { .. } => "server_error",
            Self::MissingItem
            | Self::InvalidItem(_)
            | Self::InvalidUrl(_)
            | Self::Io { .. }
            | Self::Configuration { .. }
            | Self::Template { .. }
            | Self::TaskFailed { .. } => "internal_error",
        }
    }

    /// Returns a short CSS-friendly category label.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::FileNotFound { .. } | Self::ItemNotFound { .. } => "not-found",
            Self::MalformedResponse { .. } => "malformed",
            Self::Server { .. } => "server",
            Self::MissingItem
            | Self::InvalidItem(_)
            | Self::InvalidUrl(_)
            | Self::Io { .. }
            | Self::Configuration { .. }
            | Self::Template { .. }
            | Self::TaskFailed { .. } => "internal",
        }
    }
}
