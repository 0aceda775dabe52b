//! Gateways for loading file listings, contents and diffs.
//!
//! The trait-based design enables mocking in tests while the HTTP
//! implementation talks to the review backend's AJAX endpoints.

mod error_mapping;

use std::time::Duration;

use async_trait::async_trait;
use http::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::ReviewError;
use super::locator::ReviewLocator;
use super::models::{FileContent, FileDiff, FileList};
use error_mapping::{Resource, map_decode_error, map_status, map_transport_error};

/// Default HTTP timeout for review requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Gateway that can load review data for one item.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Fetch the categorised file list, optionally excluding binary files.
    async fn file_list(
        &self,
        locator: &ReviewLocator,
        disallow_binary: bool,
    ) -> Result<FileList, ReviewError>;

    /// Fetch the highlighted content of one file.
    async fn file(&self, locator: &ReviewLocator, filename: &str)
    -> Result<FileContent, ReviewError>;

    /// Fetch the diff of one file against the previous upload.
    ///
    /// Returns `None` when the backend reports no changes.
    async fn file_diff(
        &self,
        locator: &ReviewLocator,
        filename: &str,
    ) -> Result<Option<FileDiff>, ReviewError>;
}

/// `reqwest`-backed gateway.
#[derive(Debug, Clone)]
pub struct HttpReviewGateway {
    client: Client,
}

impl HttpReviewGateway {
    /// Creates a gateway from an existing client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when the client cannot be
    /// constructed (for example when no TLS backend is available).
    pub fn with_timeout(timeout: Duration) -> Result<Self, ReviewError> {
        Client::builder()
            .timeout(timeout)
            .build()
            .map(Self::new)
            .map_err(|error| ReviewError::Configuration {
                message: format!("failed to configure review HTTP client: {error}"),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: Url,
        resource: Resource<'_>,
    ) -> Result<T, ReviewError> {
        tracing::debug!(%url, "{operation} request");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "{operation} rejected");
            return Err(map_status(resource, status, &body));
        }

        serde_json::from_str(&body).map_err(|error| map_decode_error(operation, &error))
    }
}

#[async_trait]
impl ReviewGateway for HttpReviewGateway {
    async fn file_list(
        &self,
        locator: &ReviewLocator,
        disallow_binary: bool,
    ) -> Result<FileList, ReviewError> {
        let url = locator.file_list_url(disallow_binary)?;
        self.get_json(
            "file list",
            url,
            Resource::FileList {
                item: locator.item().as_str(),
            },
        )
        .await
    }

    async fn file(
        &self,
        locator: &ReviewLocator,
        filename: &str,
    ) -> Result<FileContent, ReviewError> {
        let url = locator.file_url(filename)?;
        self.get_json("file", url, Resource::File { filename })
            .await
    }

    async fn file_diff(
        &self,
        locator: &ReviewLocator,
        filename: &str,
    ) -> Result<Option<FileDiff>, ReviewError> {
        let url = locator.file_diff_url(filename)?;
        self.get_json("file diff", url, Resource::File { filename })
            .await
    }
}
