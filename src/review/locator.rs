//! Endpoint construction for the review backend.

use std::fmt;

use url::Url;

use super::error::ReviewError;

/// Default base URL of the review AJAX endpoints.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/review/ajax";

/// Identifier of the uploaded item under review.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Validates that the identifier is non-empty and path-safe, trimming
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingItem`] when the value is blank or
    /// [`ReviewError::InvalidItem`] when it contains path or query
    /// delimiters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ReviewError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReviewError::MissingItem);
        }
        if trimmed.contains(['/', '?', '#']) {
            return Err(ReviewError::InvalidItem(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base URL plus item identifier; builds the three endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLocator {
    base: Url,
    item: ItemId,
}

impl ReviewLocator {
    /// Parses the base URL and pairs it with an item.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the base cannot be parsed or
    /// cannot carry path segments (for example `mailto:` URLs).
    pub fn new(base_url: &str, item: ItemId) -> Result<Self, ReviewError> {
        let base =
            Url::parse(base_url).map_err(|error| ReviewError::InvalidUrl(error.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ReviewError::InvalidUrl(format!(
                "{base_url} cannot carry endpoint paths"
            )));
        }
        Ok(Self { base, item })
    }

    /// The item this locator points at.
    #[must_use]
    pub const fn item(&self) -> &ItemId {
        &self.item
    }

    /// The configured base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// `GET {base}/get-file-list/{id}?disallow_binary={bool}`
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the base cannot be extended.
    pub fn file_list_url(&self, disallow_binary: bool) -> Result<Url, ReviewError> {
        let mut url = self.endpoint("get-file-list")?;
        url.query_pairs_mut()
            .append_pair("disallow_binary", if disallow_binary { "true" } else { "false" });
        Ok(url)
    }

    /// `GET {base}/get-file/{id}?filename={name}`
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the base cannot be extended.
    pub fn file_url(&self, filename: &str) -> Result<Url, ReviewError> {
        self.file_endpoint("get-file", filename)
    }

    /// `GET {base}/get-file-diff/{id}?filename={name}`
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidUrl`] when the base cannot be extended.
    pub fn file_diff_url(&self, filename: &str) -> Result<Url, ReviewError> {
        self.file_endpoint("get-file-diff", filename)
    }

    fn file_endpoint(&self, fragment: &str, filename: &str) -> Result<Url, ReviewError> {
        let mut url = self.endpoint(fragment)?;
        url.query_pairs_mut().append_pair("filename", filename);
        Ok(url)
    }

    fn endpoint(&self, fragment: &str) -> Result<Url, ReviewError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| ReviewError::InvalidUrl(format!("{} cannot carry paths", self.base)))?
            .pop_if_empty()
            .push(fragment)
            .push(self.item.as_str());
        Ok(url)
    }
}
