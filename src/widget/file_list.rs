//! Loading the categorised file list for an item.

use crate::review::{FileDescriptor, ReviewError, ReviewGateway, ReviewLocator};

use super::ViewMode;

/// Fetches an item's file list and flattens it into selector order.
pub struct FileListLoader<'client, Gateway>
where
    Gateway: ReviewGateway + ?Sized,
{
    client: &'client Gateway,
}

impl<'client, Gateway> FileListLoader<'client, Gateway>
where
    Gateway: ReviewGateway + ?Sized,
{
    /// Create a loader using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Load the file list, one descriptor per file, ordered both, added,
    /// deleted with server order kept inside each group.
    ///
    /// Diff mode asks the backend to leave out binary files.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying gateway.
    pub async fn load(
        &self,
        locator: &ReviewLocator,
        mode: ViewMode,
    ) -> Result<Vec<FileDescriptor>, ReviewError> {
        let list = self
            .client
            .file_list(locator, mode.disallow_binary())
            .await?;

        tracing::info!(
            item = %locator.item(),
            both = list.both.len(),
            added = list.added.len(),
            deleted = list.deleted.len(),
            "file list loaded"
        );

        Ok(list.descriptors())
    }
}
