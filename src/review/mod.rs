//! Review backend access: endpoint locators, wire models and gateways.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::ReviewError;
#[cfg(test)]
pub use gateway::MockReviewGateway;
pub use gateway::{DEFAULT_TIMEOUT, HttpReviewGateway, ReviewGateway};
pub use locator::{DEFAULT_BASE_URL, ItemId, ReviewLocator};
pub use models::{FetchedContent, FileCategory, FileContent, FileDescriptor, FileDiff, FileList};
