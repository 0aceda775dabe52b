//! Reviewify library crate providing a file list and diff viewer for code
//! review uploads.
//!
//! The library talks to a review backend's AJAX endpoints, turns file and
//! diff payloads into HTML panels, and keeps the panel state for one upload:
//! which file is selected, which panels are cached, and which fetch is still
//! awaited. Backend failures are rendered inline as localized messages.

pub mod config;
pub mod logging;
pub mod messages;
pub mod render;
pub mod review;
pub mod widget;

pub use config::ReviewifyConfig;
pub use messages::MessageCatalog;
pub use render::{FileViewRenderer, HtmlFragment};
pub use review::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, FetchedContent, FileCategory, FileContent, FileDescriptor,
    FileDiff, FileList, HttpReviewGateway, ItemId, ReviewError, ReviewGateway, ReviewLocator,
};
pub use widget::{
    FileListing, PanelVisibility, ResolveOutcome, ReviewWidget, SelectOutcome, ViewMode,
    ViewState, WidgetView,
};
