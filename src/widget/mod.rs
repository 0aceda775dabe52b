//! The review widget: file list, panel switching and rendering.
//!
//! [`ReviewWidget`] ties the pieces together. It loads the file list,
//! auto-selects the first file, spawns one fetch per distinct file on the
//! Tokio runtime, and applies completed fetches through the
//! [`PanelSwitcher`]. The HTML it produces is a projection of that state.
//!
//! Failures never escape the widget: a failed listing replaces the list with
//! a message, and a failed fetch becomes an inline failure panel.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use reviewify::{
//!     FileViewRenderer, HttpReviewGateway, ItemId, MessageCatalog, ReviewLocator, ReviewWidget,
//!     ViewMode,
//! };
//!
//! # async fn demo() -> Result<(), reviewify::ReviewError> {
//! let locator = ReviewLocator::new("http://localhost:8000/review/ajax", ItemId::new("42")?)?;
//! let gateway = Arc::new(HttpReviewGateway::with_timeout(reviewify::DEFAULT_TIMEOUT)?);
//! let renderer = FileViewRenderer::new(MessageCatalog::builtin()?)?;
//!
//! let mut widget = ReviewWidget::new(gateway, locator, ViewMode::Diff, renderer);
//! widget.load().await;
//! widget.settle().await;
//! println!("{}", widget.render()?);
//! # Ok(())
//! # }
//! ```

mod file_list;
mod switcher;
mod view;

use std::collections::HashMap;
use std::sync::Arc;

use minijinja::context;
use tokio::task::{self, JoinError, JoinSet};

use crate::render::{FileViewRenderer, HtmlFragment};
use crate::review::{
    FetchedContent, FileDescriptor, ReviewError, ReviewGateway, ReviewLocator,
};

pub use file_list::FileListLoader;
pub use switcher::{
    FetchTicket, Generation, Panel, PanelSwitcher, ResolveOutcome, SelectOutcome, Transition,
    ViewState,
};
pub use view::{PanelView, PanelVisibility, SelectorView, WidgetView};

const FILE_LIST_SUBJECT: &str = "the file list";

/// Whether panels show single files or diffs against the previous upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Show each file's current content.
    #[default]
    File,
    /// Show old and new versions side by side.
    Diff,
}

impl ViewMode {
    /// Diff mode leaves binary files out of the listing.
    #[must_use]
    pub const fn disallow_binary(self) -> bool {
        matches!(self, Self::Diff)
    }
}

/// State of the file list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileListing {
    /// [`ReviewWidget::load`] has not completed yet.
    #[default]
    NotLoaded,
    /// The backend listed no files.
    Empty,
    /// Selectors in display order.
    Loaded(Vec<FileDescriptor>),
    /// The listing could not be fetched.
    Failed(ReviewError),
}

impl FileListing {
    /// Listed files; empty unless loaded.
    #[must_use]
    pub fn files(&self) -> &[FileDescriptor] {
        match self {
            Self::Loaded(files) => files,
            Self::NotLoaded | Self::Empty | Self::Failed(_) => &[],
        }
    }
}

type Completion = (FetchTicket, Result<FetchedContent, ReviewError>);

/// File list and viewer for one item under review.
///
/// Dropping the widget aborts in-flight fetches and frees every cached
/// panel.
pub struct ReviewWidget<G>
where
    G: ReviewGateway + 'static,
{
    gateway: Arc<G>,
    locator: ReviewLocator,
    mode: ViewMode,
    renderer: FileViewRenderer,
    listing: FileListing,
    switcher: PanelSwitcher,
    in_flight: JoinSet<Completion>,
    tickets: HashMap<task::Id, FetchTicket>,
}

impl<G> ReviewWidget<G>
where
    G: ReviewGateway + 'static,
{
    /// Creates a widget; nothing is fetched until [`Self::load`].
    #[must_use]
    pub fn new(
        gateway: Arc<G>,
        locator: ReviewLocator,
        mode: ViewMode,
        renderer: FileViewRenderer,
    ) -> Self {
        Self {
            gateway,
            locator,
            mode,
            renderer,
            listing: FileListing::NotLoaded,
            switcher: PanelSwitcher::new(),
            in_flight: JoinSet::new(),
            tickets: HashMap::new(),
        }
    }

    /// Fetches the file list and selects its first file.
    ///
    /// Calling `load` again starts over: in-flight fetches are aborted and
    /// cached panels dropped.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub async fn load(&mut self) -> &FileListing {
        self.load_preferring(None).await
    }

    /// Fetches the file list and selects `preferred`, falling back to the
    /// first file when `preferred` is absent or not listed.
    ///
    /// Only the file that ends up selected is fetched.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub async fn load_preferring(&mut self, preferred: Option<&str>) -> &FileListing {
        self.in_flight.abort_all();
        self.tickets.clear();
        self.switcher.clear();

        let loader = FileListLoader::new(self.gateway.as_ref());
        self.listing = match loader.load(&self.locator, self.mode).await {
            Ok(files) if files.is_empty() => FileListing::Empty,
            Ok(files) => FileListing::Loaded(files),
            Err(error) => {
                tracing::warn!(item = %self.locator.item(), "file list failed: {error}");
                FileListing::Failed(error)
            }
        };

        match preferred {
            Some(filename) if self.is_listed(filename) => {
                self.select(filename);
            }
            Some(filename) => {
                if matches!(self.listing, FileListing::Loaded(_)) {
                    tracing::warn!(filename, "requested file is not part of this upload");
                }
                self.select_first();
            }
            None => {
                self.select_first();
            }
        }
        &self.listing
    }

    /// Selects the first listed file, if any.
    ///
    /// # Panics
    ///
    /// Panics when a fetch must be spawned outside a Tokio runtime.
    pub fn select_first(&mut self) -> Option<SelectOutcome> {
        let first = self.listing.files().first()?.filename.clone();
        Some(self.select(&first))
    }

    /// Handles a click on `filename`'s selector.
    ///
    /// Spawns a fetch when the panel is neither cached nor in flight.
    ///
    /// # Panics
    ///
    /// Panics when a fetch must be spawned outside a Tokio runtime.
    pub fn select(&mut self, filename: &str) -> SelectOutcome {
        if !self.is_listed(filename) {
            return SelectOutcome::UnknownFile;
        }

        let outcome = self.switcher.request(filename);
        if let SelectOutcome::Fetch(ticket) = &outcome {
            self.spawn_fetch(ticket.clone());
        }
        outcome
    }

    /// Waits for the next fetch to complete and applies it.
    ///
    /// A fetch task that panicked resolves its panel as an internal failure,
    /// so selecting the file again refetches it. Fetches aborted by
    /// [`Self::load`] report [`ResolveOutcome::Abandoned`].
    ///
    /// Returns `None` when no fetch is in flight.
    pub async fn next_resolution(&mut self) -> Option<ResolveOutcome> {
        let joined = self.in_flight.join_next_with_id().await?;
        Some(match joined {
            Ok((id, (ticket, result))) => {
                self.tickets.remove(&id);
                self.apply(&ticket, result)
            }
            Err(error) => self.recover(&error),
        })
    }

    /// Applies every in-flight fetch.
    pub async fn settle(&mut self) {
        while self.next_resolution().await.is_some() {}
    }

    /// Returns true while any fetch is outstanding.
    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Ends the current cross-fade.
    pub fn finish_transition(&mut self) {
        self.switcher.finish_transition();
    }

    /// The file list state.
    #[must_use]
    pub const fn listing(&self) -> &FileListing {
        &self.listing
    }

    /// The panel state machine.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        self.switcher.state()
    }

    /// The locator this widget fetches from.
    #[must_use]
    pub const fn locator(&self) -> &ReviewLocator {
        &self.locator
    }

    /// The renderer panels are drawn with.
    #[must_use]
    pub const fn renderer(&self) -> &FileViewRenderer {
        &self.renderer
    }

    /// Projects the current state into renderable data.
    #[must_use]
    pub fn view(&self) -> WidgetView {
        let selected = self.switcher.visible();
        let selectors = self
            .listing
            .files()
            .iter()
            .map(|file| SelectorView {
                filename: file.filename.clone(),
                category: file.category.css_class(),
                selected: selected == Some(file.filename.as_str()),
            })
            .collect();

        let panels = self
            .switcher
            .panels()
            .map(|(filename, panel)| {
                let visibility = self.switcher.visibility(filename);
                PanelView {
                    filename: filename.to_owned(),
                    visibility,
                    style: visibility.style(),
                    failed: panel.is_failed(),
                    html: panel.html().clone(),
                }
            })
            .collect();

        let list_message = match &self.listing {
            FileListing::Empty => Some(self.renderer.message("empty_file_list", context! {})),
            FileListing::Failed(error) => {
                Some(self.renderer.failure_message(FILE_LIST_SUBJECT, error))
            }
            FileListing::NotLoaded | FileListing::Loaded(_) => None,
        };

        let loading_message = self.switcher.pending().map(|ticket| {
            self.renderer
                .message("loading", context! { filename => ticket.filename() })
        });

        WidgetView {
            item: self.locator.item().to_string(),
            diff: self.mode == ViewMode::Diff,
            list_hidden: matches!(self.listing, FileListing::NotLoaded),
            list_message,
            selectors,
            panels,
            loading_message,
        }
    }

    /// Renders the current projection as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Template`] when rendering fails.
    pub fn render(&self) -> Result<HtmlFragment, ReviewError> {
        self.renderer.render_widget(&self.view())
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let gateway = Arc::clone(&self.gateway);
        let locator = self.locator.clone();
        let mode = self.mode;

        tracing::debug!(
            filename = ticket.filename(),
            generation = ticket.generation().get(),
            "fetching panel"
        );

        let tracked = ticket.clone();
        let handle = self.in_flight.spawn(async move {
            let result = fetch_content(gateway.as_ref(), &locator, mode, ticket.filename()).await;
            (ticket, result)
        });
        self.tickets.insert(handle.id(), tracked);
    }

    fn is_listed(&self, filename: &str) -> bool {
        self.listing
            .files()
            .iter()
            .any(|file| file.filename == filename)
    }

    fn recover(&mut self, error: &JoinError) -> ResolveOutcome {
        match (self.tickets.remove(&error.id()), error.is_panic()) {
            (Some(ticket), true) => {
                tracing::error!(filename = ticket.filename(), "panel fetch task panicked");
                let failure = ReviewError::TaskFailed {
                    message: format!("fetch for {} panicked", ticket.filename()),
                };
                self.apply(&ticket, Err(failure))
            }
            (None, true) => {
                tracing::error!("panel fetch task from an earlier load panicked");
                ResolveOutcome::Abandoned
            }
            (_, false) => {
                tracing::debug!("panel fetch cancelled: {error}");
                ResolveOutcome::Abandoned
            }
        }
    }

    fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: Result<FetchedContent, ReviewError>,
    ) -> ResolveOutcome {
        let rendered = result.and_then(|content| self.renderer.render_content(&content));
        let panel = match rendered {
            Ok(html) => Panel::ready(html),
            Err(error) => {
                tracing::warn!(filename = ticket.filename(), "panel failed: {error}");
                Panel::failed(self.renderer.render_failure(ticket.filename(), &error))
            }
        };

        let outcome = self.switcher.resolve(ticket, panel);
        tracing::debug!(filename = ticket.filename(), ?outcome, "panel resolved");
        outcome
    }
}

async fn fetch_content<G>(
    gateway: &G,
    locator: &ReviewLocator,
    mode: ViewMode,
    filename: &str,
) -> Result<FetchedContent, ReviewError>
where
    G: ReviewGateway + ?Sized,
{
    match mode {
        ViewMode::File => gateway
            .file(locator, filename)
            .await
            .map(FetchedContent::File),
        ViewMode::Diff => gateway
            .file_diff(locator, filename)
            .await
            .map(FetchedContent::Diff),
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod tests;
