//! Panel cache and visibility state machine.
//!
//! The switcher owns every rendered panel, keyed by filename, and an
//! explicit [`ViewState`]. Fetches are represented by [`FetchTicket`]s
//! carrying a generation number; a resolved ticket is shown only when it is
//! still the awaited one, so a slow response for a file the reader has
//! already left is cached but never displayed.

use std::collections::HashMap;
use std::mem;

use crate::render::HtmlFragment;

use super::view::PanelVisibility;

/// Monotonic fetch number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Claim on the result of one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    filename: String,
    generation: Generation,
}

impl FetchTicket {
    /// File the fetch is for.
    #[must_use]
    pub const fn filename(&self) -> &str {
        self.filename.as_str()
    }

    /// Generation the fetch was issued with.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }
}

/// A rendered panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    html: HtmlFragment,
    failed: bool,
}

impl Panel {
    /// Panel showing fetched content.
    #[must_use]
    pub const fn ready(html: HtmlFragment) -> Self {
        Self { html, failed: false }
    }

    /// Panel showing an inline failure message.
    #[must_use]
    pub const fn failed(html: HtmlFragment) -> Self {
        Self { html, failed: true }
    }

    /// The panel markup.
    #[must_use]
    pub const fn html(&self) -> &HtmlFragment {
        &self.html
    }

    /// Returns true for failure panels.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.failed
    }
}

/// How the visible panel came to be visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Shown immediately because nothing was visible before.
    Appear,
    /// Fading in while the previous panel, pinned in place, fades out.
    CrossFade {
        /// Filename of the panel fading out.
        from: String,
    },
    /// No transition in progress.
    Steady,
}

/// Which file is visible and which fetch, if any, is awaited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing has been selected yet.
    #[default]
    Unselected,
    /// The first selection is loading; nothing is visible.
    Loading {
        /// Fetch whose result will be shown.
        pending: FetchTicket,
    },
    /// A panel is visible.
    Visible {
        /// Filename of the visible panel; its selector is the selected one.
        filename: String,
        /// Transition that brought it on screen.
        transition: Transition,
        /// Newer selection still loading, shown when it resolves.
        pending: Option<FetchTicket>,
    },
}

/// Result of asking for a file's panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The file is already visible; nothing happens.
    Unchanged,
    /// The file is already being fetched; its result is awaited again.
    Awaiting(FetchTicket),
    /// A cached panel was brought on screen.
    Shown(Transition),
    /// The caller must fetch the file and resolve this ticket.
    Fetch(FetchTicket),
    /// The file is not part of the listing.
    UnknownFile,
}

/// Result of handing a fetched panel back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The panel was awaited and is now visible.
    Shown(Transition),
    /// The panel was cached; the reader has moved on.
    Cached,
    /// The ticket no longer matches an in-flight fetch.
    Discarded,
    /// The fetch task was cancelled before producing a result.
    Abandoned,
}

#[derive(Debug, Clone)]
enum PanelSlot {
    InFlight(Generation),
    Rendered(Panel),
}

enum CacheLookup {
    Ready,
    InFlight(Generation),
    Missing,
}

/// Owns rendered panels and decides which one is visible.
#[derive(Debug, Default)]
pub struct PanelSwitcher {
    slots: HashMap<String, PanelSlot>,
    order: Vec<String>,
    state: ViewState,
    next_generation: u64,
}

impl PanelSwitcher {
    /// Creates an empty switcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Filename of the visible panel, which is also the selected selector.
    #[must_use]
    pub fn visible(&self) -> Option<&str> {
        match &self.state {
            ViewState::Visible { filename, .. } => Some(filename.as_str()),
            ViewState::Unselected | ViewState::Loading { .. } => None,
        }
    }

    /// The fetch whose result will be shown on arrival.
    #[must_use]
    pub const fn pending(&self) -> Option<&FetchTicket> {
        match &self.state {
            ViewState::Loading { pending } => Some(pending),
            ViewState::Visible { pending, .. } => pending.as_ref(),
            ViewState::Unselected => None,
        }
    }

    /// Returns true when a successfully rendered panel is cached.
    #[must_use]
    pub fn is_cached(&self, filename: &str) -> bool {
        matches!(self.lookup(filename), CacheLookup::Ready)
    }

    /// Asks for `filename`'s panel to become visible.
    pub fn request(&mut self, filename: &str) -> SelectOutcome {
        if self.visible() == Some(filename) {
            if let ViewState::Visible { pending, .. } = &mut self.state
                && let Some(superseded) = pending.take()
            {
                tracing::debug!(
                    filename = superseded.filename(),
                    "pending panel superseded by reselection"
                );
            }
            return SelectOutcome::Unchanged;
        }

        match self.lookup(filename) {
            CacheLookup::Ready => SelectOutcome::Shown(self.show(filename)),
            CacheLookup::InFlight(generation) => {
                let ticket = FetchTicket {
                    filename: filename.to_owned(),
                    generation,
                };
                self.await_ticket(ticket.clone());
                SelectOutcome::Awaiting(ticket)
            }
            CacheLookup::Missing => {
                let ticket = self.issue(filename);
                self.await_ticket(ticket.clone());
                SelectOutcome::Fetch(ticket)
            }
        }
    }

    /// Stores a fetched panel and shows it if its ticket is still awaited.
    pub fn resolve(&mut self, ticket: &FetchTicket, panel: Panel) -> ResolveOutcome {
        if !matches!(self.lookup(ticket.filename()), CacheLookup::InFlight(generation) if generation == ticket.generation())
        {
            return ResolveOutcome::Discarded;
        }

        self.store(ticket.filename(), panel);

        if self.pending() == Some(ticket) {
            ResolveOutcome::Shown(self.show(ticket.filename()))
        } else {
            ResolveOutcome::Cached
        }
    }

    /// Ends a cross-fade: the previous panel is fully hidden.
    pub fn finish_transition(&mut self) {
        if let ViewState::Visible { transition, .. } = &mut self.state {
            *transition = Transition::Steady;
        }
    }

    /// Projected visibility of one panel.
    #[must_use]
    pub fn visibility(&self, filename: &str) -> PanelVisibility {
        let ViewState::Visible {
            filename: visible,
            transition,
            ..
        } = &self.state
        else {
            return PanelVisibility::Hidden;
        };

        if visible == filename {
            return match transition {
                Transition::CrossFade { .. } => PanelVisibility::FadingIn,
                Transition::Appear | Transition::Steady => PanelVisibility::Shown,
            };
        }

        match transition {
            Transition::CrossFade { from } if from == filename => PanelVisibility::FadingOut,
            _ => PanelVisibility::Hidden,
        }
    }

    /// Rendered panels in the order they first arrived.
    pub fn panels(&self) -> impl Iterator<Item = (&str, &Panel)> {
        self.order
            .iter()
            .filter_map(|filename| match self.slots.get(filename) {
                Some(PanelSlot::Rendered(panel)) => Some((filename.as_str(), panel)),
                Some(PanelSlot::InFlight(_)) | None => None,
            })
    }

    /// Drops every panel and returns to [`ViewState::Unselected`].
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
        self.state = ViewState::Unselected;
    }

    fn lookup(&self, filename: &str) -> CacheLookup {
        match self.slots.get(filename) {
            Some(PanelSlot::Rendered(panel)) if !panel.is_failed() => CacheLookup::Ready,
            Some(PanelSlot::InFlight(generation)) => CacheLookup::InFlight(*generation),
            Some(PanelSlot::Rendered(_)) | None => CacheLookup::Missing,
        }
    }

    fn issue(&mut self, filename: &str) -> FetchTicket {
        self.next_generation += 1;
        let generation = Generation(self.next_generation);
        self.slots
            .insert(filename.to_owned(), PanelSlot::InFlight(generation));
        FetchTicket {
            filename: filename.to_owned(),
            generation,
        }
    }

    fn store(&mut self, filename: &str, panel: Panel) {
        self.slots
            .insert(filename.to_owned(), PanelSlot::Rendered(panel));
        if !self.order.iter().any(|known| known == filename) {
            self.order.push(filename.to_owned());
        }
    }

    fn await_ticket(&mut self, ticket: FetchTicket) {
        self.state = match mem::take(&mut self.state) {
            ViewState::Unselected | ViewState::Loading { .. } => {
                ViewState::Loading { pending: ticket }
            }
            ViewState::Visible {
                filename,
                transition,
                ..
            } => ViewState::Visible {
                filename,
                transition,
                pending: Some(ticket),
            },
        };
    }

    fn show(&mut self, filename: &str) -> Transition {
        let transition = match &self.state {
            ViewState::Visible { filename: from, .. } => Transition::CrossFade { from: from.clone() },
            ViewState::Unselected | ViewState::Loading { .. } => Transition::Appear,
        };
        self.state = ViewState::Visible {
            filename: filename.to_owned(),
            transition: transition.clone(),
            pending: None,
        };
        transition
    }
}
