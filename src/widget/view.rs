//! Pure projection of widget state into renderable data.

use serde::Serialize;

use crate::render::HtmlFragment;

/// Visibility of one panel in the display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelVisibility {
    /// Visible and at rest.
    Shown,
    /// Becoming visible during a cross-fade.
    FadingIn,
    /// Pinned at the top of the display area while it fades away.
    FadingOut,
    /// Not displayed.
    Hidden,
}

impl PanelVisibility {
    /// Inline style applied to the panel element.
    #[must_use]
    pub const fn style(self) -> &'static str {
        match self {
            Self::Shown | Self::FadingIn => "position: relative",
            Self::FadingOut => "position: absolute; top: 0",
            Self::Hidden => "display: none",
        }
    }

    /// Returns true for panels that are on screen once transitions settle.
    #[must_use]
    pub const fn is_settled_visible(self) -> bool {
        matches!(self, Self::Shown | Self::FadingIn)
    }
}

/// One file selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorView {
    /// Filename shown as the selector label.
    pub filename: String,
    /// Category CSS class.
    pub category: &'static str,
    /// Whether this selector matches the visible panel.
    pub selected: bool,
}

/// One rendered panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    /// File the panel shows.
    pub filename: String,
    /// Current visibility.
    pub visibility: PanelVisibility,
    /// Inline style derived from `visibility`.
    pub style: &'static str,
    /// Whether the panel holds a failure message.
    pub failed: bool,
    /// Panel markup.
    pub html: HtmlFragment,
}

/// Everything needed to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetView {
    /// Identifier of the item under review.
    pub item: String,
    /// Whether panels show diffs.
    pub diff: bool,
    /// The list is hidden until it has been loaded.
    pub list_hidden: bool,
    /// Message shown instead of the list (empty listing or failure).
    pub list_message: Option<String>,
    /// Selectors in display order.
    pub selectors: Vec<SelectorView>,
    /// Rendered panels in arrival order.
    pub panels: Vec<PanelView>,
    /// Message shown while the awaited panel loads.
    pub loading_message: Option<String>,
}

impl WidgetView {
    /// Filename of the selected selector, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selectors
            .iter()
            .find(|selector| selector.selected)
            .map(|selector| selector.filename.as_str())
    }

    /// Filenames of panels that remain on screen once transitions settle.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<&str> {
        self.panels
            .iter()
            .filter(|panel| panel.visibility.is_settled_visible())
            .map(|panel| panel.filename.as_str())
            .collect()
    }
}
