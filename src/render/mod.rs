//! HTML rendering of file views, diff views and the widget projection.
//!
//! Templates are compiled into the crate and rendered with `minijinja`
//! using HTML auto-escaping. Content HTML produced by the review backend is
//! trusted and inserted verbatim; filenames and messages are escaped.

use std::fmt;

use minijinja::{Environment, HtmlEscape, context};
use serde::Serialize;

use crate::messages::{MessageCatalog, REVIEW_AREA};
use crate::review::{FetchedContent, FileContent, FileDiff, ReviewError};
use crate::widget::WidgetView;

const FILE_VIEW_TEMPLATE: &str = "file_view.html";
const DIFF_VIEW_TEMPLATE: &str = "diff_view.html";
const NO_CHANGES_TEMPLATE: &str = "no_changes.html";
const FAILURE_TEMPLATE: &str = "failure.html";
const WIDGET_TEMPLATE: &str = "widget.html";
const PAGE_TEMPLATE: &str = "page.html";

/// Largest line count a file view will number.
pub const MAX_GUTTER_LINES: u32 = 1_000_000;

const TEMPLATES: [(&str, &str); 6] = [
    (FILE_VIEW_TEMPLATE, include_str!("templates/file_view.html")),
    (DIFF_VIEW_TEMPLATE, include_str!("templates/diff_view.html")),
    (NO_CHANGES_TEMPLATE, include_str!("templates/no_changes.html")),
    (FAILURE_TEMPLATE, include_str!("templates/failure.html")),
    (WIDGET_TEMPLATE, include_str!("templates/widget.html")),
    (PAGE_TEMPLATE, include_str!("templates/page.html")),
];

/// A string of HTML that is safe to insert into a page as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HtmlFragment(String);

impl HtmlFragment {
    pub(crate) const fn from_rendered(html: String) -> Self {
        Self(html)
    }

    /// Wraps plain text in an escaped paragraph.
    #[must_use]
    pub fn text_paragraph(class: &str, text: &str) -> Self {
        Self(format!(
            "<p class=\"{}\">{}</p>",
            HtmlEscape(class),
            HtmlEscape(text)
        ))
    }

    /// Borrow the HTML.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the fragment, returning the HTML.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HtmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders fetched content into line-numbered panels.
#[derive(Debug)]
pub struct FileViewRenderer {
    env: Environment<'static>,
    catalog: MessageCatalog,
}

impl FileViewRenderer {
    /// Creates a renderer that takes its messages from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Template`] if a compiled-in template fails to
    /// parse.
    pub fn new(catalog: MessageCatalog) -> Result<Self, ReviewError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|error| ReviewError::Template {
                    message: format!("invalid template {name}: {error}"),
                })?;
        }
        Ok(Self { env, catalog })
    }

    /// The catalog messages are drawn from.
    #[must_use]
    pub const fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Renders fetched content according to its kind.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MalformedResponse`] for implausible line
    /// counts, and [`ReviewError::Template`] when rendering fails.
    pub fn render_content(&self, content: &FetchedContent) -> Result<HtmlFragment, ReviewError> {
        match content {
            FetchedContent::File(file) => self.render_file(file),
            FetchedContent::Diff(diff) => self.render_diff(diff.as_ref()),
        }
    }

    /// Wraps file HTML in a table with a line-number gutter.
    ///
    /// The gutter holds one `<span rel="L{n}">` per line for `1..=num_lines`
    /// and is omitted entirely when `num_lines` is zero.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MalformedResponse`] when `num_lines` exceeds
    /// [`MAX_GUTTER_LINES`], and [`ReviewError::Template`] when rendering
    /// fails.
    pub fn render_file(&self, content: &FileContent) -> Result<HtmlFragment, ReviewError> {
        if content.num_lines > MAX_GUTTER_LINES {
            return Err(ReviewError::MalformedResponse {
                message: format!(
                    "file claims {} lines; at most {MAX_GUTTER_LINES} are numbered",
                    content.num_lines
                ),
            });
        }
        let line_numbers: Vec<u32> = (1..=content.num_lines).collect();
        self.render_template(
            FILE_VIEW_TEMPLATE,
            context! {
                line_numbers => line_numbers,
                html => content.html.as_str(),
            },
        )
    }

    /// Renders old and new versions side by side, or the no-changes
    /// message when `diff` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MalformedResponse`] when either side has too
    /// many lines, and [`ReviewError::Template`] when rendering fails.
    pub fn render_diff(&self, diff: Option<&FileDiff>) -> Result<HtmlFragment, ReviewError> {
        let Some(pair) = diff else {
            let message = self.catalog.render(REVIEW_AREA, "no_changes", context! {})?;
            return self.render_template(
                NO_CHANGES_TEMPLATE,
                context! { message => message.as_str() },
            );
        };

        let old = self.render_file(&pair.old)?;
        let new = self.render_file(&pair.new)?;
        self.render_template(
            DIFF_VIEW_TEMPLATE,
            context! { old => old.as_str(), new => new.as_str() },
        )
    }

    /// Renders an inline failure message for `subject`.
    ///
    /// Never fails: if the catalog or template cannot be rendered, the error
    /// text is escaped into a plain paragraph instead.
    #[must_use]
    pub fn render_failure(&self, subject: &str, error: &ReviewError) -> HtmlFragment {
        let message = self.failure_message(subject, error);
        self.render_template(
            FAILURE_TEMPLATE,
            context! {
                category => error.category(),
                message => message.as_str(),
            },
        )
        .unwrap_or_else(|render_error| {
            tracing::warn!("failure panel fell back to plain text: {render_error}");
            HtmlFragment::text_paragraph("reviewerror", &message)
        })
    }

    /// Catalog text describing `error` for `subject`, falling back to the
    /// error's own description.
    #[must_use]
    pub fn failure_message(&self, subject: &str, error: &ReviewError) -> String {
        let status = match error {
            ReviewError::Server { status, .. } => Some(*status),
            _ => None,
        };
        self.catalog
            .render(
                REVIEW_AREA,
                error.message_key(),
                context! {
                    subject => subject,
                    filename => subject,
                    status => status,
                },
            )
            .unwrap_or_else(|render_error| {
                tracing::warn!("failure message fell back to error text: {render_error}");
                error.to_string()
            })
    }

    /// Renders a `review` area message, falling back to the key on failure.
    #[must_use]
    pub fn message<S: Serialize>(&self, key: &str, context: S) -> String {
        self.catalog
            .render(REVIEW_AREA, key, context)
            .unwrap_or_else(|error| {
                tracing::warn!("message {key} fell back to its key: {error}");
                key.to_owned()
            })
    }

    /// Renders the widget projection.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Template`] when rendering fails.
    pub fn render_widget(&self, view: &WidgetView) -> Result<HtmlFragment, ReviewError> {
        self.render_template(WIDGET_TEMPLATE, view)
    }

    /// Wraps a rendered widget into a standalone HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Template`] when rendering fails.
    pub fn render_page(
        &self,
        title: &str,
        widget: &HtmlFragment,
        generated_at: &str,
    ) -> Result<HtmlFragment, ReviewError> {
        self.render_template(
            PAGE_TEMPLATE,
            context! {
                title => title,
                widget => widget.as_str(),
                generated_at => generated_at,
            },
        )
    }

    fn render_template<S: Serialize>(
        &self,
        name: &str,
        context: S,
    ) -> Result<HtmlFragment, ReviewError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|error| ReviewError::Template {
                message: format!("failed to retrieve template {name}: {error}"),
            })?;

        template
            .render(context)
            .map(HtmlFragment::from_rendered)
            .map_err(|error| ReviewError::Template {
                message: format!("template {name} failed to render: {error}"),
            })
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
