//! Localised message catalog keyed by feature area.
//!
//! The catalog is a two-level JSON object: feature area (`paginator`,
//! `messages`, `upgrade`, `extensions`, `review`) to message key to message
//! text. Message text may contain `{{placeholder}}` tokens which are
//! substituted with `minijinja` in strict mode, so a missing value is an error
//! rather than an empty string.
//!
//! A catalog file can override individual messages of the built-in catalog:
//!
//! ```json
//! { "review": { "no_changes": "Nothing changed here." } }
//! ```

use std::collections::BTreeMap;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use minijinja::{Environment, UndefinedBehavior};
use serde::{Deserialize, Serialize};

use crate::review::ReviewError;

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Feature area holding the widget's own strings.
pub const REVIEW_AREA: &str = "review";

/// Message strings grouped by feature area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    areas: BTreeMap<String, BTreeMap<String, String>>,
}

impl MessageCatalog {
    /// Parses the catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] if the embedded catalog is not
    /// valid JSON of the expected shape.
    pub fn builtin() -> Result<Self, ReviewError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when the text is not an object
    /// of string-valued objects.
    pub fn from_json(json: &str) -> Result<Self, ReviewError> {
        serde_json::from_str(json).map_err(|error| ReviewError::Configuration {
            message: format!("invalid message catalog: {error}"),
        })
    }

    /// Loads the built-in catalog, overlaid with the file at `path` when
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Io`] when the file cannot be read and
    /// [`ReviewError::Configuration`] when it cannot be parsed.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ReviewError> {
        let mut catalog = Self::builtin()?;
        if let Some(override_path) = path {
            let overrides = Self::from_json(&read_catalog_file(override_path)?)?;
            catalog.overlay(overrides);
        }
        Ok(catalog)
    }

    /// Replaces messages with those present in `other`, keeping the rest.
    pub fn overlay(&mut self, other: Self) {
        for (area, messages) in other.areas {
            self.areas.entry(area).or_default().extend(messages);
        }
    }

    /// Returns the raw message text, placeholders untouched.
    #[must_use]
    pub fn lookup(&self, area: &str, key: &str) -> Option<&str> {
        self.areas
            .get(area)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }

    /// Returns true when the area exists, even if it holds no messages.
    #[must_use]
    pub fn has_area(&self, area: &str) -> bool {
        self.areas.contains_key(area)
    }

    /// Substitutes placeholders in a message.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Template`] when the message is unknown, has
    /// invalid syntax, or uses a placeholder `context` does not provide.
    pub fn render<S: Serialize>(
        &self,
        area: &str,
        key: &str,
        context: S,
    ) -> Result<String, ReviewError> {
        let source = self
            .lookup(area, key)
            .ok_or_else(|| ReviewError::Template {
                message: format!("unknown message {area}.{key}"),
            })?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.render_str(source, context)
            .map_err(|error| ReviewError::Template {
                message: format!("message {area}.{key} failed to render: {error}"),
            })
    }
}

fn read_catalog_file(path: &Utf8Path) -> Result<String, ReviewError> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| ReviewError::Io {
        message: format!("invalid catalog path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        ReviewError::Io {
            message: format!("failed to open catalog directory '{parent}': {error}"),
        }
    })?;

    dir.read_to_string(file_name)
        .map_err(|error| ReviewError::Io {
            message: format!("failed to read message catalog '{path}': {error}"),
        })
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use minijinja::context;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn catalog() -> MessageCatalog {
        MessageCatalog::builtin().expect("built-in catalog should parse")
    }

    #[rstest]
    #[case::paginator("paginator")]
    #[case::messages("messages")]
    #[case::upgrade("upgrade")]
    #[case::extensions("extensions")]
    #[case::review("review")]
    fn builtin_catalog_has_feature_areas(catalog: MessageCatalog, #[case] area: &str) {
        assert!(catalog.has_area(area), "missing area {area}");
    }

    #[rstest]
    fn render_substitutes_placeholders(catalog: MessageCatalog) {
        let message = catalog
            .render(
                "upgrade",
                "need_upgrade",
                context! {
                    current_version => 3,
                    extension_name => "Dash to Dock",
                    latest_version => 5,
                },
            )
            .expect("upgrade message should render");

        assert_eq!(
            message,
            "You have version 3 of \"Dash to Dock\". The latest version is version 5. \
             Click here to upgrade."
        );
    }

    #[rstest]
    fn render_rejects_missing_placeholders(catalog: MessageCatalog) {
        let result = catalog.render(
            "upgrade",
            "latest_version",
            context! { current_version => 1 },
        );

        assert!(
            matches!(result, Err(ReviewError::Template { .. })),
            "expected a template error, got {result:?}"
        );
    }

    #[rstest]
    fn render_rejects_unknown_keys(catalog: MessageCatalog) {
        let result = catalog.render("review", "does_not_exist", context! {});

        assert_eq!(
            result,
            Err(ReviewError::Template {
                message: "unknown message review.does_not_exist".to_owned()
            })
        );
    }

    #[rstest]
    fn messages_without_placeholders_render_verbatim(catalog: MessageCatalog) {
        let message = catalog
            .render("review", "no_changes", context! {})
            .expect("no-changes message should render");

        assert_eq!(message, "There have been no changes in this file.");
    }

    #[rstest]
    fn overlay_replaces_only_given_messages(mut catalog: MessageCatalog) {
        let overrides = MessageCatalog::from_json(r#"{"review": {"no_changes": "Unchanged."}}"#)
            .expect("override should parse");

        catalog.overlay(overrides);

        assert_eq!(catalog.lookup("review", "no_changes"), Some("Unchanged."));
        assert!(catalog.lookup("review", "empty_file_list").is_some());
    }

    #[rstest]
    fn non_string_messages_are_rejected() {
        let result = MessageCatalog::from_json(r#"{"review": {"no_changes": 3}}"#);

        assert!(matches!(result, Err(ReviewError::Configuration { .. })));
    }

    #[rstest]
    fn load_overlays_catalog_file() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("messages.json"))
            .expect("temporary path should be UTF-8");
        std::fs::write(&path, r#"{"extensions": {"title": "Extensions"}}"#)
            .expect("catalog file should be written");

        let catalog = MessageCatalog::load(Some(&path)).expect("catalog should load");

        assert_eq!(catalog.lookup("extensions", "title"), Some("Extensions"));
        assert!(catalog.lookup("paginator", "loading_page").is_some());
    }

    #[rstest]
    fn load_reports_missing_files() {
        let result = MessageCatalog::load(Some(Utf8Path::new("does-not-exist/messages.json")));

        assert!(matches!(result, Err(ReviewError::Io { .. })));
    }
}
