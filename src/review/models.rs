//! Data models for file listings, file contents and diffs.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use serde::Deserialize;

/// How a file relates to the previous upload of the same item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileCategory {
    /// Present in both the previous and the current upload.
    Both,
    /// Only present in the current upload.
    Added,
    /// Only present in the previous upload.
    Deleted,
}

impl FileCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Both, Self::Added, Self::Deleted];

    /// CSS class used for selectors of this category.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Added => "added",
            Self::Deleted => "deleted",
        }
    }
}

/// A filename tagged with its category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileDescriptor {
    /// Path of the file inside the upload.
    pub filename: String,
    /// Category the backend placed the file in.
    pub category: FileCategory,
}

impl FileDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(filename: impl Into<String>, category: FileCategory) -> Self {
        Self {
            filename: filename.into(),
            category,
        }
    }
}

/// Reviewable files of one item, partitioned by category.
///
/// Arrays missing from the response are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileList {
    /// Files present in both uploads.
    #[serde(default)]
    pub both: Vec<String>,
    /// Files added by the current upload.
    #[serde(default)]
    pub added: Vec<String>,
    /// Files removed by the current upload.
    #[serde(default)]
    pub deleted: Vec<String>,
}

impl FileList {
    /// Filenames of one category in server order.
    #[must_use]
    pub fn files(&self, category: FileCategory) -> &[String] {
        match category {
            FileCategory::Both => &self.both,
            FileCategory::Added => &self.added,
            FileCategory::Deleted => &self.deleted,
        }
    }

    /// Flattens the list into descriptors ordered both, added, deleted.
    #[must_use]
    pub fn descriptors(&self) -> Vec<FileDescriptor> {
        FileCategory::ALL
            .into_iter()
            .flat_map(|category| {
                self.files(category)
                    .iter()
                    .map(move |filename| FileDescriptor::new(filename.as_str(), category))
            })
            .collect()
    }

    /// Total number of files across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.both.len() + self.added.len() + self.deleted.len()
    }

    /// Returns true when no category holds a file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Highlighted content of one file version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ApiFileContent")]
pub struct FileContent {
    /// Server-rendered HTML, inserted verbatim.
    pub html: String,
    /// Number of lines to number in the gutter. Zero suppresses the gutter.
    pub num_lines: u32,
}

impl FileContent {
    /// Creates file content.
    #[must_use]
    pub fn new(html: impl Into<String>, num_lines: u32) -> Self {
        Self {
            html: html.into(),
            num_lines,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiFileContent {
    html: String,
    #[serde(default)]
    num_lines: Option<u32>,
}

impl From<ApiFileContent> for FileContent {
    fn from(api: ApiFileContent) -> Self {
        Self {
            html: api.html,
            num_lines: api.num_lines.unwrap_or(0),
        }
    }
}

/// Old and new versions of a changed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileDiff {
    /// Version from the previous upload.
    pub old: FileContent,
    /// Version from the current upload.
    pub new: FileContent,
}

/// Content fetched for one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedContent {
    /// A single file version.
    File(FileContent),
    /// A diff pair, or `None` when the file did not change.
    Diff(Option<FileDiff>),
}
