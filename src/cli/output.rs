//! Writing the rendered page to stdout or a file.

use std::io::{self, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use reviewify::{HtmlFragment, ReviewError};

/// Writes the page to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when the destination cannot be written.
pub fn write_page(path: Option<&Utf8Path>, page: &HtmlFragment) -> Result<(), ReviewError> {
    match path {
        Some(path) => write_page_file(path, page),
        None => {
            let mut stdout = io::stdout().lock();
            write_page_to(&mut stdout, page)
        }
    }
}

/// Writes the page to the given writer.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when writing or flushing fails.
pub fn write_page_to<W: Write>(writer: &mut W, page: &HtmlFragment) -> Result<(), ReviewError> {
    writeln!(writer, "{page}").map_err(|e| io_error(&e))?;
    writer.flush().map_err(|e| io_error(&e))
}

fn write_page_file(path: &Utf8Path, page: &HtmlFragment) -> Result<(), ReviewError> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| ReviewError::Io {
        message: format!("invalid output path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        ReviewError::Io {
            message: format!("failed to open output directory '{parent}': {error}"),
        }
    })?;

    dir.write(file_name, page.as_str())
        .map_err(|error| ReviewError::Io {
            message: format!("failed to write output file '{path}': {error}"),
        })
}

/// Converts an I/O error to a [`ReviewError::Io`].
fn io_error(error: &io::Error) -> ReviewError {
    ReviewError::Io {
        message: error.to_string(),
    }
}
