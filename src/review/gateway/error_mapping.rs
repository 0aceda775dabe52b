//! Error mapping helpers for the HTTP review gateway.

use http::StatusCode;

use crate::review::error::ReviewError;

const MAX_BODY_CHARS: usize = 160;

/// What a request was fetching, used to name the missing thing on a 404.
#[derive(Debug, Clone, Copy)]
pub(super) enum Resource<'a> {
    FileList { item: &'a str },
    File { filename: &'a str },
}

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ReviewError {
    let kind = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "could not connect"
    } else {
        "failed"
    };
    ReviewError::Network {
        message: format!("{operation} {kind}: {error}"),
    }
}

pub(super) fn map_status(resource: Resource<'_>, status: StatusCode, body: &str) -> ReviewError {
    if status == StatusCode::NOT_FOUND {
        return match resource {
            Resource::FileList { item } => ReviewError::ItemNotFound {
                item: item.to_owned(),
            },
            Resource::File { filename } => ReviewError::FileNotFound {
                filename: filename.to_owned(),
            },
        };
    }

    ReviewError::Server {
        status: status.as_u16(),
        message: truncate_for_message(body.trim(), MAX_BODY_CHARS),
    }
}

pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> ReviewError {
    ReviewError::MalformedResponse {
        message: format!("{operation} response could not be decoded: {error}"),
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
