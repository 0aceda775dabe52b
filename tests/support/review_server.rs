//! Wiremock helpers standing in for the review backend's AJAX endpoints.

use reviewify::{ItemId, ReviewError, ReviewLocator};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix the endpoints are mounted under.
pub const AJAX_PATH: &str = "/review/ajax";

/// Builds a locator pointing at the mock server.
///
/// # Errors
///
/// Returns an error when the item identifier is unusable.
pub fn locator(server: &MockServer, item: &str) -> Result<ReviewLocator, ReviewError> {
    ReviewLocator::new(&format!("{}{AJAX_PATH}", server.uri()), ItemId::new(item)?)
}

fn endpoint(name: &str, item: &str) -> String {
    format!("{AJAX_PATH}/{name}/{item}")
}

/// Lists `files` as unchanged files of `item`.
pub async fn mount_file_list(server: &MockServer, item: &str, files: &[&str]) {
    Mock::given(method("GET"))
        .and(path(endpoint("get-file-list", item)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "both": files,
            "added": [],
            "deleted": []
        })))
        .mount(server)
        .await;
}

/// Serves `filename` with `num_lines` lines of highlighted markup.
pub async fn mount_file(server: &MockServer, item: &str, filename: &str, num_lines: u32) {
    let html: String = (1..=num_lines)
        .map(|line| format!("<span class=\"line\">line {line}</span>\n"))
        .collect();
    Mock::given(method("GET"))
        .and(path(endpoint("get-file", item)))
        .and(query_param("filename", filename))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html": html,
            "num_lines": num_lines
        })))
        .mount(server)
        .await;
}

/// Serves a `null` diff, meaning `filename` is unchanged.
pub async fn mount_null_diff(server: &MockServer, item: &str, filename: &str) {
    Mock::given(method("GET"))
        .and(path(endpoint("get-file-diff", item)))
        .and(query_param("filename", filename))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .mount(server)
        .await;
}

/// Overrides the response for one file on `endpoint_name`.
///
/// The override takes precedence over mocks mounted with
/// [`mount_file`] or [`mount_null_diff`].
pub async fn mount_file_override(
    server: &MockServer,
    endpoint_name: &str,
    item: &str,
    filename: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path(endpoint(endpoint_name, item)))
        .and(query_param("filename", filename))
        .respond_with(response)
        .with_priority(1)
        .mount(server)
        .await;
}

/// Answers every request for `endpoint_name` of `item` with `response`.
pub async fn mount_endpoint(
    server: &MockServer,
    endpoint_name: &str,
    item: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path(endpoint(endpoint_name, item)))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Counts requests received for `filename` on `endpoint_name`.
pub async fn requests_for(server: &MockServer, endpoint_name: &str, filename: &str) -> usize {
    let suffix = format!("/{endpoint_name}/");
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path().contains(&suffix))
        .filter(|request| {
            request
                .url
                .query_pairs()
                .any(|(key, value)| key == "filename" && value == filename)
        })
        .count()
}
