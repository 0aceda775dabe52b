//! Renders the review widget for one upload as a standalone HTML page.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reviewify::{
    FileViewRenderer, HtmlFragment, HttpReviewGateway, MessageCatalog, ReviewError,
    ReviewGateway, ReviewLocator, ReviewWidget, ReviewifyConfig, ViewMode,
};

use super::output::write_page;

/// Loads the upload's files and writes the rendered page.
///
/// # Errors
///
/// Returns an error if:
/// - The item identifier or base URL is missing or invalid
/// - The message catalog override cannot be read
/// - The HTTP client cannot be built
/// - Writing to the output fails
///
/// Backend failures while listing or fetching files are rendered into the
/// page instead.
pub async fn run(config: &ReviewifyConfig) -> Result<(), ReviewError> {
    let locator = config.locator()?;
    let catalog = MessageCatalog::load(config.messages_path())?;
    let renderer = FileViewRenderer::new(catalog)?;
    let gateway = Arc::new(HttpReviewGateway::with_timeout(config.request_timeout())?);

    let request = PageRequest {
        mode: config.view_mode(),
        file: config.file.as_deref(),
        generated_at: Utc::now(),
    };
    let page = render_review_page(gateway, locator, renderer, &request).await?;

    write_page(config.output_path(), &page)
}

/// What to render.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    /// File or diff mode.
    pub mode: ViewMode,
    /// File to show instead of the first one.
    pub file: Option<&'a str>,
    /// Timestamp printed in the page footer.
    pub generated_at: DateTime<Utc>,
}

/// Drives a widget until every fetch settles and renders the page.
///
/// # Errors
///
/// Returns [`ReviewError::Template`] when the page cannot be rendered.
pub async fn render_review_page<G>(
    gateway: Arc<G>,
    locator: ReviewLocator,
    renderer: FileViewRenderer,
    request: &PageRequest<'_>,
) -> Result<HtmlFragment, ReviewError>
where
    G: ReviewGateway + 'static,
{
    let mut widget = ReviewWidget::new(gateway, locator, request.mode, renderer);
    widget.load_preferring(request.file).await;
    widget.settle().await;
    widget.finish_transition();

    let fragment = widget.render()?;
    let title = format!("Files in upload {}", widget.locator().item());
    widget
        .renderer()
        .render_page(&title, &fragment, &request.generated_at.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use reviewify::ItemId;
    use rstest::{fixture, rstest};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[fixture]
    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn renderer() -> FileViewRenderer {
        let catalog = MessageCatalog::builtin().expect("built-in catalog should parse");
        FileViewRenderer::new(catalog).expect("templates should compile")
    }

    async fn mount_listing(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/review/ajax/get-file-list/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "both": ["extension.js", "metadata.json"],
                "added": [],
                "deleted": []
            })))
            .mount(server)
            .await;
    }

    async fn mount_file(server: &MockServer, filename: &str, expected_requests: u64) {
        Mock::given(method("GET"))
            .and(path("/review/ajax/get-file/8"))
            .and(query_param("filename", filename))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "html": format!("<pre>{filename}</pre>"),
                "num_lines": 1
            })))
            .expect(expected_requests)
            .mount(server)
            .await;
    }

    fn gateway() -> HttpReviewGateway {
        HttpReviewGateway::with_timeout(reviewify::DEFAULT_TIMEOUT).expect("client should build")
    }

    fn locator(server: &MockServer) -> ReviewLocator {
        let item = ItemId::new("8").expect("valid item");
        ReviewLocator::new(&format!("{}/review/ajax", server.uri()), item).expect("valid base")
    }

    #[rstest]
    #[tokio::test]
    async fn page_shows_requested_file(generated_at: DateTime<Utc>) {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        mount_file(&server, "extension.js", 0).await;
        mount_file(&server, "metadata.json", 1).await;

        let gateway = Arc::new(gateway());
        let request = PageRequest {
            mode: ViewMode::File,
            file: Some("metadata.json"),
            generated_at,
        };

        let page = render_review_page(gateway, locator(&server), renderer(), &request)
            .await
            .expect("page should render");
        let html = page.as_str();

        assert!(html.contains("<title>Files in upload 8</title>"), "{html}");
        assert!(html.contains(
            "<a class=\"both fileselector selected\" data-filename=\"metadata.json\">"
        ));
        assert!(html.contains(
            "<div class=\"panel shown\" data-filename=\"metadata.json\" style=\"position: relative\">"
        ));
        assert!(html.contains("Generated 2024-05-01T12:00:00+00:00"));
        assert!(!html.contains("<pre>extension.js</pre>"));
        server.verify().await;
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_requested_file_falls_back_to_first(generated_at: DateTime<Utc>) {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        mount_file(&server, "extension.js", 1).await;

        let gateway = Arc::new(gateway());
        let request = PageRequest {
            mode: ViewMode::File,
            file: Some("missing.js"),
            generated_at,
        };

        let page = render_review_page(gateway, locator(&server), renderer(), &request)
            .await
            .expect("page should render");

        assert!(page.as_str().contains(
            "<a class=\"both fileselector selected\" data-filename=\"extension.js\">"
        ));
    }
}
