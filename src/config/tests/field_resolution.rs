//! Tests for item, locator, and mode resolution.

use std::time::Duration;

use rstest::rstest;

use crate::ReviewifyConfig;
use crate::review::ReviewError;
use crate::widget::ViewMode;

#[rstest]
fn require_item_reports_missing_identifier() {
    let config = ReviewifyConfig::default();

    assert_eq!(config.require_item(), Err(ReviewError::MissingItem));
}

#[rstest]
#[case::blank("   ")]
#[case::path_separator("12/34")]
fn require_item_rejects_unusable_identifiers(#[case] pk: &str) {
    let config = ReviewifyConfig {
        pk: Some(pk.to_owned()),
        ..ReviewifyConfig::default()
    };

    assert!(config.require_item().is_err(), "{pk:?} should be rejected");
}

#[rstest]
fn locator_uses_configured_base_url() {
    let config = ReviewifyConfig {
        pk: Some("1234".to_owned()),
        base_url: "https://review.example.org/review/ajax".to_owned(),
        ..ReviewifyConfig::default()
    };

    let locator = config.locator().expect("locator should build");
    let url = locator.file_list_url(false).expect("url should build");

    assert_eq!(
        url.as_str(),
        "https://review.example.org/review/ajax/get-file-list/1234?disallow_binary=false"
    );
}

#[rstest]
fn locator_rejects_unparseable_base_url() {
    let config = ReviewifyConfig {
        pk: Some("1234".to_owned()),
        base_url: "not a url".to_owned(),
        ..ReviewifyConfig::default()
    };

    assert!(matches!(config.locator(), Err(ReviewError::InvalidUrl(_))));
}

#[rstest]
#[case::file_mode(false, ViewMode::File)]
#[case::diff_mode(true, ViewMode::Diff)]
fn view_mode_follows_diff_flag(#[case] diff: bool, #[case] expected: ViewMode) {
    let config = ReviewifyConfig {
        diff,
        ..ReviewifyConfig::default()
    };

    assert_eq!(config.view_mode(), expected);
}

#[rstest]
fn request_timeout_is_in_seconds() {
    let config = ReviewifyConfig {
        request_timeout_seconds: 3,
        ..ReviewifyConfig::default()
    };

    assert_eq!(config.request_timeout(), Duration::from_secs(3));
}

#[rstest]
fn paths_are_exposed_as_utf8() {
    let config = ReviewifyConfig {
        output: Some("out/review.html".to_owned()),
        messages_path: Some("messages.json".to_owned()),
        ..ReviewifyConfig::default()
    };

    assert_eq!(
        config.output_path().map(camino::Utf8Path::as_str),
        Some("out/review.html")
    );
    assert_eq!(
        config.messages_path().map(camino::Utf8Path::as_str),
        Some("messages.json")
    );
}
