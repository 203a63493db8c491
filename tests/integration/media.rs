//! Stream URL resolution and downloads through the media resolver

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use tunelookup::{MediaKind, ResolverError};
use wiremock::MockServer;

use crate::common::fixtures::*;
use crate::common::mocks::{MockResolver, writing_resolver};
use crate::common::{TEST_API_KEY, client_for};
use crate::test_utils;

#[tokio::test]
async fn second_download_reuses_existing_file() {
    test_utils::init();
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let client = client_for(&server, TEST_API_KEY, Arc::new(writing_resolver(1)), dir.path());

    let first = client.download_media(RICK_SHORT_LINK, false).await;
    let second = client.download_media(RICK_SHORT_LINK, false).await;

    let expected = dir.path().join("dQw4w9WgXcQ.mp3");
    assert!(first.ready);
    assert_eq!(first.path.as_ref(), Some(&expected));
    assert_eq!(second, first);
}

#[tokio::test]
async fn existing_file_skips_resolver() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let existing = dir.path().join("dQw4w9WgXcQ.mp4");
    std::fs::write(&existing, b"cached").unwrap();

    let client = client_for(&server, TEST_API_KEY, Arc::new(writing_resolver(0)), dir.path());
    let result = client.download_media(RICK_ID, true).await;

    assert!(result.ready);
    assert_eq!(result.path, Some(existing));
}

#[tokio::test]
async fn shared_watch_link_downloads_under_video_id() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let client = client_for(&server, TEST_API_KEY, Arc::new(writing_resolver(1)), dir.path());
    let result = client
        .download_media(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&feature=youtu.be",
            false,
        )
        .await;

    assert!(result.ready);
    assert_eq!(result.path, Some(dir.path().join("dQw4w9WgXcQ.mp3")));
}

#[tokio::test]
async fn video_download_requests_mp4_within_height_cap() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let expected = dir.path().join("dQw4w9WgXcQ.mp4");

    let mut resolver = MockResolver::new();
    resolver
        .expect_download()
        .withf(|link, request| {
            link.contains("dQw4w9WgXcQ")
                && request.kind == MediaKind::Video
                && request.max_height == 480
                && request.expected_path.ends_with("dQw4w9WgXcQ.mp4")
        })
        .times(1)
        .returning(|_, request| {
            std::fs::write(&request.expected_path, b"video").unwrap();
            Ok(request.expected_path.clone())
        });

    let client = client_for(&server, TEST_API_KEY, Arc::new(resolver), dir.path())
        .with_max_height(480);
    let result = client
        .download_media("https://www.youtube.com/watch?v=dQw4w9WgXcQ", true)
        .await;

    assert!(result.ready);
    assert_eq!(result.path, Some(expected));
}

#[tokio::test]
async fn download_creates_missing_directory() {
    let server = MockServer::start().await;
    let root = tempdir().unwrap();
    let nested = root.path().join("cache").join("downloads");

    let client = client_for(&server, TEST_API_KEY, Arc::new(writing_resolver(1)), &nested);
    let result = client.download_media(RICK_SHORT_LINK, false).await;

    assert!(result.ready);
    assert!(nested.join("dQw4w9WgXcQ.mp3").exists());
}

#[tokio::test]
async fn failed_download_is_reported_not_raised() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let mut resolver = MockResolver::new();
    resolver
        .expect_download()
        .times(1)
        .returning(|_, _| Err(ResolverError::Failed("ERROR: Video unavailable".into())));

    let client = client_for(&server, TEST_API_KEY, Arc::new(resolver), dir.path());
    let result = client.download_media(RICK_SHORT_LINK, false).await;

    assert!(!result.ready);
    assert_eq!(result.path, None);
}

#[tokio::test]
async fn search_text_downloads_under_temp_name() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let mut resolver = MockResolver::new();
    resolver
        .expect_download()
        .withf(|link, request| {
            link == "some song name"
                && request
                    .expected_path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("temp_") && name.ends_with(".mp3"))
        })
        .times(1)
        .returning(|_, request| Ok(request.expected_path.clone()));

    let client = client_for(&server, TEST_API_KEY, Arc::new(resolver), dir.path());
    let result = client.download_media("some song name", false).await;

    assert!(result.ready);
}

#[tokio::test]
async fn stream_url_expands_bare_id_and_applies_cap() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let mut resolver = MockResolver::new();
    resolver
        .expect_extract_stream_url()
        .withf(|link, max_height| {
            link == "https://www.youtube.com/watch?v=dQw4w9WgXcQ" && *max_height == 720
        })
        .times(1)
        .returning(|_, _| Ok("https://rr1.googlevideo.com/videoplayback?id=1".to_string()));

    let client = client_for(&server, TEST_API_KEY, Arc::new(resolver), dir.path());
    let url = client.resolve_stream_url(RICK_ID).await.unwrap();

    assert_eq!(url, "https://rr1.googlevideo.com/videoplayback?id=1");
}

#[tokio::test]
async fn stream_failure_carries_user_facing_message() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let mut resolver = MockResolver::new();
    resolver
        .expect_extract_stream_url()
        .times(1)
        .returning(|_, _| Err(ResolverError::Failed("Sign in to confirm your age".into())));

    let client = client_for(&server, TEST_API_KEY, Arc::new(resolver), dir.path());
    let err = client.resolve_stream_url(RICK_SHORT_LINK).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Media resolver failed: Sign in to confirm your age"
    );
}

#[tokio::test]
async fn exists_and_resolve_locator_need_no_network() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let client = client_for(&server, TEST_API_KEY, Arc::new(MockResolver::new()), dir.path());

    assert!(client.exists(RICK_SHORT_LINK));
    assert!(!client.exists("Arijit Singh Tum Hi Ho"));
    assert_eq!(client.resolve_locator(RICK_SHORT_LINK).as_deref(), Some(RICK_ID));
    assert_eq!(client.download_dir(), dir.path());
}
