//! Mock implementations for external dependencies
//! This module contains mock objects used for testing

use std::path::PathBuf;

use async_trait::async_trait;
use mockall::mock;
use tunelookup::youtube::media_resolver::ResolverResult;
use tunelookup::{MediaResolver, youtube::DownloadRequest};

// Mock media resolver for counting stream/download invocations
mock! {
    pub Resolver {}

    #[async_trait]
    impl MediaResolver for Resolver {
        async fn extract_stream_url(&self, link: &str, max_height: u32) -> ResolverResult<String>;
        async fn download(&self, link: &str, request: &DownloadRequest) -> ResolverResult<PathBuf>;
    }
}

/// A resolver that must never be called
pub fn idle_resolver() -> MockResolver {
    let mut mock = MockResolver::new();
    mock.expect_extract_stream_url().never();
    mock.expect_download().never();
    mock
}

/// A resolver whose downloads write a small file at the requested path
pub fn writing_resolver(times: usize) -> MockResolver {
    let mut mock = MockResolver::new();
    mock.expect_download()
        .times(times)
        .returning(|_, request| {
            std::fs::write(&request.expected_path, b"media").unwrap();
            Ok(request.expected_path.clone())
        });
    mock
}
