//! Common test utilities, fixtures, and mocks
//! This module contains shared functionality used across different test categories

pub mod fixtures;
pub mod mocks;

use std::path::Path;
use std::sync::Arc;

use reqwest::Client;
use tunelookup::{MediaResolver, VideoLookupClient, youtube::YoutubeDataApi};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Builds a lookup client whose Data API points at the mock server.
pub fn client_for(
    server: &MockServer,
    api_key: &str,
    resolver: Arc<dyn MediaResolver>,
    download_dir: &Path,
) -> VideoLookupClient {
    let provider = YoutubeDataApi::with_client(Client::new(), &server.uri(), api_key);
    VideoLookupClient::new(Arc::new(provider), resolver, download_dir)
}
