//! Client for the YouTube Data API v3 (`search`, `videos`, `playlistItems`).

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::Config;
use crate::error::ApiError;

/// Preferred thumbnail sizes, largest first.
const THUMBNAIL_PREFERENCE: [&str; 5] = ["maxres", "standard", "high", "medium", "default"];

/// Source of search results and per-video metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Free-text video search, returning at most `max_results` items.
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchItem>, ApiError>;

    /// Full details (snippet, duration, statistics) for one video ID.
    async fn videos(&self, video_id: &str) -> Result<Vec<VideoItem>, ApiError>;

    /// The first `max_results` entries of a playlist, in playlist order.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<PlaylistItem>, ApiError>;
}

/// Envelope shared by every list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub thumbnails: HashMap<String, Thumbnail>,
}

impl Snippet {
    /// The URL of the highest-resolution thumbnail present, if any.
    pub fn best_thumbnail(&self) -> Option<String> {
        THUMBNAIL_PREFERENCE
            .iter()
            .find_map(|size| self.thumbnails.get(*size))
            .map(|thumb| thumb.url.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchId {
    /// Absent for channel or playlist hits.
    #[serde(default)]
    pub video_id: Option<String>,
}

/// One `search` hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchItem {
    pub id: SearchId,
    #[serde(default)]
    pub snippet: Snippet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentDetails {
    /// ISO-8601 duration, e.g. `PT4M30S`.
    #[serde(default)]
    pub duration: Option<String>,
}

/// Counts arrive as decimal strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub like_count: Option<String>,
}

/// One `videos` item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: Snippet,
    #[serde(default)]
    pub content_details: ContentDetails,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

impl VideoItem {
    /// View count, if the `statistics` part was returned and is numeric.
    pub fn view_count(&self) -> Option<u64> {
        self.statistics
            .as_ref()
            .and_then(|s| s.view_count.as_deref())
            .and_then(|v| v.parse().ok())
    }

    /// Like count; hidden like counts are `None`.
    pub fn like_count(&self) -> Option<u64> {
        self.statistics
            .as_ref()
            .and_then(|s| s.like_count.as_deref())
            .and_then(|v| v.parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    pub resource_id: ResourceId,
}

/// One `playlistItems` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistItem {
    pub snippet: PlaylistSnippet,
}

impl PlaylistItem {
    /// The video this entry points at. Deleted or private entries may have none.
    pub fn video_id(&self) -> Option<&str> {
        self.snippet.resource_id.video_id.as_deref()
    }
}

/// [`MetadataProvider`] backed by the public REST API.
///
/// Holds a pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct YoutubeDataApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YoutubeDataApi {
    /// Builds the API client from config, applying the per-request timeout.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(
            client,
            &config.api_base_url,
            &config.youtube_api_key,
        ))
    }

    /// Uses an existing HTTP client, e.g. one shared with the rest of the bot.
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to send requests with.
    /// * `base_url` - The API root, e.g. `https://www.googleapis.com/youtube/v3`.
    /// * `api_key` - The Data API key. Empty means every request fails with `MissingApiKey`.
    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        if api_key.is_empty() {
            error!("YT_API_KEY is not configured! YouTube lookups will not work.");
        }
        Self {
            client,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        if self.api_key.is_empty() {
            error!(endpoint, "Refusing to call YouTube API without an API key");
            return Err(ApiError::MissingApiKey);
        }

        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, ?params, "Requesting YouTube API");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Error connecting to YouTube API: {}", e);
                ApiError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Cannot read response".to_string());
            error!(endpoint, %status, "YouTube API returned an error");
            return Err(ApiError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let parsed: ListResponse<T> = serde_json::from_slice(&bytes).map_err(|e| {
            error!(endpoint, "Error processing data from YouTube API: {}", e);
            ApiError::Decode(e)
        })?;

        debug!(endpoint, items = parsed.items.len(), "YouTube API responded");
        Ok(parsed.items)
    }
}

#[async_trait]
impl MetadataProvider for YoutubeDataApi {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchItem>, ApiError> {
        let params = [
            ("part", "snippet".to_string()),
            ("q", query.to_string()),
            ("type", "video".to_string()),
            ("maxResults", max_results.to_string()),
        ];
        self.fetch("search", &params).await
    }

    async fn videos(&self, video_id: &str) -> Result<Vec<VideoItem>, ApiError> {
        let params = [
            ("part", "snippet,contentDetails,statistics".to_string()),
            ("id", video_id.to_string()),
        ];
        self.fetch("videos", &params).await
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<PlaylistItem>, ApiError> {
        let params = [
            ("part", "snippet".to_string()),
            ("playlistId", playlist_id.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        self.fetch("playlistItems", &params).await
    }
}
