//! Normalized results handed back to the bot: video metadata, playlist
//! contents and download outcomes.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_api::VideoItem;
use super::duration::parse_duration;
use super::locator::{playlist_url, watch_url};
use crate::error::LookupError;

/// Metadata for a single video, built once per lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    id: String,
    title: String,
    duration_seconds: u64,
    duration_display: String,
    thumbnail_url: Option<String>,
    channel: Option<String>,
    canonical_link: String,
}

impl VideoRecord {
    /// The 11-character video ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Duration as `M:SS`, e.g. `"4:30"`.
    pub fn duration_display(&self) -> &str {
        &self.duration_display
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_seconds)
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// `https://www.youtube.com/watch?v=<id>`
    pub fn canonical_link(&self) -> &str {
        &self.canonical_link
    }

    /// Whether the video is longer than `limit_secs`. A limit of zero disables the check.
    pub fn exceeds_duration_limit(&self, limit_secs: u64) -> bool {
        limit_secs > 0 && self.duration_seconds > limit_secs
    }
}

/// Converts a `videos` item into a record.
///
/// Bad durations become zero, but an item without an ID or title is
/// rejected as not found.
impl TryFrom<VideoItem> for VideoRecord {
    type Error = LookupError;

    fn try_from(item: VideoItem) -> Result<Self, Self::Error> {
        let id = item.id.trim().to_string();
        let title = item.snippet.title.trim().to_string();
        if id.is_empty() || title.is_empty() {
            return Err(LookupError::not_found(id));
        }

        let (duration_seconds, duration_display) =
            parse_duration(item.content_details.duration.as_deref());
        let thumbnail_url = item.snippet.best_thumbnail();
        let canonical_link = watch_url(&id);

        Ok(Self {
            id,
            title,
            duration_seconds,
            duration_display,
            thumbnail_url,
            channel: item.snippet.channel_title,
            canonical_link,
        })
    }
}

/// A playlist and the first N video IDs in provider order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistReference {
    pub playlist_id: String,
    pub video_ids: Vec<String>,
}

impl PlaylistReference {
    /// `https://youtube.com/playlist?list=<id>`
    pub fn canonical_link(&self) -> String {
        playlist_url(&self.playlist_id)
    }
}

/// Outcome of a download. `ready == false` means it failed and `path` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub path: Option<PathBuf>,
    pub ready: bool,
}

impl DownloadResult {
    /// A finished download at `path`.
    pub fn ready(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            ready: true,
        }
    }

    /// A download that produced no file.
    pub fn failed() -> Self {
        Self {
            path: None,
            ready: false,
        }
    }
}
