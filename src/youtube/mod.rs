//! YouTube lookups for the music bot.
//!
//! [`VideoLookupClient`] composes two collaborators:
//! a [`MetadataProvider`] (the Data API) for search and details, and a
//! [`MediaResolver`] (`yt-dlp`) for stream URLs and downloads.

/// The lookup client the bot's commands call into.
pub(crate) mod client;
/// REST client and response types for the YouTube Data API v3.
pub mod data_api;
/// ISO-8601 duration parsing and `M:SS` formatting.
pub mod duration;
/// Link, video ID and playlist ID recognition.
pub mod locator;
/// Stream URL extraction and downloads.
pub mod media_resolver;
/// Normalized records returned to callers.
pub(crate) mod video_metadata;

pub use client::VideoLookupClient;
pub use data_api::{MetadataProvider, YoutubeDataApi};
pub use media_resolver::{DownloadRequest, MediaKind, MediaResolver, YtDlpResolver};
pub use video_metadata::{DownloadResult, PlaylistReference, VideoRecord};
