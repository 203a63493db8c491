//! `VideoLookupClient`: the single entry point the bot's commands call.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::data_api::{MetadataProvider, YoutubeDataApi};
use super::locator;
use super::media_resolver::{
    DownloadRequest, MediaKind, MediaResolver, ResolverResult, YtDlpResolver,
};
use super::video_metadata::{DownloadResult, PlaylistReference, VideoRecord};
use crate::config::Config;
use crate::error::{LookupError, LookupResult};

/// Resolves locators (links, IDs, search text) into metadata, stream URLs
/// and downloaded files.
///
/// Cheap to share: the provider and resolver sit behind `Arc`s and hold no
/// per-call state.
#[derive(Clone)]
pub struct VideoLookupClient {
    provider: Arc<dyn MetadataProvider>,
    resolver: Arc<dyn MediaResolver>,
    download_dir: PathBuf,
    max_height: u32,
}

impl VideoLookupClient {
    /// Wires up the REST API client and `yt-dlp` from config.
    pub fn from_config(config: &Config) -> LookupResult<Self> {
        let provider = YoutubeDataApi::new(config)
            .map_err(|e| LookupError::Config(format!("Failed to build HTTP client: {e}")))?;
        let resolver = YtDlpResolver::from_config(config);

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(resolver),
            config.download_dir.clone(),
        )
        .with_max_height(config.stream_max_height))
    }

    /// Builds a client from explicit collaborators.
    ///
    /// # Arguments
    ///
    /// * `provider` - Source of search results and video details.
    /// * `resolver` - Extracts stream URLs and downloads media.
    /// * `download_dir` - Directory that downloaded files are written to.
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        resolver: Arc<dyn MediaResolver>,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            resolver,
            download_dir: download_dir.into(),
            max_height: 720,
        }
    }

    /// Height cap for stream URLs and video downloads (default 720).
    pub fn with_max_height(mut self, max_height: u32) -> Self {
        self.max_height = max_height;
        self
    }

    /// Directory that downloaded files are written to.
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Extracts a video ID from a direct link, or `None` for search text.
    pub fn resolve_locator(&self, locator: &str) -> Option<String> {
        locator::resolve_locator(locator)
    }

    /// Whether the locator points at YouTube at all. No network call.
    pub fn exists(&self, locator: &str) -> bool {
        locator::exists(locator)
    }

    /// Looks up a video by link or search text.
    ///
    /// Links go straight to the detail endpoint; anything else is searched
    /// first and the top hit's details are fetched.
    ///
    /// # Arguments
    ///
    /// * `locator` - A video link or free-text search query.
    ///
    /// # Returns
    ///
    /// The video's `VideoRecord`, or `LookupError::NotFound` when nothing
    /// matched or the provider could not be reached.
    pub async fn fetch_details(&self, locator: &str) -> LookupResult<VideoRecord> {
        info!("Fetching video details for: {}", locator);

        if let Some(video_id) = self.resolve_locator(locator) {
            return self.fetch_details_by_id(&video_id).await;
        }

        let hits = self
            .provider
            .search(locator, 1)
            .await
            .map_err(|e| LookupError::unavailable(locator, e))?;

        let Some(video_id) = hits.into_iter().next().and_then(|hit| hit.id.video_id) else {
            warn!("No YouTube search results for: {}", locator);
            return Err(LookupError::not_found(locator));
        };

        debug!("Search for {:?} resolved to {}", locator, video_id);
        self.fetch_details_by_id(&video_id).await
    }

    /// Looks up a video whose ID is already known. Never searches.
    ///
    /// # Arguments
    ///
    /// * `video_id` - An 11-character video ID.
    pub async fn fetch_details_by_id(&self, video_id: &str) -> LookupResult<VideoRecord> {
        let items = self
            .provider
            .videos(video_id)
            .await
            .map_err(|e| LookupError::unavailable(video_id, e))?;

        let Some(item) = items.into_iter().next() else {
            warn!("Could not get details for video ID: {}", video_id);
            return Err(LookupError::not_found(video_id));
        };

        let record = VideoRecord::try_from(item).map_err(|_| {
            warn!("Incomplete details for video ID: {}", video_id);
            LookupError::not_found(video_id)
        })?;
        debug!(
            id = record.id(),
            duration = record.duration_seconds(),
            "Resolved video details"
        );
        Ok(record)
    }

    /// Video IDs from the playlist named by a `list=` parameter, at most
    /// `limit`, in provider order. Unparseable locators and provider
    /// failures both yield an empty list.
    ///
    /// # Arguments
    ///
    /// * `locator` - A link carrying a `list=` parameter.
    /// * `limit` - Maximum number of IDs to return.
    pub async fn fetch_playlist(&self, locator: &str, limit: u32) -> Vec<String> {
        match locator::extract_playlist_id(locator) {
            Some(playlist_id) => {
                self.fetch_playlist_by_id(&playlist_id, limit)
                    .await
                    .video_ids
            }
            None => {
                debug!("No playlist ID in: {}", locator);
                Vec::new()
            }
        }
    }

    /// Fetches up to `limit` video IDs from a known playlist.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - The playlist ID, without the `list=` prefix.
    /// * `limit` - Maximum number of IDs to return.
    ///
    /// # Returns
    ///
    /// A `PlaylistReference` whose `video_ids` are in playlist order. It is
    /// empty if the provider failed.
    pub async fn fetch_playlist_by_id(&self, playlist_id: &str, limit: u32) -> PlaylistReference {
        info!("Fetching up to {} items from playlist {}", limit, playlist_id);

        let video_ids = match self.provider.playlist_items(playlist_id, limit).await {
            Ok(items) => items
                .iter()
                .filter_map(|item| item.video_id().map(str::to_string))
                .take(limit as usize)
                .collect(),
            Err(e) => {
                error!("Failed to fetch playlist {}: {}", playlist_id, e);
                Vec::new()
            }
        };

        PlaylistReference {
            playlist_id: playlist_id.to_string(),
            video_ids,
        }
    }

    /// Direct stream URL for the best format within the height cap.
    ///
    /// Failures come back as `Err` whose message is fit to show users.
    ///
    /// # Arguments
    ///
    /// * `locator` - A video link or bare video ID.
    pub async fn resolve_stream_url(&self, locator: &str) -> ResolverResult<String> {
        let link = Self::to_link(locator);
        info!("Resolving stream URL for: {}", link);

        self.resolver
            .extract_stream_url(&link, self.max_height)
            .await
            .inspect_err(|e| error!("Stream resolution failed for {}: {}", link, e))
    }

    /// Downloads audio (MP3) or video (MP4) to `<download_dir>/<id>.<ext>`.
    ///
    /// An existing file at that path is returned without downloading again.
    /// Failures are logged and reported as `ready == false`.
    ///
    /// # Arguments
    ///
    /// * `locator` - A video link or bare video ID.
    /// * `want_video` - `true` for an MP4 within the height cap, `false` for MP3 audio.
    pub async fn download_media(&self, locator: &str, want_video: bool) -> DownloadResult {
        let link = Self::to_link(locator);
        let kind = MediaKind::from_want_video(want_video);
        let stem = self
            .resolve_locator(&link)
            .unwrap_or_else(|| format!("temp_{:08x}", rand::random::<u32>()));
        let request = DownloadRequest::new(&self.download_dir, &stem, kind, self.max_height);

        match tokio::fs::try_exists(&request.expected_path).await {
            Ok(true) => {
                debug!("Reusing existing file {}", request.expected_path.display());
                return DownloadResult::ready(request.expected_path);
            }
            Ok(false) => {}
            Err(e) => warn!(
                "Could not check {}: {}",
                request.expected_path.display(),
                e
            ),
        }

        if let Err(e) = tokio::fs::create_dir_all(&self.download_dir).await {
            error!(
                "Failed to create download directory {}: {}",
                self.download_dir.display(),
                e
            );
            return DownloadResult::failed();
        }

        match self.resolver.download(&link, &request).await {
            Ok(path) => {
                info!("Downloaded {} to {}", link, path.display());
                DownloadResult::ready(path)
            }
            Err(e) => {
                error!("Download failed for {}: {}", link, e);
                DownloadResult::failed()
            }
        }
    }

    /// Bare IDs become watch URLs; links and other text pass through.
    fn to_link(locator: &str) -> String {
        let locator = locator.trim();
        if locator::is_bare_video_id(locator) {
            locator::watch_url(locator)
        } else {
            locator.to_string()
        }
    }
}

impl std::fmt::Debug for VideoLookupClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoLookupClient")
            .field("download_dir", &self.download_dir)
            .field("max_height", &self.max_height)
            .finish_non_exhaustive()
    }
}
