//! This module defines the trait for turning a video link into a playable
//! stream URL or a local media file, plus the `yt-dlp` implementation.

/// Implementation that shells out to the `yt-dlp` binary.
pub(crate) mod ytdlp;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ResolverError;

pub use ytdlp::YtDlpResolver;

/// A specialized `Result` type for media resolution.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// What to keep from a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Audio only, transcoded to MP3.
    Audio,
    /// Video with audio, merged into MP4.
    Video,
}

impl MediaKind {
    pub fn from_want_video(want_video: bool) -> Self {
        if want_video { Self::Video } else { Self::Audio }
    }

    /// File extension of the final artifact.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Audio => "mp3",
            Self::Video => "mp4",
        }
    }
}

/// Everything a resolver needs to place a download at a known path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub kind: MediaKind,
    /// Output template handed to the resolver; may contain `%(ext)s`.
    pub output_template: String,
    /// Where the finished file must end up.
    pub expected_path: PathBuf,
    /// Height cap for video downloads.
    pub max_height: u32,
}

impl DownloadRequest {
    /// Builds the request for `<dir>/<stem>.<ext>`.
    ///
    /// Audio is extracted after download, so its template leaves the
    /// extension to the resolver and only the converted file is expected.
    pub fn new(dir: &Path, stem: &str, kind: MediaKind, max_height: u32) -> Self {
        let expected_path = dir.join(format!("{stem}.{}", kind.extension()));
        let output_template = match kind {
            MediaKind::Audio => dir.join(format!("{stem}.%(ext)s")).display().to_string(),
            MediaKind::Video => expected_path.display().to_string(),
        };
        Self {
            kind,
            output_template,
            expected_path,
            max_height,
        }
    }
}

/// Turns a video link into a stream URL or a downloaded file.
/// Requires `Send + Sync` so one resolver can serve every command handler.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Returns a direct URL for the best stream no taller than `max_height`.
    async fn extract_stream_url(&self, link: &str, max_height: u32) -> ResolverResult<String>;

    /// Downloads `link` as described by `request` and returns the local path.
    async fn download(&self, link: &str, request: &DownloadRequest) -> ResolverResult<PathBuf>;
}
