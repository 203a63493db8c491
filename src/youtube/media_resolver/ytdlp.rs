//! Implements `MediaResolver` with the `yt-dlp` command-line tool.

use std::path::PathBuf;
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use super::{DownloadRequest, MediaKind, MediaResolver, ResolverResult};
use crate::config::Config;
use crate::error::ResolverError;

/// Runs `yt-dlp` (or a compatible binary) as a child process per call.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    binary: String,
}

impl Default for YtDlpResolver {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlpResolver {
    /// Creates a resolver that runs `binary` (a name on `PATH` or a full path).
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Creates a resolver for the configured `YTDLP_BINARY`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ytdlp_binary.clone())
    }

    /// Format selector for a direct stream: best single file within the cap.
    pub(crate) fn stream_format(max_height: u32) -> String {
        let max_width = u64::from(max_height) * 16 / 9;
        format!("best[height<=?{max_height}][width<=?{max_width}]/best")
    }

    /// Arguments for a stream URL lookup, excluding the binary.
    ///
    /// The link always follows `--`, so user text starting with `-` is never
    /// read as an option.
    pub(crate) fn stream_args(link: &str, max_height: u32) -> Vec<String> {
        vec![
            "-g".into(),
            "-f".into(),
            Self::stream_format(max_height),
            "--no-playlist".into(),
            "--no-warnings".into(),
            "--".into(),
            link.into(),
        ]
    }

    /// Arguments for a download, excluding the binary.
    pub(crate) fn download_args(link: &str, request: &DownloadRequest) -> Vec<String> {
        let mut args: Vec<String> = match request.kind {
            MediaKind::Video => vec![
                "-f".into(),
                format!(
                    "bestvideo[height<={}][ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best",
                    request.max_height
                ),
                "--merge-output-format".into(),
                "mp4".into(),
            ],
            MediaKind::Audio => vec![
                "-f".into(),
                "bestaudio/best".into(),
                "-x".into(),
                "--audio-format".into(),
                "mp3".into(),
                "--audio-quality".into(),
                "192K".into(),
            ],
        };

        args.extend([
            "--no-playlist".into(),
            "--no-check-certificates".into(),
            "--quiet".into(),
            "-o".into(),
            request.output_template.clone(),
            "--".into(),
            link.into(),
        ]);
        args
    }

    async fn run(&self, args: &[String]) -> ResolverResult<Output> {
        debug!(binary = %self.binary, ?args, "Running media resolver");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(ResolverError::Spawn)?;

        if output.status.success() {
            Ok(output)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("{} exited with {}", self.binary, output.status)
            } else {
                stderr
            };
            Err(ResolverError::Failed(message))
        }
    }
}

/// Picks the first non-empty line of `yt-dlp -g` output.
pub(crate) fn first_url(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    async fn extract_stream_url(&self, link: &str, max_height: u32) -> ResolverResult<String> {
        info!("Extracting stream URL for {}", link);

        let output = self
            .run(&Self::stream_args(link, max_height))
            .await
            .inspect_err(|e| error!("Error extracting video link with yt-dlp: {}", e))?;

        first_url(&output.stdout).ok_or(ResolverError::EmptyOutput)
    }

    async fn download(&self, link: &str, request: &DownloadRequest) -> ResolverResult<PathBuf> {
        info!(
            kind = ?request.kind,
            path = %request.expected_path.display(),
            "Downloading {}",
            link
        );

        self.run(&Self::download_args(link, request))
            .await
            .inspect_err(|e| error!("yt-dlp download error: {}", e))?;

        if tokio::fs::try_exists(&request.expected_path).await? {
            Ok(request.expected_path.clone())
        } else {
            Err(ResolverError::MissingOutput(request.expected_path.clone()))
        }
    }
}
