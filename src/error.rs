//! Error types for metadata lookups, media resolution and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while talking to the YouTube Data API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No API key was configured, so the request was never sent.
    #[error("YouTube API key is not configured")]
    MissingApiKey,

    /// Network failure, timeout or a body that could not be read.
    #[error("API communication failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("YouTube API error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The API answered 2xx but the body was not the expected JSON.
    #[error("Unable to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised by a media resolver (stream extraction or download).
///
/// The `Display` text is meant to be shown to end users as-is.
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Failed to start media resolver: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Media resolver failed: {0}")]
    Failed(String),

    #[error("Media resolver returned no stream URL")]
    EmptyOutput,

    #[error("Media resolver finished but {} was not created", .0.display())]
    MissingOutput(PathBuf),

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by [`VideoLookupClient`](crate::youtube::VideoLookupClient)
/// and configuration loading.
#[derive(Error, Debug)]
pub enum LookupError {
    /// No video matched. Provider failures are reported here too; `cause`
    /// keeps the underlying error for callers that need to tell them apart.
    #[error("No video found on YouTube for \"{query}\"")]
    NotFound {
        query: String,
        #[source]
        cause: Option<ApiError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LookupError {
    pub(crate) fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
            cause: None,
        }
    }

    pub(crate) fn unavailable(query: impl Into<String>, cause: ApiError) -> Self {
        Self::NotFound {
            query: query.into(),
            cause: Some(cause),
        }
    }

    /// True when the lookup failed because the provider could not be reached
    /// or refused the request, rather than because nothing matched.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotFound { cause: Some(_), .. })
    }
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
