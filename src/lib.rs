//! Resolves YouTube links and search text into video metadata, stream URLs
//! and downloaded media files for the music bot's command layer.
//!
//! The entry point is [`youtube::VideoLookupClient`], built once from a
//! [`config::Config`] and shared by reference between command handlers.

/// Environment-derived settings (API key, limits, image URLs, flags).
pub mod config;
/// Error types shared by the lookup client and its collaborators.
pub mod error;
/// The YouTube lookup client and its metadata/media collaborators.
pub mod youtube;

pub use config::Config;
pub use error::{ApiError, LookupError, LookupResult, ResolverError};
pub use youtube::{
    DownloadResult, MediaKind, MediaResolver, MetadataProvider, PlaylistReference,
    VideoLookupClient, VideoRecord,
};

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs a formatted `tracing` subscriber for the host process.
///
/// `RUST_LOG` takes precedence over `default_directive`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(default_directive: &str) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
