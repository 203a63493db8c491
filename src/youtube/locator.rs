//! Best-effort recognition of YouTube links, video IDs and playlist IDs.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

pub const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
pub const PLAYLIST_BASE: &str = "https://youtube.com/playlist?list=";
const SHORT_HOST: &str = "youtu.be";

/// Matches any locator that mentions a YouTube host.
static HOST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:youtube\.com|youtu\.be)").unwrap());

/// Captures the 11-character video ID from a `v=` query parameter.
static WATCH_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v=([a-zA-Z0-9_-]{11})").unwrap());

/// Captures a playlist ID from a `list=` query parameter.
static PLAYLIST_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"list=([a-zA-Z0-9_-]+)").unwrap());

/// Checks whether the locator points at a YouTube host. No network call.
pub fn exists(locator: &str) -> bool {
    HOST_REGEX.is_match(locator)
}

/// Extracts the video ID from a direct link.
///
/// Short links (`youtu.be/<id>`) yield the last path segment before any
/// query string; other links yield the `v=` parameter. Returns `None` when
/// the locator should be treated as search text instead.
///
/// # Arguments
///
/// * `locator` - A link, bare ID or free-text query.
///
/// # Returns
///
/// The video ID, or `None` if the locator is not a direct link.
pub fn resolve_locator(locator: &str) -> Option<String> {
    let locator = locator.trim();

    if is_short_link(locator) {
        return short_link_id(locator);
    }

    WATCH_ID_REGEX
        .captures(locator)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// True only when the link's host is `youtu.be`, not when the text merely
/// mentions it (e.g. `&feature=youtu.be` on a watch link).
fn is_short_link(locator: &str) -> bool {
    match Url::parse(locator) {
        Ok(url) => url.host_str() == Some(SHORT_HOST),
        Err(_) => locator
            .split(['/', '?'])
            .next()
            .is_some_and(|host| host == SHORT_HOST),
    }
}

fn short_link_id(locator: &str) -> Option<String> {
    // Scheme-less input does not parse as a URL; split the string instead.
    let segment = match Url::parse(locator) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        Err(_) => locator
            .split('?')
            .next()
            .and_then(|path| path.trim_end_matches('/').rsplit('/').next())
            .map(str::to_string),
    }?;

    if segment.is_empty() || segment == SHORT_HOST {
        None
    } else {
        Some(segment)
    }
}

/// True for an 11-character string made only of ID characters.
pub fn is_bare_video_id(locator: &str) -> bool {
    locator.len() == 11
        && locator
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Extracts the playlist ID from a `list=` query parameter.
pub fn extract_playlist_id(locator: &str) -> Option<String> {
    PLAYLIST_ID_REGEX
        .captures(locator)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Canonical watch link for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_BASE}{video_id}")
}

/// Canonical playlist link for a playlist ID.
pub fn playlist_url(playlist_id: &str) -> String {
    format!("{PLAYLIST_BASE}{playlist_id}")
}
