//! Loads bot settings from the process environment (and `.env`, if present).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{LookupError, LookupResult};
use crate::youtube::duration::clock_to_seconds;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3/";
const DEFAULT_SUPPORT_CHANNEL: &str = "https://t.me/ll_ABOUT_VENOM_ll";
const DEFAULT_SUPPORT_CHAT: &str = "https://t.me/NOBITA_SUPPORT";
const DEFAULT_PING_IMG_URL: &str =
    "https://graph.org/file/db87179ca599ab6715427-f802c1c8e18c259e3f.jpg";

/// Artwork shown alongside bot replies.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUrls {
    pub start: Vec<String>,
    pub ping: String,
    pub playlist: String,
    pub stats: String,
    pub telegram_audio: String,
    pub telegram_video: String,
    pub stream: String,
    pub soundcloud: String,
    pub youtube: String,
    pub spotify_artist: String,
    pub spotify_album: String,
    pub spotify_playlist: String,
}

impl ImageUrls {
    fn with_ping(ping: String) -> Self {
        let spotify = "https://graph.org/file/0bb6f36796d496b4254ff.jpg".to_string();
        let telegram = "https://telegra.ph/file/492a3bb2e880d19750b79.jpg".to_string();
        Self {
            start: vec![
                "https://graph.org/file/fca21e94a003efd69bde0-3f1e47943fd271954a.jpg".into(),
                "https://graph.org/file/eaca2ec62c0658953bd07-b7dd96f0f048d6387f.jpg".into(),
                "https://te.legra.ph/file/5fd13f2cc0d03bce9f7f2.jpg".into(),
            ],
            ping,
            playlist: "https://graph.org/file/95fcdbf55b8d00bb15821-509657931b1fea2687.jpg".into(),
            stats: "https://telegra.ph/file/edd388a42dd2c499fd868.jpg".into(),
            telegram_audio: telegram.clone(),
            telegram_video: telegram,
            stream: "https://graph.org/file/ff2af8d4d10afa1baf49e.jpg".into(),
            soundcloud: "https://graph.org/file/c95a687e777b55be1c792.jpg".into(),
            youtube: "https://graph.org/file/e8730fdece86a1166f608.jpg".into(),
            spotify_artist: spotify.clone(),
            spotify_album: spotify.clone(),
            spotify_playlist: spotify,
        }
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::with_ping(DEFAULT_PING_IMG_URL.to_string())
    }
}

/// Settings consumed by the lookup client and the surrounding bot.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// YouTube Data API key; empty when not configured.
    pub youtube_api_key: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub ytdlp_binary: String,
    pub download_dir: PathBuf,
    /// Height cap for stream URLs and video downloads.
    pub stream_max_height: u32,
    /// Longest track the bot will play, in seconds.
    pub duration_limit: u64,
    pub playlist_fetch_limit: usize,
    pub audio_filesize_limit: u64,
    pub video_filesize_limit: u64,
    pub cache_duration: Duration,
    pub cache_sleep: Duration,
    pub auto_leaving_assistant: bool,
    pub assistant_leave_time: Duration,
    pub private_bot_mode_mem: u32,
    pub support_channel: String,
    pub support_chat: String,
    pub images: ImageUrls,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube_api_key: String::new(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(10),
            ytdlp_binary: "yt-dlp".to_string(),
            download_dir: PathBuf::from("downloads"),
            stream_max_height: 720,
            duration_limit: 300 * 60,
            playlist_fetch_limit: 25,
            audio_filesize_limit: 204_857_600,
            video_filesize_limit: 2_073_741_824,
            cache_duration: Duration::from_secs(86_400),
            cache_sleep: Duration::from_secs(3_600),
            auto_leaving_assistant: true,
            assistant_leave_time: Duration::from_secs(5_400),
            private_bot_mode_mem: 1,
            support_channel: DEFAULT_SUPPORT_CHANNEL.to_string(),
            support_chat: DEFAULT_SUPPORT_CHAT.to_string(),
            images: ImageUrls::default(),
        }
    }
}

impl Config {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn load() -> LookupResult<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads settings from the process environment only.
    pub fn from_env() -> LookupResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep their
    /// defaults; present but malformed values are rejected.
    pub fn from_lookup<F>(lookup: F) -> LookupResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let youtube_api_key = get("YT_API_KEY")
            .or_else(|| get("YOUTUBE_API_KEY"))
            .unwrap_or_default();
        if youtube_api_key.is_empty() {
            warn!("YT_API_KEY is not set; YouTube lookups will fail");
        }

        // Plain numbers are minutes; clock values ("1:30:00") are taken as-is.
        let duration_limit = match get("DURATION_LIMIT") {
            Some(raw) if raw.contains(':') => clock_to_seconds(&raw).ok_or_else(|| {
                LookupError::Config(format!("DURATION_LIMIT is not a valid duration: \"{raw}\""))
            })?,
            Some(raw) => parse_number::<u64>("DURATION_LIMIT", &raw)?
                .checked_mul(60)
                .ok_or_else(|| {
                    LookupError::Config(format!("DURATION_LIMIT is too large: \"{raw}\""))
                })?,
            None => defaults.duration_limit,
        };

        let support_channel = get("SUPPORT_CHANNEL").unwrap_or(defaults.support_channel);
        ensure_http("SUPPORT_CHANNEL", &support_channel)?;
        let support_chat = get("SUPPORT_CHAT").unwrap_or(defaults.support_chat);
        ensure_http("SUPPORT_CHAT", &support_chat)?;

        let config = Self {
            youtube_api_key,
            api_base_url: get("YT_API_BASE").unwrap_or(defaults.api_base_url),
            request_timeout: seconds(&get, "YT_REQUEST_TIMEOUT", defaults.request_timeout)?,
            ytdlp_binary: get("YTDLP_BINARY").unwrap_or(defaults.ytdlp_binary),
            download_dir: get("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.download_dir),
            stream_max_height: number(&get, "STREAM_MAX_HEIGHT", defaults.stream_max_height)?,
            duration_limit,
            playlist_fetch_limit: number(
                &get,
                "PLAYLIST_FETCH_LIMIT",
                defaults.playlist_fetch_limit,
            )?,
            audio_filesize_limit: number(
                &get,
                "TG_AUDIO_FILESIZE_LIMIT",
                defaults.audio_filesize_limit,
            )?,
            video_filesize_limit: number(
                &get,
                "TG_VIDEO_FILESIZE_LIMIT",
                defaults.video_filesize_limit,
            )?,
            cache_duration: seconds(&get, "CACHE_DURATION", defaults.cache_duration)?,
            cache_sleep: seconds(&get, "CACHE_SLEEP", defaults.cache_sleep)?,
            auto_leaving_assistant: match get("AUTO_LEAVING_ASSISTANT") {
                Some(raw) => parse_bool("AUTO_LEAVING_ASSISTANT", &raw)?,
                None => defaults.auto_leaving_assistant,
            },
            assistant_leave_time: seconds(
                &get,
                "ASSISTANT_LEAVE_TIME",
                defaults.assistant_leave_time,
            )?,
            private_bot_mode_mem: number(
                &get,
                "PRIVATE_BOT_MODE_MEM",
                defaults.private_bot_mode_mem,
            )?,
            support_channel,
            support_chat,
            images: get("PING_IMG_URL")
                .map(ImageUrls::with_ping)
                .unwrap_or(defaults.images),
        };

        debug!(
            download_dir = %config.download_dir.display(),
            playlist_fetch_limit = config.playlist_fetch_limit,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        !self.youtube_api_key.is_empty()
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> LookupResult<T> {
    raw.parse::<T>()
        .map_err(|_| LookupError::Config(format!("{key} must be a number, got \"{raw}\"")))
}

fn number<T, G>(get: &G, key: &str, default: T) -> LookupResult<T>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => parse_number(key, &raw),
        None => Ok(default),
    }
}

fn seconds<G>(get: &G, key: &str, default: Duration) -> LookupResult<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    number(get, key, default.as_secs()).map(Duration::from_secs)
}

fn parse_bool(key: &str, raw: &str) -> LookupResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LookupError::Config(format!(
            "{key} must be a boolean, got \"{raw}\""
        ))),
    }
}

fn ensure_http(key: &str, value: &str) -> LookupResult<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(LookupError::Config(format!(
            "Your {key} url is wrong. Please ensure that it starts with https://"
        )))
    }
}
