//! Test fixtures for the YouTube lookup client
//! This module contains sample Data API payloads used in tests

use serde_json::{Value, json};

pub const RICK_ID: &str = "dQw4w9WgXcQ";
pub const RICK_SHORT_LINK: &str = "https://youtu.be/dQw4w9WgXcQ";
pub const RICK_TITLE: &str = "Rick Astley - Never Gonna Give You Up";
pub const RICK_THUMBNAIL: &str = "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg";

/// A `search` response with one hit per ID
pub fn search_response(ids: &[&str]) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#video", "videoId": id},
                "snippet": {
                    "title": format!("Result {id}"),
                    "channelTitle": "Some Channel",
                    "thumbnails": {"high": {"url": format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")}}
                }
            })
        })
        .collect();
    json!({"kind": "youtube#searchListResponse", "items": items})
}

/// A `videos` response for a single video
pub fn video_response(id: &str, title: &str, duration: &str) -> Value {
    json!({
        "kind": "youtube#videoListResponse",
        "items": [{
            "id": id,
            "snippet": {
                "title": title,
                "channelTitle": "Rick Astley",
                "thumbnails": {
                    "default": {"url": format!("https://i.ytimg.com/vi/{id}/default.jpg"), "width": 120, "height": 90},
                    "high": {"url": format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"), "width": 480, "height": 360},
                    "maxres": {"url": format!("https://i.ytimg.com/vi/{id}/maxresdefault.jpg"), "width": 1280, "height": 720}
                }
            },
            "contentDetails": {"duration": duration},
            "statistics": {"viewCount": "1700000000", "likeCount": "18000000"}
        }]
    })
}

/// A `playlistItems` response listing the given IDs in order
pub fn playlist_response(ids: &[&str]) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "kind": "youtube#playlistItem",
                "snippet": {"resourceId": {"kind": "youtube#video", "videoId": id}}
            })
        })
        .collect();
    json!({"kind": "youtube#playlistItemListResponse", "items": items})
}

/// Any list response with no items
pub fn empty_response() -> Value {
    json!({"items": []})
}
