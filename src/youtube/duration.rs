//! ISO-8601 duration parsing (as returned in `contentDetails.duration`) and
//! the `M:SS` display format used in bot messages.

use std::sync::LazyLock;

use regex::Regex;

/// `P[nW][nD][T[nH][nM][n[.f]S]]`; years and months never appear on videos.
static ISO8601_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:[.,]\d+)?S)?)?$",
    )
    .unwrap()
});

/// Parses an ISO-8601 duration into whole seconds.
///
/// `PT` alone is zero; anything that does not match the pattern, or that
/// does not fit in a `u64`, is `None`.
pub fn parse_iso8601(text: &str) -> Option<u64> {
    let caps = ISO8601_REGEX.captures(text.trim())?;

    let field = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    [(1, 604_800), (2, 86_400), (3, 3_600), (4, 60), (5, 1)]
        .into_iter()
        .try_fold(0u64, |total, (idx, unit)| {
            field(idx)?.checked_mul(unit)?.checked_add(total)
        })
}

/// Converts an optional ISO-8601 duration into `(seconds, display)`.
///
/// Missing or malformed durations become `(0, "0:00")` instead of failing.
pub fn parse_duration(text: Option<&str>) -> (u64, String) {
    let seconds = text.and_then(parse_iso8601).unwrap_or(0);
    (seconds, format_duration(seconds))
}

/// Formats seconds as `M:SS`, folding hours into the minute count.
pub fn format_duration(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Parses a clock-style duration ("5:32", "1:23:45" or "42") into seconds.
pub fn clock_to_seconds(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    parts.iter().try_fold(0u64, |acc, part| {
        let value = part.parse::<u64>().ok()?;
        acc.checked_mul(60)?.checked_add(value)
    })
}
