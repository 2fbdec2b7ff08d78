/*!
 * ASS timestamps (`H:MM:SS.CC`).
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @const: ASS timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d{2})$").unwrap()
});

/// Format milliseconds as `H:MM:SS.CC`.
///
/// Centiseconds are truncated, never rounded, so many short entries cannot
/// accumulate drift. Hours are not bounded.
pub fn format_timestamp(ms: u64) -> String {
    let centis = ms / 10;
    let hours = centis / 360_000;
    let minutes = (centis / 6_000) % 60;
    let seconds = (centis / 100) % 60;
    let cs = centis % 100;

    format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, cs)
}

/// Parse `H:MM:SS.CC` back into milliseconds
pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
    let caps = TIMESTAMP_REGEX
        .captures(timestamp.trim())
        .ok_or_else(|| SubtitleError::InvalidTimestamp(timestamp.to_string()))?;

    let field = |i: usize| -> Result<u64, SubtitleError> {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(|| SubtitleError::InvalidTimestamp(timestamp.to_string()))
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let centis = field(4)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()));
    }

    hours
        .checked_mul(3_600_000)
        .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + centis * 10))
        .ok_or_else(|| SubtitleError::InvalidTimestamp(timestamp.to_string()))
}
