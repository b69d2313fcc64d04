use crate::error::{Error, Result};
use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `v=` or a path separator followed by exactly 11 id characters.
static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("video id pattern is valid")
});

/// Canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pull the video identifier out of a watch, short or embed link.
pub fn extract_video_id(url: &str) -> Result<VideoId> {
    let trimmed = url.trim();
    VIDEO_ID_PATTERN
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
        .ok_or_else(|| Error::InvalidUrl(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").expect("valid");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn extracts_from_short_and_embed_links() {
        let short = extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42").expect("valid");
        assert_eq!(short.as_str(), "dQw4w9WgXcQ");

        let embed = extract_video_id("https://www.youtube.com/embed/aBc_12-xYz9").expect("valid");
        assert_eq!(embed.as_str(), "aBc_12-xYz9");
    }

    #[test]
    fn ignores_trailing_query_parameters() {
        let id = extract_video_id("  https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123  ")
            .expect("valid");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(id.as_str().len(), 11);
    }

    #[test]
    fn rejects_plain_text() {
        let err = extract_video_id("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(ref s) if s == "not a url"));
    }

    #[test]
    fn rejects_too_short_ids() {
        assert!(extract_video_id("https://www.youtube.com/watch?v=short").is_err());
    }
}
