use crate::core::VideoId;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const YOUTUBE_DATA_API: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up title and statistics; `Error::NotFound` when the id matches no video.
    async fn fetch(&self, video_id: &VideoId) -> Result<VideoMetadata>;
}

/// Client for the `videos` endpoint of the YouTube Data API v3.
#[derive(Clone)]
pub struct YouTubeDataClient {
    http: reqwest::Client,
    api_key: String,
}

impl YouTubeDataClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl MetadataProvider for YouTubeDataClient {
    async fn fetch(&self, video_id: &VideoId) -> Result<VideoMetadata> {
        tracing::debug!(%video_id, "requesting video details");

        let response = self
            .http
            .get(format!("{YOUTUBE_DATA_API}/videos"))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", video_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::custom(format!(
                "YouTube Data API returned {status}: {}",
                body.trim()
            )));
        }

        let body = response.text().await?;
        parse_videos_response(&body, video_id)
    }
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

// The API encodes counts as strings and omits them when the owner hides them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

fn parse_videos_response(body: &str, video_id: &VideoId) -> Result<VideoMetadata> {
    let response: VideosResponse = serde_json::from_str(body)?;

    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(video_id.clone()))?;

    Ok(VideoMetadata {
        title: item.snippet.title,
        view_count: parse_count("viewCount", item.statistics.view_count.as_deref())?,
        like_count: parse_count("likeCount", item.statistics.like_count.as_deref())?,
        comment_count: parse_count("commentCount", item.statistics.comment_count.as_deref())?,
    })
}

fn parse_count(field: &str, raw: Option<&str>) -> Result<u64> {
    match raw {
        None => Ok(0),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::custom(format!("Unexpected {field} value: {value:?}"))),
    }
}
