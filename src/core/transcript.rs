use crate::core::VideoId;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use yt_transcript_rs::{FetchedTranscript, api::YouTubeTranscriptApi};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Flat transcript: segment texts joined by single spaces.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn timestamped_lines(&self) -> Vec<String> {
        self.segments
            .iter()
            .map(|segment| {
                let start = format_timestamp(segment.start);
                let end = format_timestamp(segment.start + segment.duration);
                format!("[{start} - {end}] {}", segment.text.trim())
            })
            .collect()
    }
}

#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Ordered caption segments; `Error::Unavailable` when the video has none.
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript>;
}

#[derive(Clone)]
pub struct TranscriptService {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl TranscriptService {
    pub fn new(languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| Error::custom(format!("Failed to initialise transcript client: {e}")))?;
        Ok(Self { api, languages })
    }
}

#[async_trait]
impl TranscriptProvider for TranscriptService {
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        tracing::debug!(%video_id, ?languages, "fetching transcript");

        let fetched = self
            .api
            .fetch_transcript(video_id.as_str(), &languages, false)
            .await
            .map_err(|e| Error::Unavailable(e.to_string()))?;

        Ok(from_fetched(video_id.clone(), &fetched))
    }
}

fn from_fetched(video_id: VideoId, fetched: &FetchedTranscript) -> Transcript {
    let segments = fetched
        .snippets
        .iter()
        .map(|snippet| TranscriptSegment {
            text: html_escape::decode_html_entities(&snippet.text).into_owned(),
            start: snippet.start,
            duration: snippet.duration,
        })
        .collect();

    Transcript { video_id, segments }
}

fn format_timestamp(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1_000;
    let millis = total_millis % 1_000;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
    } else {
        format!("{minutes:02}:{secs:02}.{millis:03}")
    }
}
