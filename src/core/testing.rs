//! In-memory collaborators for pipeline and UI tests.

use crate::core::{
    Analyzer, MetadataProvider, NarrativeGenerator, Transcript, TranscriptProvider,
    TranscriptSegment, VideoId, VideoMetadata,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const PRIMARY_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
pub const RIVAL_URL: &str = "https://youtu.be/9bZkp7q19f0";

pub struct FakeMetadata(pub HashMap<&'static str, VideoMetadata>);

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn fetch(&self, video_id: &VideoId) -> Result<VideoMetadata> {
        self.0
            .get(video_id.as_str())
            .cloned()
            .ok_or_else(|| Error::NotFound(video_id.clone()))
    }
}

pub struct FakeTranscripts {
    pub available: bool,
}

#[async_trait]
impl TranscriptProvider for FakeTranscripts {
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript> {
        if !self.available {
            return Err(Error::Unavailable("subtitles are disabled".to_string()));
        }
        Ok(Transcript {
            video_id: video_id.clone(),
            segments: ["hello", "world"]
                .iter()
                .enumerate()
                .map(|(i, text)| TranscriptSegment {
                    text: text.to_string(),
                    start: i as f64,
                    duration: 1.0,
                })
                .collect(),
        })
    }
}

pub struct FakeNarrator {
    pub reply: Option<&'static str>,
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl NarrativeGenerator for FakeNarrator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompt log")
            .push(prompt.to_string());
        self.reply
            .map(str::to_string)
            .ok_or_else(|| Error::GenerationFailed("quota exceeded".to_string()))
    }
}

pub fn metadata(title: &str, view_count: u64) -> VideoMetadata {
    VideoMetadata {
        title: title.to_string(),
        view_count,
        like_count: 12,
        comment_count: 3,
    }
}

/// The primary video (50k views) and a rival (500 views).
fn videos() -> FakeMetadata {
    FakeMetadata(HashMap::from([
        ("dQw4w9WgXcQ", metadata("Primary", 50_000)),
        ("9bZkp7q19f0", metadata("Rival", 500)),
    ]))
}

pub fn analyzer_with_narrator(narrator: Arc<dyn NarrativeGenerator>) -> Analyzer {
    Analyzer::new(
        Arc::new(videos()),
        Arc::new(FakeTranscripts { available: true }),
        narrator,
    )
}

pub fn analyzer(
    transcripts_available: bool,
    reply: Option<&'static str>,
) -> (Analyzer, Arc<FakeNarrator>) {
    let narrator = Arc::new(FakeNarrator {
        reply,
        prompts: Mutex::new(Vec::new()),
    });
    let analyzer = Analyzer::new(
        Arc::new(videos()),
        Arc::new(FakeTranscripts {
            available: transcripts_available,
        }),
        narrator.clone(),
    );
    (analyzer, narrator)
}
