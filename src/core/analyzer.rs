use crate::core::{
    MetadataProvider, NarrativeGenerator, ReachPotential, ReachScore, TranscriptProvider, VideoId,
    VideoMetadata, build_prompt, extract_video_id, reach,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::Serialize;
use std::sync::Arc;

/// A submitted link whose metadata has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoLookup {
    pub url: String,
    pub id: VideoId,
    pub metadata: VideoMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectReport {
    pub id: VideoId,
    pub metadata: VideoMetadata,
    pub score: ReachScore,
    pub reach: ReachPotential,
}

impl SubjectReport {
    fn new(lookup: &VideoLookup, analysis: &str) -> Self {
        let score = reach::score(analysis, &lookup.metadata);
        Self {
            id: lookup.id.clone(),
            metadata: lookup.metadata.clone(),
            score,
            reach: score.potential(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub primary: SubjectReport,
    /// Scored against the primary video's analysis text; only the view term differs.
    pub competitor: Option<SubjectReport>,
    pub text: String,
    pub warnings: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[display("Fetching transcript...")]
    FetchingTranscript,
    #[display("Fetching competitor details...")]
    ResolvingCompetitor,
    #[display("Generating analysis...")]
    GeneratingAnalysis,
    #[display("Estimating reach potential...")]
    Scoring,
}

impl Stage {
    /// Rough completion fraction at the start of the stage.
    pub fn progress(self) -> f64 {
        match self {
            Self::FetchingTranscript => 0.1,
            Self::ResolvingCompetitor => 0.3,
            Self::GeneratingAnalysis => 0.4,
            Self::Scoring => 0.9,
        }
    }
}

/// Request pipeline over the three external collaborators. Cheap to clone.
#[derive(Clone)]
pub struct Analyzer {
    metadata: Arc<dyn MetadataProvider>,
    transcripts: Arc<dyn TranscriptProvider>,
    narrator: Arc<dyn NarrativeGenerator>,
}

impl Analyzer {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        transcripts: Arc<dyn TranscriptProvider>,
        narrator: Arc<dyn NarrativeGenerator>,
    ) -> Self {
        Self {
            metadata,
            transcripts,
            narrator,
        }
    }

    pub async fn lookup(&self, url: &str) -> Result<VideoLookup> {
        let id = extract_video_id(url)?;
        tracing::info!(%id, "fetching video details");
        let metadata = self.metadata.fetch(&id).await?;

        Ok(VideoLookup {
            url: url.trim().to_string(),
            id,
            metadata,
        })
    }

    pub async fn analyze(
        &self,
        primary: &VideoLookup,
        competitor_url: Option<&str>,
    ) -> Result<Analysis> {
        self.analyze_with(primary, competitor_url, |_| {}).await
    }

    /// Run the full analysis for an already looked-up video, reporting each stage as it starts.
    ///
    /// Transcript and generation failures abort the request. A competitor link that cannot be
    /// resolved only produces a warning and the analysis continues without it.
    pub async fn analyze_with<F>(
        &self,
        primary: &VideoLookup,
        competitor_url: Option<&str>,
        on_stage: F,
    ) -> Result<Analysis>
    where
        F: Fn(Stage) + Send + Sync,
    {
        on_stage(Stage::FetchingTranscript);
        tracing::info!(id = %primary.id, "fetching transcript");
        let transcript = self.transcripts.fetch(&primary.id).await?;

        let mut warnings = Vec::new();
        let competitor = match competitor_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => {
                on_stage(Stage::ResolvingCompetitor);
                match self.lookup(url).await {
                    Ok(lookup) => Some(lookup),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping competitive analysis");
                        warnings.push(format!("{e}. Skipping competitive analysis."));
                        None
                    }
                }
            }
            None => None,
        };

        let prompt = build_prompt(
            &transcript.text(),
            &primary.metadata,
            competitor.as_ref().map(|c| &c.metadata),
        );

        on_stage(Stage::GeneratingAnalysis);
        tracing::info!(id = %primary.id, "generating analysis");
        let text = self.narrator.generate(&prompt).await?;

        on_stage(Stage::Scoring);
        let primary_report = SubjectReport::new(primary, &text);
        let competitor_report = competitor.as_ref().map(|c| SubjectReport::new(c, &text));

        tracing::info!(
            reach = %primary_report.reach,
            total = primary_report.score.total(),
            "analysis complete"
        );

        Ok(Analysis {
            primary: primary_report,
            competitor: competitor_report,
            text,
            warnings,
            generated_at: Utc::now(),
        })
    }

    pub async fn transcript(&self, url: &str) -> Result<crate::core::Transcript> {
        let id = extract_video_id(url)?;
        self.transcripts.fetch(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{PRIMARY_URL as PRIMARY, RIVAL_URL as RIVAL, analyzer};
    use crate::error::Error;

    #[tokio::test]
    async fn lookup_resolves_metadata() {
        let (analyzer, _) = analyzer(true, None);
        let lookup = analyzer.lookup(PRIMARY).await.expect("lookup");
        assert_eq!(lookup.id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(lookup.metadata.title, "Primary");
    }

    #[tokio::test]
    async fn lookup_reports_invalid_and_missing_videos() {
        let (analyzer, _) = analyzer(true, None);
        assert!(matches!(
            analyzer.lookup("not a url").await,
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            analyzer.lookup("https://youtu.be/aaaaaaaaaaa").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn analysis_scores_primary_video() {
        let (analyzer, narrator) = analyzer(true, Some("The video is good with high engagement"));
        let primary = analyzer.lookup(PRIMARY).await.expect("lookup");

        let analysis = analyzer.analyze(&primary, None).await.expect("analysis");

        assert_eq!(analysis.primary.score.total(), 4);
        assert_eq!(analysis.primary.reach, ReachPotential::High);
        assert!(analysis.competitor.is_none());
        assert!(analysis.warnings.is_empty());
        assert_eq!(analysis.text, "The video is good with high engagement");

        let prompts = narrator.prompts.lock().expect("prompt log");
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("hello world"));
        assert!(!prompts[0].contains("Competitive Analysis"));
    }

    #[tokio::test]
    async fn competitor_reuses_the_same_analysis_text() {
        let (analyzer, narrator) = analyzer(true, Some("The video is good with high engagement"));
        let primary = analyzer.lookup(PRIMARY).await.expect("lookup");

        let analysis = analyzer
            .analyze(&primary, Some(RIVAL))
            .await
            .expect("analysis");

        let competitor = analysis.competitor.expect("competitor report");
        assert_eq!(competitor.score.quality, analysis.primary.score.quality);
        assert_eq!(competitor.score.engagement, analysis.primary.score.engagement);
        assert_eq!(competitor.score.views, -2);
        assert_eq!(competitor.reach, ReachPotential::Moderate);

        let prompts = narrator.prompts.lock().expect("prompt log");
        assert!(prompts[0].contains("**Competitor Video Title:** Rival"));
    }

    #[tokio::test]
    async fn invalid_competitor_link_degrades_to_warning() {
        let (analyzer, _) = analyzer(true, Some("fair"));
        let primary = analyzer.lookup(PRIMARY).await.expect("lookup");

        let analysis = analyzer
            .analyze(&primary, Some("not a url"))
            .await
            .expect("primary analysis still completes");

        assert!(analysis.competitor.is_none());
        assert_eq!(analysis.warnings.len(), 1);
        assert!(analysis.warnings[0].contains("Skipping competitive analysis"));
        assert_eq!(analysis.primary.reach, ReachPotential::Moderate);
    }

    #[tokio::test]
    async fn unknown_competitor_degrades_to_warning() {
        let (analyzer, _) = analyzer(true, Some("fair"));
        let primary = analyzer.lookup(PRIMARY).await.expect("lookup");

        let analysis = analyzer
            .analyze(&primary, Some("https://youtu.be/bbbbbbbbbbb"))
            .await
            .expect("analysis");

        assert!(analysis.competitor.is_none());
        assert!(analysis.warnings[0].starts_with("Video not found with ID: bbbbbbbbbbb"));
    }

    #[tokio::test]
    async fn blank_competitor_link_is_ignored() {
        let (analyzer, _) = analyzer(true, Some("fair"));
        let primary = analyzer.lookup(PRIMARY).await.expect("lookup");

        let analysis = analyzer.analyze(&primary, Some("   ")).await.expect("analysis");
        assert!(analysis.competitor.is_none());
        assert!(analysis.warnings.is_empty());
    }

    #[tokio::test]
    async fn missing_transcript_halts_before_generation() {
        let (analyzer, narrator) = analyzer(false, Some("excellent"));
        let primary = analyzer.lookup(PRIMARY).await.expect("lookup");

        let err = analyzer.analyze(&primary, None).await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
        assert!(narrator.prompts.lock().expect("prompt log").is_empty());
    }

    #[tokio::test]
    async fn generation_failure_is_reported() {
        let (analyzer, _) = analyzer(true, None);
        let primary = analyzer.lookup(PRIMARY).await.expect("lookup");

        let err = analyzer.analyze(&primary, None).await.unwrap_err();
        assert!(matches!(err, Error::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn stages_are_reported_in_order() {
        let (analyzer, _) = analyzer(true, Some("good"));
        let primary = analyzer.lookup(PRIMARY).await.expect("lookup");
        let stages = std::sync::Mutex::new(Vec::new());

        analyzer
            .analyze_with(&primary, Some(RIVAL), |stage| {
                stages.lock().expect("stage log").push(stage)
            })
            .await
            .expect("analysis");

        assert_eq!(
            stages.into_inner().expect("stage log"),
            vec![
                Stage::FetchingTranscript,
                Stage::ResolvingCompetitor,
                Stage::GeneratingAnalysis,
                Stage::Scoring,
            ]
        );
    }

    #[tokio::test]
    async fn transcript_command_path_uses_the_same_provider() {
        let (analyzer, _) = analyzer(true, None);
        let transcript = analyzer.transcript(PRIMARY).await.expect("transcript");
        assert_eq!(transcript.text(), "hello world");
    }
}
