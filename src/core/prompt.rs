use crate::core::VideoMetadata;
use std::fmt::Write;

/// Assemble the analysis request sent to the narrative generator.
///
/// The model is asked for four labeled sections (five with a competitor). Nothing downstream
/// parses them: reach is re-derived from the whole response by the estimator.
pub fn build_prompt(
    transcript: &str,
    metadata: &VideoMetadata,
    competitor: Option<&VideoMetadata>,
) -> String {
    let mut prompt = format!(
        "Analyze the following YouTube video transcript and details to assess its quality and \
potential for viewer engagement:

**Video Title:** {title}
**View Count:** {views}

**Transcript:**
{transcript}

Provide:
* **Quality Assessment:** Rate the overall quality of the video (Poor, Fair, Good, Excellent) \
based on content, clarity, and production value.
* **Engagement Factors:** Identify specific elements within the transcript or video details that \
contribute to viewer engagement (e.g., interesting topics, humor, visuals, etc.).
* **Improvement Suggestions:** Offer 2-3 suggestions on how the video could be improved.
",
        title = metadata.title,
        views = metadata.view_count,
    );

    if let Some(competitor) = competitor {
        // Writing into a String cannot fail.
        let _ = write!(
            prompt,
            "
**Competitor Video Title:** {title}
**Competitor View Count:** {views}

* **Competitive Analysis:** Compare this video to the competitor video, highlighting strengths, \
weaknesses, and areas for improvement.
",
            title = competitor.title,
            views = competitor.view_count,
        );
    }

    prompt.push_str(
        "* **Estimated Reach Potential:** Predict the potential reach of the video (Low, Moderate, \
High) based on its current metrics and content.
",
    );

    prompt
}
