//! Plain-text rendering for the non-interactive commands.

use crate::core::{Analysis, ReachPotential, VideoMetadata};
use crate::error::Result;
use unicode_width::UnicodeWidthStr;

const BAR_UNIT: usize = 8;

pub fn metadata_rows(metadata: &VideoMetadata) -> [(&'static str, String); 4] {
    [
        ("Title", metadata.title.clone()),
        ("View Count", metadata.view_count.to_string()),
        ("Like Count", metadata.like_count.to_string()),
        ("Comment Count", metadata.comment_count.to_string()),
    ]
}

pub fn render_metadata_table(metadata: &VideoMetadata) -> String {
    let rows = metadata_rows(metadata);
    let label_width = rows.iter().map(|(label, _)| label.width()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.width()).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 4);
    let rule = format!("+-{}-+-{}-+", "-".repeat(label_width), "-".repeat(value_width));
    lines.push(rule.clone());
    lines.push(format!(
        "| {} | {} |",
        pad("Metric", label_width),
        pad("Value", value_width)
    ));
    lines.push(rule.clone());
    for (label, value) in &rows {
        lines.push(format!(
            "| {} | {} |",
            pad(label, label_width),
            pad(value, value_width)
        ));
    }
    lines.push(rule);
    lines.join("\n")
}

// `format!` pads by char count, which misaligns wide glyphs in titles.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Horizontal bar chart of the ordinal reach score for one or two videos.
pub fn render_reach_chart(primary: ReachPotential, competitor: Option<ReachPotential>) -> String {
    let mut subjects = vec![("Your Video", primary)];
    if let Some(competitor) = competitor {
        subjects.push(("Competitor Video", competitor));
    }

    let label_width = subjects.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut lines = vec!["Video Reach Potential Assessment".to_string()];
    for (label, reach) in subjects {
        let bar = "█".repeat(reach.ordinal() as usize * BAR_UNIT);
        lines.push(format!(
            "{label:<label_width$}  {bar:<width$}  {reach} ({})",
            reach.ordinal(),
            width = BAR_UNIT * ReachPotential::High.ordinal() as usize,
        ));
    }
    lines.join("\n")
}

pub fn render_analysis(analysis: &Analysis, width: usize) -> String {
    let mut sections = vec![
        render_metadata_table(&analysis.primary.metadata),
        "## Video Analysis".to_string(),
        wrap(&analysis.text, width),
        render_reach_chart(
            analysis.primary.reach,
            analysis.competitor.as_ref().map(|c| c.reach),
        ),
    ];

    if !analysis.warnings.is_empty() {
        let warnings: Vec<String> = analysis
            .warnings
            .iter()
            .map(|warning| format!("warning: {warning}"))
            .collect();
        sections.push(warnings.join("\n"));
    }

    sections.join("\n\n")
}

pub fn render_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Wrap each line of `text` separately so list items and headings keep their breaks.
fn wrap(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                textwrap::fill(line, width.max(20))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ReachScore, SubjectReport, extract_video_id};
    use chrono::Utc;

    fn metadata() -> VideoMetadata {
        VideoMetadata {
            title: "Rust in 100 seconds".to_string(),
            view_count: 50_000,
            like_count: 1_200,
            comment_count: 0,
        }
    }

    fn analysis(warnings: Vec<String>) -> Analysis {
        Analysis {
            primary: SubjectReport {
                id: extract_video_id("https://youtu.be/dQw4w9WgXcQ").expect("valid"),
                metadata: metadata(),
                score: ReachScore {
                    quality: 1,
                    engagement: 2,
                    views: 1,
                },
                reach: ReachPotential::High,
            },
            competitor: None,
            text: "**Quality Assessment:** Good\n\nThe video is good with high engagement".to_string(),
            warnings,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn table_lists_all_metrics_aligned() {
        let table = render_metadata_table(&metadata());
        for needle in ["Title", "Rust in 100 seconds", "View Count", "50000", "Like Count", "1200", "Comment Count"] {
            assert!(table.contains(needle), "missing {needle}");
        }
        let widths: Vec<usize> = table.lines().map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "ragged table: {table}");
    }

    #[test]
    fn chart_uses_ordinal_bar_lengths() {
        let chart = render_reach_chart(ReachPotential::High, Some(ReachPotential::Low));
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Your Video"));
        assert_eq!(lines[1].matches('█').count(), 3 * BAR_UNIT);
        assert!(lines[1].ends_with("High (3)"));
        assert!(lines[2].starts_with("Competitor Video"));
        assert_eq!(lines[2].matches('█').count(), BAR_UNIT);
        assert!(lines[2].ends_with("Low (1)"));
    }

    #[test]
    fn chart_without_competitor_has_single_bar() {
        let chart = render_reach_chart(ReachPotential::Moderate, None);
        assert_eq!(chart.lines().count(), 2);
        assert!(!chart.contains("Competitor"));
    }

    #[test]
    fn report_includes_text_and_warnings() {
        let rendered = render_analysis(
            &analysis(vec!["Invalid YouTube URL: x. Skipping competitive analysis.".to_string()]),
            80,
        );
        assert!(rendered.contains("## Video Analysis"));
        assert!(rendered.contains("The video is good with high engagement"));
        assert!(rendered.contains("warning: Invalid YouTube URL"));
    }

    #[test]
    fn json_carries_scores() {
        let json = render_json(&analysis(Vec::new())).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["primary"]["reach"], "High");
        assert_eq!(value["primary"]["score"]["engagement"], 2);
        assert_eq!(value["primary"]["id"], "dQw4w9WgXcQ");
        assert!(value["competitor"].is_null());
    }
}
