use crate::core::{ReachPotential, VideoMetadata};
use crate::output::metadata_rows;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Row, Table},
};

const YOUR_VIDEO_COLOR: Color = Color::LightBlue;
const COMPETITOR_COLOR: Color = Color::LightRed;

pub fn reach_bars(primary: ReachPotential, competitor: Option<ReachPotential>) -> Vec<Bar<'static>> {
    let mut subjects = vec![("Your Video", primary, YOUR_VIDEO_COLOR)];
    if let Some(competitor) = competitor {
        subjects.push(("Competitor Video", competitor, COMPETITOR_COLOR));
    }

    subjects
        .into_iter()
        .map(|(label, reach, color)| {
            Bar::default()
                .value(reach.ordinal())
                .label(Line::from(label))
                .text_value(reach.to_string())
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect()
}

pub fn render_reach_chart(
    f: &mut Frame,
    area: Rect,
    primary: ReachPotential,
    competitor: Option<ReachPotential>,
) {
    let bars = reach_bars(primary, competitor);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Video Reach Potential Assessment"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(16)
        .bar_gap(2)
        .max(ReachPotential::High.ordinal());
    f.render_widget(chart, area);
}

pub fn render_metadata_table(f: &mut Frame, area: Rect, metadata: &VideoMetadata) {
    let rows = metadata_rows(metadata)
        .into_iter()
        .map(|(label, value)| Row::new(vec![Cell::from(label), Cell::from(value)]));

    let header = Row::new(vec!["Metric", "Value"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, [Constraint::Length(15), Constraint::Min(10)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Video Statistics"));
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn single_subject_has_one_bar() {
        assert_eq!(reach_bars(ReachPotential::Low, None).len(), 1);
        assert_eq!(
            reach_bars(ReachPotential::Low, Some(ReachPotential::High)).len(),
            2
        );
    }

    #[test]
    fn table_renders_all_metrics() {
        let metadata = VideoMetadata {
            title: "Rust in 100 seconds".to_string(),
            view_count: 50_000,
            like_count: 1_200,
            comment_count: 0,
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).expect("terminal");
        terminal
            .draw(|f| {
                let area = f.area();
                render_metadata_table(f, area, &metadata);
            })
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        for needle in ["Title", "Rust in 100 seconds", "View Count", "50000", "Comment Count"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }
}
