use crate::core::{Analysis, SubjectReport};
use crate::tui::app::{App, AppState, NoticeKind};
use crate::tui::components::{render_metadata_table, render_reach_chart};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

const TITLE: &str = "TubeScope · YouTube Video Analyzer";

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Screen
            Constraint::Length(3), // Notice / help
        ])
        .split(area);

    draw_title(f, chunks[0]);

    match app.state {
        AppState::Input => draw_input(f, app, chunks[1]),
        AppState::Processing => draw_processing(f, app, chunks[1]),
        AppState::Overview => draw_overview(f, app, chunks[1]),
        AppState::Results => draw_results(f, app, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Video link
            Constraint::Length(3), // Competitor link
            Constraint::Min(1),    // About
        ])
        .split(area);

    app.url_input.render(f, chunks[0]);
    app.competitor_input.render(f, chunks[1]);

    let about = Paragraph::new(vec![
        Line::from("Analyze a video's transcript and statistics and estimate its reach potential."),
        Line::from(""),
        Line::from(Span::styled(
            "Add a competitor's link to compare both videos side by side.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("About"));
    f.render_widget(about, chunks[2]);
}

fn draw_processing(f: &mut Frame, app: &App, area: Rect) {
    app.progress_bar.render(f, area, &app.processing_subject);
}

fn draw_overview(f: &mut Frame, app: &App, area: Rect) {
    let Some(lookup) = &app.lookup else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(1)])
        .split(area);

    render_metadata_table(f, chunks[0], &lookup.metadata);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Video ID: "),
            Span::styled(lookup.id.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
    ];
    if app.competitor_input.is_valid() {
        lines.push(Line::from(format!(
            "Competitor: {}",
            app.competitor_input.value.trim()
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "No competitor link given.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Ready to Analyze"));
    f.render_widget(details, chunks[1]);
}

fn draw_results(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    if let Some(viewer) = &mut app.content_viewer {
        viewer.render(f, chunks[0]);
    }

    let Some(analysis) = &app.analysis else {
        return;
    };

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Statistics
            Constraint::Min(8),    // Chart
            Constraint::Length(6), // Score breakdown
        ])
        .split(chunks[1]);

    render_metadata_table(f, side[0], &analysis.primary.metadata);
    render_reach_chart(
        f,
        side[1],
        analysis.primary.reach,
        analysis.competitor.as_ref().map(|c| c.reach),
    );
    draw_score_breakdown(f, side[2], analysis);
}

fn score_row(label: &'static str, report: &SubjectReport) -> Row<'static> {
    Row::new(vec![
        Cell::from(label),
        Cell::from(report.score.quality.to_string()),
        Cell::from(report.score.engagement.to_string()),
        Cell::from(report.score.views.to_string()),
        Cell::from(report.score.total().to_string()),
    ])
}

fn draw_score_breakdown(f: &mut Frame, area: Rect, analysis: &Analysis) {
    let mut rows = vec![score_row("Your Video", &analysis.primary)];
    if let Some(competitor) = &analysis.competitor {
        rows.push(score_row("Competitor", competitor));
    }

    let header = Row::new(vec!["", "Quality", "Engage", "Views", "Total"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Score Breakdown"));
    f.render_widget(table, area);
}

fn help_text(state: AppState) -> &'static str {
    match state {
        AppState::Input => "[Tab] Switch field  [Enter] Fetch details  [Esc] Quit",
        AppState::Processing => "[Esc] Cancel",
        AppState::Overview => "[a] Analyze  [e] Edit links  [q] Quit",
        AppState::Results => "[↑↓] Scroll  [PgUp/PgDn] Page  [a] Re-run  [Esc] Back  [q] Quit",
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let footer = match &app.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Error => Color::Red,
                NoticeKind::Warning => Color::Yellow,
            };
            Paragraph::new(notice.text.as_str())
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(help_text(app.state)))
        }
        None => Paragraph::new(help_text(app.state))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
    };
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::analyzer;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|f| draw(f, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn input_screen_shows_both_fields_and_help() {
        let (analyzer, _) = analyzer(true, None);
        let mut app = App::new(analyzer);
        let text = screen_text(&mut app);

        assert!(text.contains("Your YouTube Video Link"));
        assert!(text.contains("Competitor's YouTube Video Link"));
        assert!(text.contains("[Enter] Fetch details"));
    }

    #[test]
    fn notice_replaces_help_line() {
        let (analyzer, _) = analyzer(true, None);
        let mut app = App::new(analyzer);
        app.notice = Some(crate::tui::app::Notice {
            kind: NoticeKind::Error,
            text: "Invalid YouTube URL: nope".to_string(),
        });

        assert!(screen_text(&mut app).contains("Invalid YouTube URL: nope"));
    }
}
