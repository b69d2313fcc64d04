use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

pub struct ProgressBar {
    pub progress: f64,
    pub message: String,
    pub logs: Vec<String>,
    pub max_logs: usize,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            message: String::new(),
            logs: Vec::new(),
            max_logs: 10,
        }
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Update the status line and record it in the log.
    pub fn advance(&mut self, progress: f64, message: impl Into<String>) {
        self.set_progress(progress);
        self.message = message.into();
        self.add_log(self.message.clone());
    }

    pub fn add_log(&mut self, log: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push(format!("[{timestamp}] {log}"));

        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, subject: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Subject
                Constraint::Length(3), // Gauge
                Constraint::Length(2), // Status
                Constraint::Min(1),    // Log
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(subject.to_string()).style(Style::default().fg(Color::White)),
            chunks[0],
        );

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(self.progress);
        f.render_widget(gauge, chunks[1]);

        f.render_widget(
            Paragraph::new(format!("Status: {}", self.message))
                .style(Style::default().fg(Color::Yellow)),
            chunks[2],
        );

        let log_lines: Vec<Line> = self
            .logs
            .iter()
            .map(|log| Line::from(Span::raw(log.as_str())))
            .collect();
        f.render_widget(
            Paragraph::new(log_lines).block(Block::default().borders(Borders::ALL).title("Log")),
            chunks[3],
        );
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.message.clear();
        self.logs.clear();
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}
