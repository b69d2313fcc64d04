use crate::tui::components::markdown_lines;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Scrollable, wrapped view of the generated analysis.
pub struct Viewer {
    lines: Vec<Line<'static>>,
    pub scroll: usize,
    title: String,
    // Last rendered inner size; scrolling is clamped against it.
    page_height: usize,
    page_width: usize,
}

impl Viewer {
    pub fn new(markdown: &str, title: impl Into<String>) -> Self {
        Self {
            lines: markdown_lines(markdown),
            scroll: 0,
            title: title.into(),
            page_height: 0,
            page_width: 0,
        }
    }

    /// Rows the content occupies once wrapped to `width` columns.
    fn wrapped_rows(&self, width: usize) -> usize {
        if width == 0 {
            return self.lines.len();
        }
        self.lines
            .iter()
            .map(|line| line.width().div_ceil(width).max(1))
            .sum()
    }

    fn max_scroll(&self) -> usize {
        self.wrapped_rows(self.page_width)
            .saturating_sub(self.page_height)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page = self.page_height.max(1);
        match key.code {
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(page),
            KeyCode::PageDown => self.scroll = (self.scroll + page).min(self.max_scroll()),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.max_scroll(),
            _ => return false,
        }
        true
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.page_height = area.height.saturating_sub(2) as usize;
        self.page_width = area.width.saturating_sub(2) as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let total = self.wrapped_rows(self.page_width);
        let position = if total > self.page_height {
            format!(
                " ({}-{} of {})",
                self.scroll + 1,
                (self.scroll + self.page_height).min(total),
                total
            )
        } else {
            String::new()
        };

        let paragraph = Paragraph::new(self.lines.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{}{position}", self.title)),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));

        f.render_widget(paragraph, area);
    }
}
