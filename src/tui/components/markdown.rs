use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::mem;

/// Convert model output (Markdown) into styled terminal lines.
pub fn markdown_lines(source: &str) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::default();
    for event in Parser::new(source) {
        builder.handle(event);
    }
    builder.finish()
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    // `Some(n)` is an ordered list whose next item is numbered `n`.
    lists: Vec<Option<u64>>,
    in_code_block: bool,
}

impl LineBuilder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush();
                let color = if level == HeadingLevel::H1 {
                    Color::Yellow
                } else {
                    Color::LightYellow
                };
                self.styles
                    .push(Style::default().fg(color).add_modifier(Modifier::BOLD));
            }
            Event::End(TagEnd::Heading(_)) => {
                self.styles.pop();
                self.flush();
                self.blank();
            }
            Event::End(TagEnd::Paragraph) => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Event::Start(Tag::Strong) => self.styles.push(Style::default().add_modifier(Modifier::BOLD)),
            Event::Start(Tag::Emphasis) => {
                self.styles.push(Style::default().add_modifier(Modifier::ITALIC))
            }
            Event::End(TagEnd::Strong) | Event::End(TagEnd::Emphasis) => {
                self.styles.pop();
            }
            Event::Start(Tag::List(start)) => {
                self.flush();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.spans.push(Span::styled(
                    format!("{indent}{marker}"),
                    Style::default().fg(Color::Green),
                ));
            }
            Event::End(TagEnd::Item) => self.flush(),
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush();
                self.in_code_block = false;
                self.blank();
            }
            Event::End(TagEnd::HtmlBlock) => self.blank(),
            Event::Text(text) if self.in_code_block => {
                self.push_block_text(&text, Style::default().fg(Color::Cyan));
            }
            // Raw HTML is shown as written.
            Event::Html(html) => {
                let style = self.current_style();
                self.push_block_text(&html, style);
            }
            Event::InlineHtml(html) => {
                let style = self.current_style();
                self.spans.push(Span::styled(html.into_string(), style));
            }
            Event::Text(text) => {
                let style = self.current_style();
                self.spans.push(Span::styled(text.into_string(), style));
            }
            Event::Code(code) => {
                self.spans.push(Span::styled(
                    code.into_string(),
                    Style::default().fg(Color::Cyan),
                ));
            }
            Event::SoftBreak => self.spans.push(Span::raw(" ")),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            _ => {}
        }
    }

    fn current_style(&self) -> Style {
        self.styles
            .iter()
            .fold(Style::default(), |acc, style| acc.patch(*style))
    }

    /// One output line per source line; block text arrives with embedded newlines.
    fn push_block_text(&mut self, text: &str, style: Style) {
        for line in text.lines() {
            self.spans.push(Span::styled(line.to_string(), style));
            self.flush();
        }
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(mem::take(&mut self.spans)));
        }
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}
