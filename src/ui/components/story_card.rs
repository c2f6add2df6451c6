use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::story::Story;
use crate::ui::theme::Theme;

const WELCOME: [&str; 2] = [
    "The Galaxy needs a pilot who knows the ship's keyboard by heart.",
    "Learn the shortcuts, then use them to save the fleet.",
];

/// A titled card of narrative text with the continue prompt underneath.
pub struct StoryCard<'a> {
    title: &'a str,
    body: Vec<&'a str>,
    prompt: &'a str,
    theme: &'a Theme,
}

impl<'a> StoryCard<'a> {
    pub fn new(story: &'a Story, theme: &'a Theme) -> Self {
        Self {
            title: &story.title,
            body: story.body.iter().map(String::as_str).collect(),
            prompt: &story.prompt,
            theme,
        }
    }

    pub fn welcome(theme: &'a Theme) -> Self {
        Self {
            title: "KeyQuest",
            body: WELCOME.to_vec(),
            prompt: "Press Enter to start, Esc to leave",
            theme,
        }
    }
}

impl Widget for StoryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));

        let mut lines: Vec<Line> = Vec::new();
        for paragraph in self.body {
            lines.push(Line::from(Span::styled(
                paragraph,
                Style::default().fg(colors.fg()),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            self.prompt,
            Style::default()
                .fg(colors.focused_key())
                .add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
