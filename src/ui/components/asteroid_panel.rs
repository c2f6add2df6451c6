use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::mission::asteroid::{AsteroidMission, Focus, PACKETS};
use crate::ui::components::buffer_line;
use crate::ui::theme::Theme;

/// Packets on the left, archive slots on the right.
pub struct AsteroidPanel<'a> {
    mission: &'a AsteroidMission,
    theme: &'a Theme,
}

impl<'a> AsteroidPanel<'a> {
    pub fn new(mission: &'a AsteroidMission, theme: &'a Theme) -> Self {
        Self { mission, theme }
    }

    fn slot(&self, title: String, content: &str, focused: bool, selected: bool) -> Paragraph<'static> {
        let colors = &self.theme.colors;
        let border = if focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let text_style = if selected {
            Style::default()
                .fg(colors.highlight_fg())
                .bg(colors.highlight_bg())
        } else {
            Style::default().fg(colors.fg())
        };
        let lines: Vec<Line<'static>> = if content.is_empty() {
            vec![Line::from(Span::styled(
                "(empty)",
                Style::default().fg(colors.text_pending()),
            ))]
        } else {
            content
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
                .collect()
        };
        let title_style = if focused {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        Paragraph::new(lines).block(
            Block::bordered()
                .title(Span::styled(title, title_style))
                .border_style(Style::default().fg(border)),
        )
    }
}

impl Widget for AsteroidPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(15), Constraint::Length(3)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer[0]);

        for (side, column) in columns.iter().enumerate() {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(*column);
            for (idx, row) in rows.iter().enumerate() {
                let paragraph = if side == 0 {
                    self.slot(
                        format!(" {} ", PACKETS[idx].0),
                        &self.mission.packets()[idx],
                        self.mission.focus() == Focus::Packet(idx),
                        self.mission.selected() == Some(idx),
                    )
                } else {
                    self.slot(
                        format!(" Archive {} ", idx + 1),
                        &self.mission.archive()[idx],
                        self.mission.focus() == Focus::Archive(idx),
                        false,
                    )
                };
                paragraph.render(*row, buf);
            }
        }

        let status = if self.mission.is_won() {
            Line::from(Span::styled(
                "All packets archived! Press Enter to fly on.",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            buffer_line(self.mission.buffer(), self.theme)
        };
        Paragraph::new(status)
            .block(Block::bordered().border_style(Style::default().fg(colors.border())))
            .render(outer[1], buf);
    }
}
