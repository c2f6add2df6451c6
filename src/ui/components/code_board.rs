use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::mission::galactic::{CODES, COLUMNS, FIELDS, FieldStatus, Focus, GalacticMission};
use crate::ui::components::highlight::highlighted;
use crate::ui::components::search_line;
use crate::ui::theme::Theme;

const CELL_WIDTH: usize = 11;

/// The galactic code board: a grid of codes, the search box and the three
/// message fields.
pub struct CodeBoard<'a> {
    mission: &'a GalacticMission,
    theme: &'a Theme,
}

impl<'a> CodeBoard<'a> {
    pub fn new(mission: &'a GalacticMission, theme: &'a Theme) -> Self {
        Self { mission, theme }
    }

    fn grid_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mark = Style::default()
            .fg(colors.highlight_fg())
            .bg(colors.highlight_bg());

        CODES
            .chunks(COLUMNS)
            .enumerate()
            .map(|(row, codes)| {
                let mut spans = Vec::new();
                for (col, code) in codes.iter().enumerate() {
                    let idx = row * COLUMNS + col;
                    let focused = self.mission.focus() == Focus::Code(idx);
                    let selected = self.mission.selected() == Some(*code);

                    let mut base = Style::default().fg(colors.fg());
                    if selected {
                        base = base.fg(colors.success()).add_modifier(Modifier::BOLD);
                    }
                    if focused {
                        base = base.bg(colors.accent_dim()).add_modifier(Modifier::BOLD);
                    }

                    spans.extend(highlighted(
                        code,
                        self.mission.search.highlight(code),
                        base,
                        mark,
                    ));
                    let pad = CELL_WIDTH.saturating_sub(code.chars().count());
                    spans.push(Span::raw(" ".repeat(pad)));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn field_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut lines = Vec::with_capacity(FIELDS + 2);
        for idx in 0..FIELDS {
            let value = &self.mission.fields()[idx];
            let (marker, color) = match self.mission.field_status(idx) {
                FieldStatus::Empty => ("   ", colors.text_pending()),
                FieldStatus::Correct => (" + ", colors.success()),
                FieldStatus::Incorrect => (" x ", colors.error()),
            };
            let focused = self.mission.focus() == Focus::Field(idx);
            let label_style = if focused {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let shown = if value.is_empty() { "________" } else { value.as_str() };
            lines.push(Line::from(vec![
                Span::styled(format!("Field {}: ", idx + 1), label_style),
                Span::styled(shown.to_string(), Style::default().fg(color)),
                Span::styled(marker, Style::default().fg(color)),
            ]));
        }
        if self.mission.is_won() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Message sent! Press Enter to fly on.",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }
}

impl Widget for CodeBoard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(7),
            ])
            .split(area);

        let secrets = self.mission.secrets().join(", ");
        Paragraph::new(Line::from(vec![
            Span::styled("Find codes for: ", Style::default().fg(colors.fg())),
            Span::styled(
                secrets,
                Style::default()
                    .fg(colors.focused_key())
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::bordered().border_style(Style::default().fg(colors.border())))
        .render(layout[0], buf);

        search_line(&self.mission.search, self.theme).render(layout[1], buf);

        Paragraph::new(self.grid_lines())
            .block(
                Block::bordered()
                    .title(" Code Board ")
                    .border_style(Style::default().fg(colors.border_focused())),
            )
            .render(layout[2], buf);

        Paragraph::new(self.field_lines())
            .block(
                Block::bordered()
                    .title(" Message ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(layout[3], buf);
    }
}
