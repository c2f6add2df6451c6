use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::mission::final_mission::{FinalMission, Focus, REQUIRED_CODES, SIGNAL, SLOT_HINTS, SaveMessage};
use crate::ui::components::{buffer_line, search_line};
use crate::ui::theme::Theme;

/// The intercepted signal with the word caret, plus the three code slots.
pub struct SignalPanel<'a> {
    mission: &'a FinalMission,
    theme: &'a Theme,
}

impl<'a> SignalPanel<'a> {
    pub fn new(mission: &'a FinalMission, theme: &'a Theme) -> Self {
        Self { mission, theme }
    }

    fn signal_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let caret = self.mission.caret();
        let selection = caret.selection();
        let signal_focused = self.mission.focus() == Focus::Signal;

        SIGNAL
            .iter()
            .enumerate()
            .map(|(line_idx, line)| {
                let found = self.mission.search.highlight(line);
                let mut spans = Vec::new();
                let mut last = 0;
                for (word_idx, range) in self.mission.words(line_idx).iter().enumerate() {
                    if range.start > last {
                        spans.push(Span::raw(line[last..range.start].to_string()));
                    }
                    let word = &line[range.clone()];
                    let mut style = Style::default().fg(colors.fg());
                    if REQUIRED_CODES.iter().any(|c| word.contains(c) && self.mission.is_cut(c)) {
                        style = style
                            .fg(colors.text_pending())
                            .add_modifier(Modifier::CROSSED_OUT);
                    }
                    if found
                        .as_ref()
                        .is_some_and(|f| f.start < range.end && range.start < f.end)
                    {
                        style = style.fg(colors.highlight_fg()).bg(colors.highlight_bg());
                    }
                    if signal_focused && line_idx == caret.line && selection.contains(&word_idx) {
                        style = style.bg(colors.accent_dim()).add_modifier(Modifier::BOLD);
                        if word_idx == caret.word {
                            style = style.add_modifier(Modifier::UNDERLINED);
                        }
                    }
                    spans.push(Span::styled(word.to_string(), style));
                    last = range.end;
                }
                if last < line.len() {
                    spans.push(Span::raw(line[last..].to_string()));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn slot_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut lines = Vec::new();
        for (idx, value) in self.mission.panel().iter().enumerate() {
            let focused = self.mission.focus() == Focus::Slot(idx);
            let label_style = if focused {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let value_style = if value == REQUIRED_CODES[idx] {
                Style::default().fg(colors.success())
            } else {
                Style::default().fg(colors.focused_key())
            };
            let shown = if value.is_empty() { "______________" } else { value.as_str() };
            lines.push(Line::from(vec![
                Span::styled(format!("Slot {}: ", idx + 1), label_style),
                Span::styled(shown.to_string(), value_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", SLOT_HINTS[idx]),
                Style::default().fg(colors.text_pending()),
            )));
        }
        lines
    }
}

impl Widget for SignalPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(8),
                Constraint::Length(3),
            ])
            .split(area);

        search_line(&self.mission.search, self.theme).render(layout[0], buf);

        let border = if self.mission.focus() == Focus::Signal {
            colors.border_focused()
        } else {
            colors.border()
        };
        Paragraph::new(self.signal_lines())
            .block(
                Block::bordered()
                    .title(" Intercepted Signal ")
                    .border_style(Style::default().fg(border)),
            )
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);

        Paragraph::new(self.slot_lines())
            .block(
                Block::bordered()
                    .title(" Control Panel ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(layout[2], buf);

        let status = match self.mission.message() {
            Some(message) => {
                let color = match message {
                    SaveMessage::Success => colors.success(),
                    SaveMessage::Failure => colors.error(),
                };
                Line::from(Span::styled(
                    message.text(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
            }
            None => buffer_line(self.mission.buffer(), self.theme),
        };
        Paragraph::new(status)
            .block(Block::bordered().border_style(Style::default().fg(colors.border())))
            .render(layout[3], buf);
    }
}
