use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::keyboard::virtual_keyboard::Highlight;
use crate::session::trainer::TrainerState;
use crate::ui::components::keyboard_diagram::KeyboardDiagram;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct TrainerPanel<'a> {
    trainer: &'a TrainerState,
    total_seconds: u32,
    theme: &'a Theme,
}

impl<'a> TrainerPanel<'a> {
    pub fn new(trainer: &'a TrainerState, total_seconds: u32, theme: &'a Theme) -> Self {
        Self {
            trainer,
            total_seconds,
            theme,
        }
    }

    fn task_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        if self.trainer.is_finished() {
            return vec![
                Line::from(Span::styled(
                    "Time's up!",
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("You pressed {} shortcuts.", self.trainer.score),
                    Style::default().fg(colors.fg()),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "[r] Try again   [Enter] Continue the adventure",
                    Style::default().fg(colors.text_pending()),
                )),
            ];
        }

        let task = self.trainer.current_task();
        let mut lines = vec![
            Line::from(Span::styled(
                task.description.to_string(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        match self.trainer.hint_text() {
            Some(hint) => lines.push(Line::from(Span::styled(
                format!("Hint: {hint}"),
                Style::default().fg(colors.focused_key()),
            ))),
            None => lines.push(Line::from("")),
        }
        lines
    }
}

impl Widget for TrainerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let show_keyboard = area.height >= 16;
        let mut constraints = vec![Constraint::Length(3), Constraint::Min(5)];
        if show_keyboard {
            constraints.push(Constraint::Length(7));
        }
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        ProgressBar::countdown(self.trainer.time_left, self.total_seconds, self.theme)
            .render(layout[0], buf);

        let block = Block::bordered()
            .title(format!(" Shortcut Trainer | Score: {} ", self.trainer.score))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(self.task_lines())
            .block(block)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        if show_keyboard {
            let highlight: Highlight = self.trainer.keyboard.highlight();
            KeyboardDiagram::new(&highlight, self.theme).render(layout[2], buf);
        }
    }
}
