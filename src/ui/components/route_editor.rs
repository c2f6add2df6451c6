use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::mission::navigation::{NavigationMission, ROUTE_HINTS, RouteStatus};
use crate::ui::components::editor_lines;
use crate::ui::theme::Theme;

/// Three route editors side by side with their save status and the storm
/// banner above them.
pub struct RouteEditor<'a> {
    mission: &'a NavigationMission,
    theme: &'a Theme,
}

impl<'a> RouteEditor<'a> {
    pub fn new(mission: &'a NavigationMission, theme: &'a Theme) -> Self {
        Self { mission, theme }
    }

    fn render_route(&self, idx: usize, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let route = &self.mission.routes()[idx];
        let focused = self.mission.focus() == idx;

        let (badge, badge_color) = match self.mission.status(idx) {
            RouteStatus::Clean => ("", colors.text_pending()),
            RouteStatus::Dirty => (" * unsaved", colors.warning()),
            RouteStatus::Saved => (" saved", colors.success()),
            RouteStatus::Damaged => (" DAMAGED", colors.error()),
        };
        let border = if focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(Line::from(vec![
                Span::styled(format!(" Route {} ", idx + 1), Style::default().fg(colors.fg())),
                Span::styled(badge, Style::default().fg(badge_color)),
            ]))
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1), Constraint::Length(5)])
            .split(inner);

        let text_style = if self.mission.status(idx) == RouteStatus::Damaged {
            Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        Paragraph::new(editor_lines(&route.editor, focused, text_style, cursor_style))
            .render(parts[0], buf);

        if let Some(toast) = route.toast {
            Paragraph::new(Span::styled(
                toast.text(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .render(parts[1], buf);
        }

        Paragraph::new(ROUTE_HINTS[idx])
            .style(Style::default().fg(colors.text_pending()))
            .wrap(Wrap { trim: false })
            .render(parts[2], buf);
    }
}

impl Widget for RouteEditor<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(13)])
            .split(area);

        let banner = if let Some(text) = self.mission.banner() {
            Line::from(Span::styled(
                text,
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            ))
        } else if self.mission.is_complete() {
            Line::from(Span::styled(
                "Every route is saved! Press Enter to fly on.",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "Edit each route, then save it with Ctrl+S.",
                Style::default().fg(colors.fg()),
            ))
        };
        Paragraph::new(banner)
            .block(Block::bordered().border_style(Style::default().fg(colors.border())))
            .render(rows[0], buf);

        let count = self.mission.routes().len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..count).map(|_| Constraint::Ratio(1, count)).collect::<Vec<_>>())
            .split(rows[1]);
        for (idx, column) in columns.iter().enumerate() {
            self.render_route(idx, *column, buf);
        }
    }
}
