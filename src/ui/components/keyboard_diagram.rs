use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::hotkey::combo::KeyToken;
use crate::keyboard::display::cap_label;
use crate::keyboard::layout::{KeyCap, ROWS, row_width};
use crate::keyboard::virtual_keyboard::Highlight;
use crate::ui::theme::Theme;

pub struct KeyboardDiagram<'a> {
    pub highlight: &'a Highlight,
    pub theme: &'a Theme,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(highlight: &'a Highlight, theme: &'a Theme) -> Self {
        Self { highlight, theme }
    }

    fn cap_style(&self, token: KeyToken) -> Style {
        let colors = &self.theme.colors;
        match self.highlight {
            Highlight::Success(keys) if keys.contains(&token) => Style::default()
                .fg(colors.bg())
                .bg(colors.success())
                .add_modifier(Modifier::BOLD),
            Highlight::Pressed(keys) if keys.contains(&token) => Style::default()
                .fg(colors.bg())
                .bg(colors.focused_key())
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(colors.fg()).bg(colors.bg()),
        }
    }
}

/// `[ A ]` style cap text padded to the cap width.
fn cap_text(cap: &KeyCap) -> String {
    let inner = cap.width.saturating_sub(2) as usize;
    let label: String = cap_label(cap.token).chars().take(inner).collect();
    format!("[{label:^inner$}]")
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Keyboard ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 30 {
            return;
        }

        for (row_idx, row) in ROWS.iter().enumerate() {
            let y = inner.y + row_idx as u16;
            if y >= inner.y + inner.height {
                break;
            }

            let offset = inner.width.saturating_sub(row_width(row)) / 2;
            let mut x = inner.x + offset;
            for cap in row.iter() {
                if x + cap.width > inner.x + inner.width {
                    break;
                }
                buf.set_string(x, y, cap_text(cap), self.cap_style(cap.token));
                x += cap.width;
            }
        }
    }
}
