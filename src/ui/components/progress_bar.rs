use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Countdown bar for the trainer. Turns the warning color for the last
/// fifth of the time.
pub struct ProgressBar<'a> {
    pub label: String,
    pub ratio: f64,
    pub caption: String,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn countdown(time_left: u32, total: u32, theme: &'a Theme) -> Self {
        let ratio = if total == 0 {
            0.0
        } else {
            time_left as f64 / total as f64
        };
        Self {
            label: "Time".to_string(),
            ratio: ratio.clamp(0.0, 1.0),
            caption: format!("{time_left}s"),
            theme,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio * inner.width as f64) as u16;
        let fill = if self.ratio <= 0.2 {
            colors.warning()
        } else {
            colors.bar_filled()
        };

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(fill)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(self.caption.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &self.caption, Style::default().fg(colors.fg()));
    }
}
