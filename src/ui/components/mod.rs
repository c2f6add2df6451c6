pub mod asteroid_panel;
pub mod code_board;
pub mod highlight;
pub mod keyboard_diagram;
pub mod progress_bar;
pub mod route_editor;
pub mod signal_panel;
pub mod story_card;
pub mod trainer_panel;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::mission::Buffer;
use crate::mission::search::SearchBox;
use crate::ui::text_input::TextInput;
use crate::ui::theme::Theme;

/// Lines of an editor's text, with a block cursor when `focused`.
pub fn editor_lines(
    input: &TextInput,
    focused: bool,
    style: Style,
    cursor_style: Style,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let cursor = focused.then(|| input.cursor());

    for (idx, ch) in input.value().chars().enumerate() {
        if cursor == Some(idx) {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), style));
            }
            let shown = if ch == '\n' { ' ' } else { ch };
            spans.push(Span::styled(shown.to_string(), cursor_style));
        }
        if ch == '\n' {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), style));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }
        if cursor != Some(idx) {
            run.push(ch);
        }
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, style));
    }
    if cursor == Some(input.value().chars().count()) {
        spans.push(Span::styled(" ", cursor_style));
    }
    lines.push(Line::from(spans));
    lines
}

/// One-line search box. Shows the cursor while open and keeps the query
/// visible after it closes.
pub fn search_line(search: &SearchBox, theme: &Theme) -> Paragraph<'static> {
    let colors = &theme.colors;
    let active = search.is_active();
    let border = if active {
        colors.border_focused()
    } else {
        colors.border()
    };
    let mut spans = vec![Span::styled(
        "Search: ",
        Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
    )];
    if !active && search.query().is_empty() {
        spans.push(Span::styled(
            "press Ctrl+F",
            Style::default().fg(colors.text_pending()),
        ));
    } else if active {
        let text_style = Style::default().fg(colors.fg());
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        let (before, cursor, after) = search.input().render_parts();
        spans.push(Span::styled(before.to_string(), text_style));
        spans.push(Span::styled(cursor.unwrap_or(' ').to_string(), cursor_style));
        spans.push(Span::styled(after.to_string(), text_style));
    } else {
        spans.push(Span::styled(
            search.query().to_string(),
            Style::default().fg(colors.fg()),
        ));
    }
    Paragraph::new(Line::from(spans))
        .block(Block::bordered().border_style(Style::default().fg(border)))
}

/// What the clipboard holds right now.
pub fn buffer_line(buffer: &Buffer, theme: &Theme) -> Line<'static> {
    let colors = &theme.colors;
    match buffer.peek() {
        Some(payload) => {
            let first = payload.lines().next().unwrap_or_default();
            let more = if payload.contains('\n') { " ..." } else { "" };
            Line::from(vec![
                Span::styled("Clipboard: ", Style::default().fg(colors.text_pending())),
                Span::styled(
                    format!("{first}{more}"),
                    Style::default().fg(colors.focused_key()),
                ),
            ])
        }
        None => Line::from(Span::styled(
            "Clipboard is empty",
            Style::default().fg(colors.text_pending()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn editor_lines_split_on_newlines() {
        let input = TextInput::multiline("X = 1\nY = 2");
        let lines = editor_lines(&input, false, Style::default(), Style::default());
        assert_eq!(plain(&lines), vec!["X = 1", "Y = 2"]);
    }

    #[test]
    fn editor_lines_cursor_at_end_adds_cell() {
        let input = TextInput::new("ab");
        let lines = editor_lines(&input, true, Style::default(), Style::default());
        assert_eq!(plain(&lines), vec!["ab "]);
    }

    #[test]
    fn buffer_line_shows_first_line_of_payload() {
        let theme = Theme::default();
        let mut buffer = Buffer::default();
        assert_eq!(plain(&[buffer_line(&buffer, &theme)]), vec!["Clipboard is empty"]);
        buffer.put("LOG: AST-01\nSIGNAL: 78.2%");
        assert_eq!(
            plain(&[buffer_line(&buffer, &theme)]),
            vec!["Clipboard: LOG: AST-01 ..."]
        );
    }
}
