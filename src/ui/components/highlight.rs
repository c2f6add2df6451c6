use std::ops::Range;

use ratatui::style::Style;
use ratatui::text::Span;

/// Split `text` into spans, styling the byte `range` with `mark`.
pub fn highlighted(
    text: &str,
    range: Option<Range<usize>>,
    base: Style,
    mark: Style,
) -> Vec<Span<'static>> {
    match range {
        Some(r) if r.start < r.end && r.end <= text.len() => {
            let mut spans = Vec::with_capacity(3);
            if r.start > 0 {
                spans.push(Span::styled(text[..r.start].to_string(), base));
            }
            spans.push(Span::styled(text[r.clone()].to_string(), mark));
            if r.end < text.len() {
                spans.push(Span::styled(text[r.end..].to_string(), base));
            }
            spans
        }
        _ => vec![Span::styled(text.to_string(), base)],
    }
}
